// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account lifecycle tests: signup, login, refresh, logout and profile edits.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn signup_body(email: &str, password: &str, confirm: &str) -> serde_json::Value {
    json!({
        "first_name": "grace",
        "last_name": "HOPPER",
        "email": email,
        "password": password,
        "confirm_password": confirm,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Signup
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_signup_returns_identity_and_tokens() {
    let app = common::create_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/auth/signup",
            None,
            Some(signup_body("grace@example.com", "secret1", "secret1")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "signed up successfully");

    let user = &body["data"]["user"];
    assert_eq!(user["first_name"], "Grace");
    assert_eq!(user["last_name"], "Hopper");
    assert_eq!(user["display_name"], "Grace Hopper");
    assert_eq!(user["email"], "grace@example.com");
    assert!(user.get("password_hash").is_none());
    assert!(body["data"]["access_token"].as_str().is_some());
    assert!(body["data"]["refresh_token"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let app = common::create_test_app();
    let (user_id, _, _) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/signup",
            None,
            Some(signup_body("grace@example.com", "secret1", "secret1")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "sorry, email is taken");

    // The rejected signup left the original account alone.
    let stored = app.db.users_with_email("grace@example.com");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, user_id);
    assert_eq!(stored[0].display_name, "Grace Hopper");
}

#[tokio::test]
async fn test_signup_validation_details() {
    let app = common::create_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/auth/signup",
            None,
            Some(signup_body("not-an-email", "short", "different")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid signup details");
    let details: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert!(details.contains(&"email is invalid"));
    assert!(details.contains(&"password must be at least 6 characters"));
    assert!(details.contains(&"passwords do not match"));
}

#[tokio::test]
async fn test_concurrent_signups_create_one_account() {
    let app = common::create_test_app();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let router = app.router.clone();
        let body = signup_body("race@example.com", "secret1", "secret1").to_string();
        handles.push(tokio::spawn(async move {
            router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/auth/signup")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap()
                .status()
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::CREATED {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(app.db.users_with_email("race@example.com").len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Login
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_login_after_signup() {
    let app = common::create_test_app();
    let (user_id, _, _) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "password123"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged in successfully");
    assert_eq!(body["data"]["user"]["id"], user_id.as_str());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = common::create_test_app();
    app.signup("grace", "hopper", "grace@example.com").await;

    let (wrong_status, wrong_body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "wrong-password"})),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "password123"})),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["message"], "invalid login credentials");
}

#[tokio::test]
async fn test_second_login_supersedes_refresh_token() {
    let app = common::create_test_app();
    let (_, _, first_refresh) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "password123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": first_refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ═══════════════════════════════════════════════════════════════════════════
// Refresh and logout
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_refresh_rotates_pair() {
    let app = common::create_test_app();
    let (user_id, _, refresh) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "tokens refreshed successfully");
    assert_eq!(body["data"]["user"]["id"], user_id.as_str());

    let new_refresh = body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, refresh);

    // The old refresh token was replaced.
    let (status, _) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = common::create_test_app();
    let (_, access, _) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": access})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request("POST", "/auth/refresh", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "refresh token is required");
}

#[tokio::test]
async fn test_logout_invalidates_refresh_but_not_access() {
    let app = common::create_test_app();
    let (_, access, refresh) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app.request("POST", "/auth/logout", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "logged out successfully");

    let (status, _) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Access tokens are self-contained and live until expiry.
    let (status, _) = app.request("GET", "/saved-places", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
}

// ═══════════════════════════════════════════════════════════════════════════
// Profile
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_update_profile() {
    let app = common::create_test_app();
    let (user_id, access, _) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app
        .request(
            "PUT",
            "/user/update-profile",
            Some(&access),
            Some(json!({
                "first_name": "amazing",
                "last_name": "grace",
                "email": "amazing@example.com",
                "phone_number": "07700900123",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "profile edited successfully");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["display_name"], "Amazing Grace");
    assert_eq!(body["data"]["email"], "amazing@example.com");

    // The new email works for login and the old one does not.
    let (status, _) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "amazing@example.com", "password": "password123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "password123"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_to_taken_email() {
    let app = common::create_test_app();
    app.signup("alan", "turing", "alan@example.com").await;
    let (_, access, _) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, body) = app
        .request(
            "PUT",
            "/user/update-profile",
            Some(&access),
            Some(json!({
                "first_name": "grace",
                "last_name": "hopper",
                "email": "alan@example.com",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "sorry, email is taken");
}

#[tokio::test]
async fn test_refresh_picks_up_profile_edit() {
    let app = common::create_test_app();
    let (_, access, refresh) = app.signup("grace", "hopper", "grace@example.com").await;

    let (status, _) = app
        .request(
            "PUT",
            "/user/update-profile",
            Some(&access),
            Some(json!({
                "first_name": "grace",
                "last_name": "murray",
                "email": "new@example.com",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "new@example.com");
    assert_eq!(body["data"]["user"]["display_name"], "Grace Murray");

    // The refreshed access token carries the edited identity too.
    let new_access = body["data"]["access_token"].as_str().unwrap();
    let carried = app.state.token_service.user_from_access_token(new_access).unwrap();
    assert_eq!(carried.email, "new@example.com");
    assert_eq!(carried.display_name, "Grace Murray");
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let app = common::create_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/auth/signup",
            None,
            Some(json!({
                "first_name": "   ",
                "last_name": "hopper",
                "email": "grace@example.com",
                "password": "secret1",
                "confirm_password": "secret1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"], json!(["first name is required"]));
    assert!(app.db.users_with_email("grace@example.com").is_empty());

    let (_, access, _) = app.signup("grace", "hopper", "grace@example.com").await;
    let (status, body) = app
        .request(
            "PUT",
            "/user/update-profile",
            Some(&access),
            Some(json!({
                "first_name": "grace",
                "last_name": " \t ",
                "email": "grace@example.com",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"], json!(["last name is required"]));
    assert_eq!(
        app.db.users_with_email("grace@example.com")[0].display_name,
        "Grace Hopper"
    );
}
