// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error envelope tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::IntoResponse,
};
use lokate::error::AppError;
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn envelope(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_envelope_shape() {
    let (status, body) = envelope(AppError::NotFound("place not found".to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "place not found");
    assert_eq!(body["error"], "Not Found");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_conflict_is_bad_request() {
    let (status, body) = envelope(AppError::Conflict("place already exists".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_internal_details_are_hidden() {
    let (status, body) = envelope(AppError::Database("connection reset by peer".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "something went wrong, please try again later");
    assert!(!body.to_string().contains("connection reset"));

    let (_, body) = envelope(AppError::Internal(anyhow::anyhow!("secret stack trace"))).await;
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = common::create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_success_envelope_shape() {
    let app = common::create_test_app();
    let id = app.create_place("Euston", "51.5282", "-0.1337").await;

    let (status, body) = app
        .request("GET", &format!("/places/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert!(body.get("error").is_none());
    assert!(body["data"].is_object());
}
