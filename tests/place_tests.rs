// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place creation, lookup and visit history over HTTP.

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;

mod common;

#[tokio::test]
async fn test_create_and_get_place() {
    let app = common::create_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/places",
            None,
            Some(json!({
                "type": "train_station",
                "name": "London Euston",
                "latitude": "51.5282",
                "longitude": "-0.1337",
                "station_code": "EUS",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "place added successfully");
    assert_eq!(body["data"]["type"], "train_station");
    assert_eq!(body["data"]["latitude"], 51.5282);

    let id = body["data"]["id"].as_str().unwrap();
    let (status, body) = app
        .request("GET", &format!("/places/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "place retrieved successfully");
    assert_eq!(body["data"]["name"], "London Euston");
    assert_eq!(body["data"]["station_code"], "EUS");
}

#[tokio::test]
async fn test_duplicate_coordinates_conflict() {
    let app = common::create_test_app();
    app.create_place("Euston", "51.5282", "-0.1337").await;

    let (status, body) = app
        .request(
            "POST",
            "/places",
            None,
            Some(json!({"name": "Euston again", "latitude": "51.5282", "longitude": "-0.1337"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "place already exists");

    // A different spelling of the same number is a different key.
    let (status, _) = app
        .request(
            "POST",
            "/places",
            None,
            Some(json!({"name": "Euston", "latitude": "51.52820", "longitude": "-0.1337"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_place_rejects_bad_coordinates() {
    let app = common::create_test_app();

    for (lat, lon, message) in [
        ("91", "0", "invalid latitude"),
        ("north", "0", "invalid latitude"),
        ("0", "-180.5", "invalid longitude"),
    ] {
        let (status, body) = app
            .request(
                "POST",
                "/places",
                None,
                Some(json!({"name": "Somewhere", "latitude": lat, "longitude": lon})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], message);
    }

    let (status, body) = app
        .request(
            "POST",
            "/places",
            None,
            Some(json!({"name": "  ", "latitude": "1", "longitude": "1"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "place name is required");
}

#[tokio::test]
async fn test_get_place_errors() {
    let app = common::create_test_app();

    let (status, body) = app
        .request("GET", &format!("/places/{}", uuid::Uuid::new_v4()), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "place not found");

    let (status, body) = app.request("GET", "/places/12345", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid place id");
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = common::create_test_app();

    let (status, body) = app.request("GET", "/places/search", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid search query");

    let (status, _) = app
        .request("GET", "/places/search?query=%20%20", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_last_visited_newest_first() {
    let app = common::create_test_app();
    let (user_id, access, _) = app.signup("ada", "lovelace", "ada@example.com").await;

    let mut place_ids = Vec::new();
    for (i, name) in ["A", "B", "C"].iter().enumerate() {
        let id = app
            .create_place(name, &format!("51.{}", i + 1), "-0.1")
            .await;
        let (status, body) = app
            .request("POST", &format!("/places/{}/last", id), Some(&access), None)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "last visited place added successfully");
        assert_eq!(body["data"]["user_id"], user_id.as_str());
        place_ids.push(id);
        // Keep timestamps distinct at millisecond precision.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, body) = app
        .request("GET", "/places/last/2", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let visits = body["data"].as_array().unwrap();
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[0]["place_id"], place_ids[2].as_str());
    assert_eq!(visits[1]["place_id"], place_ids[1].as_str());

    let (_, body) = app
        .request("GET", "/places/last/10", Some(&access), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_last_visited_bounds_and_isolation() {
    let app = common::create_test_app();
    let (_, ada, _) = app.signup("ada", "lovelace", "ada@example.com").await;
    let (_, alan, _) = app.signup("alan", "turing", "alan@example.com").await;
    let place_id = app.create_place("Museum", "51.49", "-0.17").await;

    app.request("POST", &format!("/places/{}/last", place_id), Some(&ada), None)
        .await;

    let (status, body) = app
        .request("GET", "/places/last/5", Some(&alan), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    for num in ["0", "101", "-1", "many"] {
        let (status, _) = app
            .request("GET", &format!("/places/last/{}", num), Some(&ada), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "num={}", num);
    }

    let (status, body) = app
        .request(
            "POST",
            &format!("/places/{}/last", uuid::Uuid::new_v4()),
            Some(&ada),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "place not found");
}

#[tokio::test]
async fn test_visit_routes_require_auth() {
    let app = common::create_test_app();
    let place_id = app.create_place("Museum", "51.49", "-0.17").await;

    let (status, _) = app
        .request("POST", &format!("/places/{}/last", place_id), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.request("GET", "/places/last/3", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
