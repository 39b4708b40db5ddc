// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use lokate::config::Config;
use lokate::db::{FirestoreDb, MemoryDb};
use lokate::error::AppError;
use lokate::routes::create_router;
use lokate::services::{Mailer, OutgoingMail};
use lokate::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Mailer that keeps every message in memory.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub db: Arc<MemoryDb>,
    pub mailer: Arc<RecordingMailer>,
}

/// Create a test app over in-memory storage.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> TestApp {
    let db = Arc::new(MemoryDb::new());
    let mailer = Arc::new(RecordingMailer::default());
    let state = Arc::new(
        AppState::new(config, db.clone(), mailer.clone()).expect("Failed to build app state"),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        db,
        mailer,
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Send a request and decode the JSON envelope.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Token", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Sign up a user and return `(user_id, access_token, refresh_token)`.
    pub async fn signup(&self, first: &str, last: &str, email: &str) -> (String, String, String) {
        let (status, body) = self
            .request(
                "POST",
                "/auth/signup",
                None,
                Some(serde_json::json!({
                    "first_name": first,
                    "last_name": last,
                    "email": email,
                    "password": "password123",
                    "confirm_password": "password123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        let data = &body["data"];
        (
            data["user"]["id"].as_str().unwrap().to_string(),
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Create a place and return its id.
    pub async fn create_place(&self, name: &str, latitude: &str, longitude: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/places",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "latitude": latitude,
                    "longitude": longitude,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create place failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}
