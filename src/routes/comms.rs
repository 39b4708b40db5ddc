// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact form and about page.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{About, ContactUs};
use crate::response::ApiResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/comms/about", get(about))
}

/// Routes behind `require_auth`.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/comms/contact-us", post(contact_us))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactUsRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

async fn contact_us(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: std::result::Result<Json<ContactUsRequest>, JsonRejection>,
) -> Result<ApiResponse<ContactUs>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation("invalid contact message", &e))?;

    let contact = state
        .comms_service
        .send_contact_us(&user, &req.subject, &req.message)
        .await?;
    Ok(ApiResponse::created("email sent successfully", contact))
}

async fn about(State(state): State<Arc<AppState>>) -> Result<ApiResponse<About>> {
    let about = state.comms_service.about().await?;
    Ok(ApiResponse::ok("about details retrieved successfully", about))
}
