// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes for authenticated users.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::put,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::UserIdentity;
use crate::response::ApiResponse;
use crate::services::ProfileUpdate;
use crate::AppState;

/// Routes behind `require_auth`.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/update-profile", put(update_profile))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "first name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 7, max = 20, message = "phone number is invalid"))]
    pub phone_number: Option<String>,
}

/// Returns the updated identity. The caller's current tokens still carry
/// the old one until the next login.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<ApiResponse<UserIdentity>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation("invalid profile details", &e))?;

    let updated = state
        .credential_service
        .edit_profile(
            &user.id,
            ProfileUpdate {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone_number: req.phone_number.filter(|p| !p.trim().is_empty()),
            },
        )
        .await?;

    Ok(ApiResponse::ok("profile edited successfully", updated.identity()))
}
