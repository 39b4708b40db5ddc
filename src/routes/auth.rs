// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup, login, logout and token refresh.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::UserIdentity;
use crate::response::ApiResponse;
use crate::AppState;

/// Public routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Routes behind `require_auth`.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "first name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "super::not_blank", message = "last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Identity plus a fresh token pair.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserIdentity,
    pub access_token: String,
    pub refresh_token: String,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionResponse>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation("invalid signup details", &e))?;

    let user = state
        .credential_service
        .signup(&req.first_name, &req.last_name, &req.email, &req.password)
        .await?;

    let identity = user.identity();
    let tokens = state.token_service.generate_token_pair(&identity).await?;

    Ok(ApiResponse::created(
        "signed up successfully",
        SessionResponse {
            user: identity,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionResponse>> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation("invalid login details", &e))?;

    let user = state
        .credential_service
        .login(&req.email, &req.password)
        .await?;

    let identity = user.identity();
    let tokens = state.token_service.generate_token_pair(&identity).await?;
    tracing::info!(user_id = %identity.id, "User logged in");

    Ok(ApiResponse::ok(
        "logged in successfully",
        SessionResponse {
            user: identity,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
    ))
}

/// Exchange the active refresh token for a new pair.
async fn refresh(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionResponse>> {
    let Json(req) = payload?;
    if req.refresh_token.trim().is_empty() {
        return Err(AppError::BadRequest("refresh token is required".to_string()));
    }

    let (user, tokens) = state.token_service.refresh(req.refresh_token.trim()).await?;

    Ok(ApiResponse::ok(
        "tokens refreshed successfully",
        SessionResponse {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
    ))
}

/// Drops the stored token pair. The caller's access token stays usable
/// until it expires.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<ApiResponse<()>> {
    state.token_service.logout(&user.id).await?;
    Ok(ApiResponse::ok("logged out successfully", ()))
}
