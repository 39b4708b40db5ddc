// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access-token authentication middleware.

use crate::error::AppError;
use crate::models::UserIdentity;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Clients send `Token: Bearer <access-token>` (not `Authorization`).
pub const TOKEN_HEADER: &str = "token";

/// Authenticated user extracted from the access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserIdentity);

/// Middleware that requires a valid access token.
///
/// The identity comes from the token itself; storage is not consulted.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .ok_or_else(|| AppError::Unauthorized("empty token value".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized(AppError::NOT_AUTHORIZED.to_string()))?;

    let token = bearer_token(header)?;

    let user = state
        .token_service
        .user_from_access_token(token)
        .map_err(|_| AppError::Unauthorized(AppError::NOT_AUTHORIZED.to_string()))?;

    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}

fn bearer_token(header: &str) -> Result<&str, AppError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(AppError::Unauthorized("empty token value".to_string()));
    }

    match header.split_once(' ') {
        Some((scheme, token)) if scheme == "Bearer" && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AppError::Unauthorized(
            "must provide Token header with format `Bearer {token}`".to_string(),
        )),
    }
}
