// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved-place routes. All require authentication.
//!
//! `POST /saved-places/{id}` takes a *place* id; the other `{id}` routes
//! take a saved-place id.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::SavedPlace;
use crate::response::ApiResponse;
use crate::AppState;

/// Routes behind `require_auth`.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/saved-places", get(list_saved_places))
        .route(
            "/saved-places/{id}",
            get(get_saved_place)
                .post(save_place)
                .put(edit_saved_place)
                .delete(delete_saved_place),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct SavePlaceRequest {
    #[serde(default)]
    pub name: String,
    /// HOME, WORK or NONE (any case). Missing means NONE.
    #[serde(default)]
    pub place_alias: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditSavedPlaceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_alias: Option<String>,
}

async fn save_place(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<SavePlaceRequest>, JsonRejection>,
) -> Result<ApiResponse<SavedPlace>> {
    let place_id = parse_id(&id, "place")?;
    let Json(req) = payload?;

    let saved = state
        .saved_place_service
        .add_saved_place(&user.id, &place_id, req.place_alias.as_deref(), &req.name)
        .await?;
    Ok(ApiResponse::created("place saved successfully", saved))
}

async fn get_saved_place(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SavedPlace>> {
    let saved_place_id = parse_id(&id, "saved place")?;
    let saved = state
        .saved_place_service
        .get_saved_place(&user.id, &saved_place_id)
        .await?;
    Ok(ApiResponse::ok("saved place retrieved successfully", saved))
}

async fn list_saved_places(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<ApiResponse<Vec<SavedPlace>>> {
    let saved = state.saved_place_service.get_saved_places(&user.id).await?;
    Ok(ApiResponse::ok("saved places retrieved successfully", saved))
}

async fn edit_saved_place(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<EditSavedPlaceRequest>, JsonRejection>,
) -> Result<ApiResponse<SavedPlace>> {
    let saved_place_id = parse_id(&id, "saved place")?;
    let Json(req) = payload?;

    let saved = state
        .saved_place_service
        .edit_saved_place(
            &user.id,
            &saved_place_id,
            req.name.as_deref(),
            req.place_alias.as_deref(),
        )
        .await?;
    Ok(ApiResponse::ok("saved place edited successfully", saved))
}

async fn delete_saved_place(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    let saved_place_id = parse_id(&id, "saved place")?;
    state
        .saved_place_service
        .delete_saved_place(&user.id, &saved_place_id)
        .await?;
    Ok(ApiResponse::ok("deleted saved place successfully", ()))
}
