// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place creation, lookup, search and visit history.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::parse_id;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{LastVisitedPlace, Place, PlaceSummary};
use crate::response::ApiResponse;
use crate::services::NewPlace;
use crate::AppState;

/// Public routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/places", post(create_place))
        .route("/places/search", get(search_places))
        .route("/places/{id}", get(get_place))
}

/// Routes behind `require_auth`.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/places/{id}/last", post(add_last_visited))
        .route("/places/last/{num}", get(last_visited))
}

/// Coordinates arrive as strings; their exact spelling is the dedup key.
#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    pub accuracy: Option<i64>,
    pub description: Option<String>,
    pub osm_id: Option<String>,
    pub atcocode: Option<String>,
    pub station_code: Option<String>,
    pub tiploc_code: Option<String>,
    pub smscode: Option<String>,
    pub distance: Option<f64>,
}

impl From<CreatePlaceRequest> for NewPlace {
    fn from(req: CreatePlaceRequest) -> Self {
        NewPlace {
            place_type: req.place_type,
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
            accuracy: req.accuracy,
            description: req.description,
            osm_id: req.osm_id,
            atcocode: req.atcocode,
            station_code: req.station_code,
            tiploc_code: req.tiploc_code,
            smscode: req.smscode,
            distance: req.distance,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    query: Option<String>,
}

async fn create_place(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreatePlaceRequest>, JsonRejection>,
) -> Result<ApiResponse<Place>> {
    let Json(req) = payload?;
    let place = state.place_service.create(req.into()).await?;
    Ok(ApiResponse::created("place added successfully", place))
}

async fn get_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Place>> {
    let place_id = parse_id(&id, "place")?;
    let place = state.place_service.get_place(&place_id).await?;
    Ok(ApiResponse::ok("place retrieved successfully", place))
}

async fn search_places(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<PlaceSummary>>> {
    let Query(params) = query?;
    let places = state
        .journey_service
        .search_places(params.query.as_deref().unwrap_or(""))
        .await?;
    Ok(ApiResponse::ok("places retrieved successfully", places))
}

async fn add_last_visited(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<ApiResponse<LastVisitedPlace>> {
    let place_id = parse_id(&id, "place")?;
    let visit = state
        .visit_service
        .add_last_visited(&user.id, &place_id)
        .await?;
    Ok(ApiResponse::created("last visited place added successfully", visit))
}

async fn last_visited(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(num): Path<String>,
) -> Result<ApiResponse<Vec<LastVisitedPlace>>> {
    let n: u32 = num
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid number of places".to_string()))?;

    let visits = state.visit_service.last_n_visited(&user.id, n).await?;
    Ok(ApiResponse::ok(
        "last visited places retrieved successfully",
        visits,
    ))
}
