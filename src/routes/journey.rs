// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public journey planning via TransportAPI.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::response::ApiResponse;
use crate::services::LonLat;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/journey/lonlat", get(journey_lonlat))
        .route("/journey/postcode", get(journey_postcode))
}

#[derive(Debug, Deserialize)]
struct LonLatQuery {
    from_lat: Option<String>,
    from_lon: Option<String>,
    to_lat: Option<String>,
    to_lon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostcodeQuery {
    from: Option<String>,
    to: Option<String>,
}

async fn journey_lonlat(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<LonLatQuery>, QueryRejection>,
) -> Result<ApiResponse<serde_json::Value>> {
    let Query(q) = query?;
    let from = LonLat::parse(q.from_lat.as_deref(), q.from_lon.as_deref())?;
    let to = LonLat::parse(q.to_lat.as_deref(), q.to_lon.as_deref())?;

    let routes = state.journey_service.journey_lonlat(from, to).await?;
    Ok(ApiResponse::ok("routes retrieved successfully", routes))
}

async fn journey_postcode(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<PostcodeQuery>, QueryRejection>,
) -> Result<ApiResponse<serde_json::Value>> {
    let Query(q) = query?;
    let routes = state
        .journey_service
        .journey_postcode(
            q.from.as_deref().unwrap_or(""),
            q.to.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(ApiResponse::ok("routes retrieved successfully", routes))
}
