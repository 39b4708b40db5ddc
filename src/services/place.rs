// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place creation with coordinate-key dedup.

use crate::db::PlaceRepository;
use crate::error::AppError;
use crate::locks::KeyedLocks;
use crate::models::place::place_key;
use crate::models::Place;
use crate::time_utils::now_rfc3339;
use std::sync::Arc;

/// A place as submitted by a client. Coordinates are kept as the raw strings
/// because they form the dedup key.
#[derive(Debug, Clone, Default)]
pub struct NewPlace {
    pub place_type: Option<String>,
    pub name: String,
    pub latitude: String,
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

#[derive(Clone)]
pub struct PlaceService {
    places: Arc<dyn PlaceRepository>,
    key_locks: KeyedLocks,
}

impl PlaceService {
    pub fn new(places: Arc<dyn PlaceRepository>) -> Self {
        Self {
            places,
            key_locks: KeyedLocks::new(),
        }
    }

    /// Store a new place. Fails with `Conflict` when a place with the same
    /// coordinate strings exists.
    pub async fn create(&self, new_place: NewPlace) -> Result<Place, AppError> {
        let name = new_place.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("place name is required".to_string()));
        }
        let latitude = parse_coordinate(&new_place.latitude, "latitude", 90.0)?;
        let longitude = parse_coordinate(&new_place.longitude, "longitude", 180.0)?;
        let key = place_key(&new_place.latitude, &new_place.longitude);

        let _guard = self.key_locks.lock(&key).await;
        if self.places.find_place_by_key(&key).await?.is_some() {
            return Err(AppError::Conflict("place already exists".to_string()));
        }

        let place = Place {
            id: uuid::Uuid::new_v4().to_string(),
            place_type: new_place.place_type,
            name: name.to_string(),
            latitude,
            longitude,
            accuracy: new_place.accuracy,
            description: new_place.description,
            osm_id: new_place.osm_id,
            atcocode: new_place.atcocode,
            station_code: new_place.station_code,
            tiploc_code: new_place.tiploc_code,
            smscode: new_place.smscode,
            distance: new_place.distance,
            key,
            created_at: now_rfc3339(),
        };
        self.places.create_place(&place).await?;

        tracing::info!(place_id = %place.id, key = %place.key, "Place created");
        Ok(place)
    }

    pub async fn get_place(&self, place_id: &str) -> Result<Place, AppError> {
        self.places
            .get_place(place_id)
            .await?
            .ok_or_else(|| AppError::NotFound("place not found".to_string()))
    }
}

/// Parse a coordinate and check it lies within `±limit`.
fn parse_coordinate(raw: &str, field: &str, limit: f64) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| AppError::BadRequest(format!("invalid {}", field)))
}
