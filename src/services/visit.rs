// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user visit history.

use crate::db::{PlaceRepository, VisitRepository};
use crate::error::AppError;
use crate::models::LastVisitedPlace;
use std::sync::Arc;

/// Upper bound on `n` for "last n visited".
pub const MAX_RECENT_VISITS: u32 = 100;

#[derive(Clone)]
pub struct VisitService {
    places: Arc<dyn PlaceRepository>,
    visits: Arc<dyn VisitRepository>,
}

impl VisitService {
    pub fn new(places: Arc<dyn PlaceRepository>, visits: Arc<dyn VisitRepository>) -> Self {
        Self { places, visits }
    }

    /// Record that `user_id` visited `place_id` now.
    pub async fn add_last_visited(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<LastVisitedPlace, AppError> {
        if self.places.get_place(place_id).await?.is_none() {
            return Err(AppError::NotFound("place not found".to_string()));
        }

        let visit = LastVisitedPlace::new(user_id, place_id);
        self.visits.add_visit(&visit).await?;
        Ok(visit)
    }

    /// The `n` most recent visits, newest first.
    pub async fn last_n_visited(
        &self,
        user_id: &str,
        n: u32,
    ) -> Result<Vec<LastVisitedPlace>, AppError> {
        if n == 0 || n > MAX_RECENT_VISITS {
            return Err(AppError::BadRequest(format!(
                "number of places must be between 1 and {}",
                MAX_RECENT_VISITS
            )));
        }
        self.visits.recent_visits(user_id, n).await
    }
}
