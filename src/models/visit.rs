// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// Append-only record of a user visiting a place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastVisitedPlace {
    pub id: String,
    pub user_id: String,
    pub place_id: String,
    /// Fixed-width RFC3339, so string order is time order
    pub created_at: String,
}

impl LastVisitedPlace {
    pub fn new(user_id: &str, place_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            place_id: place_id.to_string(),
            created_at: now_rfc3339(),
        }
    }
}
