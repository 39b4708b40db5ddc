// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved places and their HOME/WORK aliases.

use crate::error::AppError;
use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// Alias tag on a saved place. A user holds at most one HOME and one WORK.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaceAlias {
    Home,
    Work,
    #[default]
    None,
}

impl PlaceAlias {
    /// Case-insensitive parse. Missing or blank input means `None`.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            return Ok(PlaceAlias::None);
        }
        match raw.to_ascii_uppercase().as_str() {
            "HOME" => Ok(PlaceAlias::Home),
            "WORK" => Ok(PlaceAlias::Work),
            "NONE" => Ok(PlaceAlias::None),
            _ => Err(AppError::BadRequest(format!(
                "invalid place alias '{}', expected HOME, WORK or NONE",
                raw
            ))),
        }
    }

    /// HOME and WORK may be held by only one saved place per user.
    pub fn is_exclusive(self) -> bool {
        !matches!(self, PlaceAlias::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceAlias::Home => "HOME",
            PlaceAlias::Work => "WORK",
            PlaceAlias::None => "NONE",
        }
    }
}

/// A user's bookmark of a place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlace {
    pub id: String,
    pub user_id: String,
    pub place_id: String,
    pub name: String,
    pub place_alias: PlaceAlias,
    pub created_at: String,
    pub updated_at: String,
}

impl SavedPlace {
    pub fn new(user_id: &str, place_id: &str, name: &str, place_alias: PlaceAlias) -> Self {
        let now = now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            place_id: place_id.to_string(),
            name: name.to_string(),
            place_alias,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
