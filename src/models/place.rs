// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place documents and TransportAPI place summaries.

use serde::{Deserialize, Serialize};

/// A stored geographic place. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub osm_id: Option<String>,
    #[serde(default)]
    pub atcocode: Option<String>,
    #[serde(default)]
    pub station_code: Option<String>,
    #[serde(default)]
    pub tiploc_code: Option<String>,
    #[serde(default)]
    pub smscode: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    /// Submitted latitude string followed by the submitted longitude string
    pub key: String,
    pub created_at: String,
}

/// Dedup key for a place. Plain concatenation, so `51.5` and `51.50` differ.
pub fn place_key(latitude: &str, longitude: &str) -> String {
    format!("{}{}", latitude, longitude)
}

/// One `member` of a TransportAPI place search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSummary {
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub osm_id: Option<String>,
    #[serde(default)]
    pub atcocode: Option<String>,
    #[serde(default)]
    pub station_code: Option<String>,
    #[serde(default)]
    pub tiploc_code: Option<String>,
    #[serde(default)]
    pub smscode: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}
