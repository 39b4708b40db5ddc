// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TransportAPI client for place search and public journeys.
//!
//! Journey payloads are passed through untouched. Failures are reported as
//! `Upstream` errors and are not retried.

use crate::config::TapiConfig;
use crate::error::AppError;
use crate::models::PlaceSummary;
use serde::Deserialize;
use std::time::Duration;

/// A validated point, formatted into TransportAPI `lonlat:` segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Parse string coordinates. Either missing, unparseable or out of range
    /// is a `BadRequest`.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, AppError> {
        let coordinate = |raw: Option<&str>, limit: f64| {
            raw.map(str::trim)
                .and_then(|r| r.parse::<f64>().ok())
                .filter(|v| v.is_finite() && v.abs() <= limit)
        };

        match (coordinate(lat, 90.0), coordinate(lon, 180.0)) {
            (Some(lat), Some(lon)) => Ok(Self { lon, lat }),
            _ => Err(AppError::BadRequest("invalid coordinates".to_string())),
        }
    }

    fn segment(&self) -> String {
        format!("lonlat:{},{}", self.lon, self.lat)
    }
}

/// Normalize a UK postcode: drop whitespace, upper-case, then require 5-7
/// alphanumerics ending in digit-letter-letter (the inward code).
pub fn normalize_postcode(raw: &str) -> Result<String, AppError> {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    let bytes = code.as_bytes();
    let n = bytes.len();
    let valid = (5..=7).contains(&n)
        && bytes.iter().all(u8::is_ascii_alphanumeric)
        && bytes[n - 3].is_ascii_digit()
        && bytes[n - 2].is_ascii_alphabetic()
        && bytes[n - 1].is_ascii_alphabetic();

    if !valid {
        return Err(AppError::BadRequest("invalid postcode".to_string()));
    }
    Ok(code)
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    member: Vec<PlaceSummary>,
}

/// TransportAPI client.
#[derive(Clone)]
pub struct JourneyService {
    http: reqwest::Client,
    config: TapiConfig,
}

impl JourneyService {
    pub fn new(config: &TapiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Free-text place search.
    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceSummary>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("invalid search query".to_string()));
        }

        let response = self
            .http
            .get(&self.config.places_url)
            .query(&[
                ("query", query),
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;

        let places: PlacesResponse = self.check_response_json(response).await?;
        Ok(places.member)
    }

    /// Public-transport routes between two points.
    pub async fn journey_lonlat(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> Result<serde_json::Value, AppError> {
        self.journey(&from.segment(), &to.segment()).await
    }

    /// Public-transport routes between two UK postcodes.
    pub async fn journey_postcode(
        &self,
        from: &str,
        to: &str,
    ) -> Result<serde_json::Value, AppError> {
        let from = normalize_postcode(from)?;
        let to = normalize_postcode(to)?;
        self.journey(
            &format!("postcode:{}", urlencoding::encode(&from)),
            &format!("postcode:{}", urlencoding::encode(&to)),
        )
        .await
    }

    async fn journey(&self, from: &str, to: &str) -> Result<serde_json::Value, AppError> {
        let url = format!(
            "{}/from/{}/to/{}.json",
            self.config.public_journey_url.trim_end_matches('/'),
            from,
            to
        );
        tracing::debug!(url = %url, "Requesting journey");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("service", self.config.service_name.as_str()),
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("TransportAPI rate limit hit (429)");
            }

            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e.without_url())))
    }
}
