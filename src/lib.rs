// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lokate: location backend
//!
//! This crate provides the REST API for account sessions, places, saved
//! places with HOME/WORK aliases, visit history, contact messages and a
//! proxy to the TransportAPI journey planner.

pub mod config;
pub mod db;
pub mod error;
pub mod locks;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use error::AppError;
use services::{
    CommsService, CredentialService, JourneyService, Mailer, PlaceService, SavedPlaceService,
    TokenService, VisitService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub token_service: TokenService,
    pub credential_service: CredentialService,
    pub place_service: PlaceService,
    pub saved_place_service: SavedPlaceService,
    pub visit_service: VisitService,
    pub journey_service: JourneyService,
    pub comms_service: CommsService,
}

impl AppState {
    /// Wire every service to one storage backend.
    pub fn new<D: Database>(
        config: Config,
        db: Arc<D>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            token_service: TokenService::new(&config, db.clone(), db.clone()),
            credential_service: CredentialService::new(db.clone(), config.bcrypt_cost)?,
            place_service: PlaceService::new(db.clone()),
            saved_place_service: SavedPlaceService::new(db.clone(), db.clone()),
            visit_service: VisitService::new(db.clone(), db.clone()),
            journey_service: JourneyService::new(&config.tapi)?,
            comms_service: CommsService::new(db, mailer),
            config,
        })
    }
}
