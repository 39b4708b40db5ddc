// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod comms;
pub mod credentials;
pub mod journey;
pub mod place;
pub mod saved_place;
pub mod token;
pub mod visit;

pub use comms::{CommsService, DisabledMailer, Mailer, OutgoingMail, SmtpMailer};
pub use credentials::{CredentialService, ProfileUpdate};
pub use journey::{JourneyService, LonLat};
pub use place::{NewPlace, PlaceService};
pub use saved_place::SavedPlaceService;
pub use token::{TokenPair, TokenService};
pub use visit::VisitService;
