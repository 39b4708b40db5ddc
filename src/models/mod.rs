// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod comms;
pub mod place;
pub mod saved_place;
pub mod token;
pub mod user;
pub mod visit;

pub use comms::{About, ContactUs};
pub use place::{Place, PlaceSummary};
pub use saved_place::{PlaceAlias, SavedPlace};
pub use token::UserTokens;
pub use user::{User, UserIdentity};
pub use visit::LastVisitedPlace;
