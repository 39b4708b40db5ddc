// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer.
//!
//! Each collection is reached through a capability trait so services can be
//! wired to Firestore in production and to [`MemoryDb`] in tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{About, ContactUs, LastVisitedPlace, Place, SavedPlace, User, UserTokens};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Active token pair per user (keyed by user_id)
    pub const TOKENS: &str = "tokens";
    pub const PLACES: &str = "places";
    pub const SAVED_PLACES: &str = "saved_places";
    pub const LAST_VISITED: &str = "last_visited";
    pub const CONTACT_US: &str = "contact_us";
    pub const ABOUT: &str = "about";
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), AppError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;
    /// Exact, case-sensitive match.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update_user(&self, user: &User) -> Result<(), AppError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Replace the user's active pair.
    async fn set_tokens(&self, tokens: &UserTokens) -> Result<(), AppError>;
    async fn get_tokens(&self, user_id: &str) -> Result<Option<UserTokens>, AppError>;
    /// Deleting an absent record is not an error.
    async fn delete_tokens(&self, user_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn create_place(&self, place: &Place) -> Result<(), AppError>;
    async fn get_place(&self, place_id: &str) -> Result<Option<Place>, AppError>;
    async fn find_place_by_key(&self, key: &str) -> Result<Option<Place>, AppError>;
}

#[async_trait]
pub trait SavedPlaceRepository: Send + Sync {
    /// `None` when absent or owned by another user.
    async fn get_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError>;

    async fn find_saved_place_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError>;

    async fn list_saved_places(&self, user_id: &str) -> Result<Vec<SavedPlace>, AppError>;

    /// Write `saved_place`. If its alias is HOME or WORK, every other saved
    /// place of the same user holding that alias is demoted to NONE in the
    /// same atomic step.
    async fn put_saved_place_exclusive(&self, saved_place: &SavedPlace) -> Result<(), AppError>;

    /// Returns `false` when nothing owned by `user_id` matched.
    async fn delete_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<bool, AppError>;
}

#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn add_visit(&self, visit: &LastVisitedPlace) -> Result<(), AppError>;
    /// Newest first, at most `limit` entries.
    async fn recent_visits(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<LastVisitedPlace>, AppError>;
}

#[async_trait]
pub trait CommsRepository: Send + Sync {
    async fn create_contact_us(&self, contact: &ContactUs) -> Result<(), AppError>;
    async fn get_about(&self) -> Result<Option<About>, AppError>;
}

/// Everything a backend must provide to run the application.
pub trait Database:
    UserRepository
    + TokenRepository
    + PlaceRepository
    + SavedPlaceRepository
    + VisitRepository
    + CommsRepository
    + 'static
{
}

impl<T> Database for T where
    T: UserRepository
        + TokenRepository
        + PlaceRepository
        + SavedPlaceRepository
        + VisitRepository
        + CommsRepository
        + 'static
{
}
