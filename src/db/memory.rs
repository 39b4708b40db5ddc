// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process storage backed by concurrent maps.
//!
//! Used by the test suite and by `DATABASE_BACKEND=memory` for local runs
//! without a GCP project. Data is lost on restart.

use crate::db::{
    CommsRepository, PlaceRepository, SavedPlaceRepository, TokenRepository, UserRepository,
    VisitRepository,
};
use crate::error::AppError;
use crate::models::{
    About, ContactUs, LastVisitedPlace, Place, PlaceAlias, SavedPlace, User, UserTokens,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Mutex, RwLock};

#[derive(Default)]
pub struct MemoryDb {
    users: DashMap<String, User>,
    tokens: DashMap<String, UserTokens>,
    places: DashMap<String, Place>,
    saved_places: DashMap<String, SavedPlace>,
    visits: DashMap<String, LastVisitedPlace>,
    contact_us: DashMap<String, ContactUs>,
    about: RwLock<Option<About>>,
    /// Serializes multi-document saved-place writes.
    saved_place_writes: Mutex<()>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the about document.
    pub fn set_about(&self, about: About) {
        if let Ok(mut slot) = self.about.write() {
            *slot = Some(about);
        }
    }

    /// All stored contact-us messages, for inspection in tests.
    pub fn contact_messages(&self) -> Vec<ContactUs> {
        self.contact_us.iter().map(|e| e.value().clone()).collect()
    }

    /// Stored accounts whose email matches exactly.
    pub fn users_with_email(&self, email: &str) -> Vec<User> {
        self.users
            .iter()
            .filter(|e| e.value().email == email)
            .map(|e| e.value().clone())
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(user_id).map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MemoryDb {
    async fn set_tokens(&self, tokens: &UserTokens) -> Result<(), AppError> {
        self.tokens.insert(tokens.user_id.clone(), tokens.clone());
        Ok(())
    }

    async fn get_tokens(&self, user_id: &str) -> Result<Option<UserTokens>, AppError> {
        Ok(self.tokens.get(user_id).map(|t| t.clone()))
    }

    async fn delete_tokens(&self, user_id: &str) -> Result<(), AppError> {
        self.tokens.remove(user_id);
        Ok(())
    }
}

#[async_trait]
impl PlaceRepository for MemoryDb {
    async fn create_place(&self, place: &Place) -> Result<(), AppError> {
        self.places.insert(place.id.clone(), place.clone());
        Ok(())
    }

    async fn get_place(&self, place_id: &str) -> Result<Option<Place>, AppError> {
        Ok(self.places.get(place_id).map(|p| p.clone()))
    }

    async fn find_place_by_key(&self, key: &str) -> Result<Option<Place>, AppError> {
        Ok(self
            .places
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value().clone()))
    }
}

#[async_trait]
impl SavedPlaceRepository for MemoryDb {
    async fn get_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError> {
        Ok(self
            .saved_places
            .get(saved_place_id)
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone()))
    }

    async fn find_saved_place_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError> {
        Ok(self
            .saved_places
            .iter()
            .find(|s| s.user_id == user_id && s.place_id == place_id)
            .map(|s| s.value().clone()))
    }

    async fn list_saved_places(&self, user_id: &str) -> Result<Vec<SavedPlace>, AppError> {
        Ok(self
            .saved_places
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.value().clone())
            .collect())
    }

    async fn put_saved_place_exclusive(&self, saved_place: &SavedPlace) -> Result<(), AppError> {
        let _write = self
            .saved_place_writes
            .lock()
            .map_err(|_| AppError::Database("saved place lock poisoned".to_string()))?;

        if saved_place.place_alias.is_exclusive() {
            for mut holder in self.saved_places.iter_mut() {
                if holder.user_id == saved_place.user_id
                    && holder.id != saved_place.id
                    && holder.place_alias == saved_place.place_alias
                {
                    holder.place_alias = PlaceAlias::None;
                    holder.updated_at = saved_place.updated_at.clone();
                }
            }
        }

        self.saved_places
            .insert(saved_place.id.clone(), saved_place.clone());
        Ok(())
    }

    async fn delete_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<bool, AppError> {
        Ok(self
            .saved_places
            .remove_if(saved_place_id, |_, s| s.user_id == user_id)
            .is_some())
    }
}

#[async_trait]
impl VisitRepository for MemoryDb {
    async fn add_visit(&self, visit: &LastVisitedPlace) -> Result<(), AppError> {
        self.visits.insert(visit.id.clone(), visit.clone());
        Ok(())
    }

    async fn recent_visits(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<LastVisitedPlace>, AppError> {
        let mut visits: Vec<LastVisitedPlace> = self
            .visits
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.value().clone())
            .collect();
        visits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        visits.truncate(limit as usize);
        Ok(visits)
    }
}

#[async_trait]
impl CommsRepository for MemoryDb {
    async fn create_contact_us(&self, contact: &ContactUs) -> Result<(), AppError> {
        self.contact_us.insert(contact.id.clone(), contact.clone());
        Ok(())
    }

    async fn get_about(&self) -> Result<Option<About>, AppError> {
        self.about
            .read()
            .map(|slot| slot.clone())
            .map_err(|_| AppError::Database("about lock poisoned".to_string()))
    }
}
