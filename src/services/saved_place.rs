// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved places and the HOME/WORK alias rule.
//!
//! A user has at most one saved place aliased HOME and at most one aliased
//! WORK. Assigning an exclusive alias demotes the previous holder to NONE.
//! Storage performs demote-and-write atomically; this service additionally
//! serializes mutations per user so concurrent requests from one client
//! cannot interleave their read-check-write steps.

use crate::db::{PlaceRepository, SavedPlaceRepository};
use crate::error::AppError;
use crate::locks::KeyedLocks;
use crate::models::{PlaceAlias, SavedPlace};
use crate::time_utils::now_rfc3339;
use std::sync::Arc;

#[derive(Clone)]
pub struct SavedPlaceService {
    places: Arc<dyn PlaceRepository>,
    saved_places: Arc<dyn SavedPlaceRepository>,
    user_locks: KeyedLocks,
}

impl SavedPlaceService {
    pub fn new(
        places: Arc<dyn PlaceRepository>,
        saved_places: Arc<dyn SavedPlaceRepository>,
    ) -> Self {
        Self {
            places,
            saved_places,
            user_locks: KeyedLocks::new(),
        }
    }

    /// Bookmark `place_id` for `user_id`. An empty `name` falls back to the
    /// place's own name.
    pub async fn add_saved_place(
        &self,
        user_id: &str,
        place_id: &str,
        alias: Option<&str>,
        name: &str,
    ) -> Result<SavedPlace, AppError> {
        require_id(user_id, "user")?;
        require_id(place_id, "place")?;

        let _guard = self.user_locks.lock(user_id).await;

        let place = self
            .places
            .get_place(place_id)
            .await?
            .ok_or_else(|| AppError::NotFound("cannot find place".to_string()))?;

        if self
            .saved_places
            .find_saved_place_for_place(user_id, place_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "sorry, you have saved this place already".to_string(),
            ));
        }

        let alias = PlaceAlias::parse(alias)?;
        let name = match name.trim() {
            "" => place.name.as_str(),
            given => given,
        };

        let saved = SavedPlace::new(user_id, place_id, name, alias);
        self.saved_places.put_saved_place_exclusive(&saved).await?;

        tracing::info!(
            user_id,
            saved_place_id = %saved.id,
            alias = alias.as_str(),
            "Place saved"
        );
        Ok(saved)
    }

    /// Rename and/or re-alias a saved place. A blank `name` keeps the
    /// current one; a missing or blank alias means NONE.
    pub async fn edit_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
        name: Option<&str>,
        alias: Option<&str>,
    ) -> Result<SavedPlace, AppError> {
        require_id(saved_place_id, "saved place")?;
        let alias = PlaceAlias::parse(alias)?;

        let _guard = self.user_locks.lock(user_id).await;

        let mut saved = self.get_saved_place(user_id, saved_place_id).await?;
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            saved.name = name.to_string();
        }
        saved.place_alias = alias;
        saved.updated_at = now_rfc3339();

        self.saved_places.put_saved_place_exclusive(&saved).await?;

        tracing::info!(
            user_id,
            saved_place_id,
            alias = alias.as_str(),
            "Saved place edited"
        );
        Ok(saved)
    }

    pub async fn get_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<SavedPlace, AppError> {
        self.saved_places
            .get_saved_place(user_id, saved_place_id)
            .await?
            .ok_or_else(|| AppError::NotFound("saved place not found".to_string()))
    }

    pub async fn get_saved_places(&self, user_id: &str) -> Result<Vec<SavedPlace>, AppError> {
        self.saved_places.list_saved_places(user_id).await
    }

    pub async fn delete_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<(), AppError> {
        let _guard = self.user_locks.lock(user_id).await;

        if !self
            .saved_places
            .delete_saved_place(user_id, saved_place_id)
            .await?
        {
            return Err(AppError::NotFound("saved place not found".to_string()));
        }
        tracing::info!(user_id, saved_place_id, "Saved place deleted");
        Ok(())
    }
}

fn require_id(id: &str, what: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest(format!("invalid {} id", what)));
    }
    Ok(())
}
