// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the repository traits over these collections:
//! - Users and their active token pair
//! - Places and per-user saved places
//! - Visit history
//! - Contact-us messages and the about document

use crate::db::{
    collections, CommsRepository, PlaceRepository, SavedPlaceRepository, TokenRepository,
    UserRepository, VisitRepository,
};
use crate::error::AppError;
use crate::models::{
    About, ContactUs, LastVisitedPlace, Place, PlaceAlias, SavedPlace, User, UserTokens,
};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any bearer token; skip credential discovery.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJsb2thdGUifQ."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore Emulator");

        Ok(Self { client })
    }

    async fn upsert<T>(&self, collection: &str, id: &str, object: &T) -> Result<(), AppError>
    where
        T: serde::Serialize + Sync + Send,
        for<'de> T: serde::Deserialize<'de>,
    {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn get_by_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        for<'de> T: serde::Deserialize<'de> + Send,
    {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

// ─── Users & Tokens ──────────────────────────────────────────

#[async_trait]
impl UserRepository for FirestoreDb {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        self.upsert(collections::USERS, &user.id, user).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_by_id(collections::USERS, user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .client
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        self.upsert(collections::USERS, &user.id, user).await
    }
}

#[async_trait]
impl TokenRepository for FirestoreDb {
    async fn set_tokens(&self, tokens: &UserTokens) -> Result<(), AppError> {
        self.upsert(collections::TOKENS, &tokens.user_id, tokens)
            .await
    }

    async fn get_tokens(&self, user_id: &str) -> Result<Option<UserTokens>, AppError> {
        self.get_by_id(collections::TOKENS, user_id).await
    }

    async fn delete_tokens(&self, user_id: &str) -> Result<(), AppError> {
        self.delete_by_id(collections::TOKENS, user_id).await
    }
}

// ─── Places ──────────────────────────────────────────────────

#[async_trait]
impl PlaceRepository for FirestoreDb {
    async fn create_place(&self, place: &Place) -> Result<(), AppError> {
        self.upsert(collections::PLACES, &place.id, place).await
    }

    async fn get_place(&self, place_id: &str) -> Result<Option<Place>, AppError> {
        self.get_by_id(collections::PLACES, place_id).await
    }

    async fn find_place_by_key(&self, key: &str) -> Result<Option<Place>, AppError> {
        let places: Vec<Place> = self
            .client
            .fluent()
            .select()
            .from(collections::PLACES)
            .filter(|q| q.for_all([q.field("key").eq(key)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(places.into_iter().next())
    }
}

// ─── Saved Places ────────────────────────────────────────────

impl FirestoreDb {
    async fn saved_places_where(
        &self,
        user_id: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<SavedPlace>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::SAVED_PLACES)
            .filter(|q| {
                q.for_all([
                    q.field("user_id").eq(user_id),
                    q.field(field).eq(value),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl SavedPlaceRepository for FirestoreDb {
    async fn get_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError> {
        let saved: Option<SavedPlace> = self
            .get_by_id(collections::SAVED_PLACES, saved_place_id)
            .await?;
        Ok(saved.filter(|s| s.user_id == user_id))
    }

    async fn find_saved_place_for_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<SavedPlace>, AppError> {
        Ok(self
            .saved_places_where(user_id, "place_id", place_id)
            .await?
            .into_iter()
            .next())
    }

    async fn list_saved_places(&self, user_id: &str) -> Result<Vec<SavedPlace>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::SAVED_PLACES)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Demote-then-set in one transaction, so a failure leaves the previous
    /// alias holder untouched.
    async fn put_saved_place_exclusive(&self, saved_place: &SavedPlace) -> Result<(), AppError> {
        let holders = if saved_place.place_alias.is_exclusive() {
            self.saved_places_where(
                &saved_place.user_id,
                "place_alias",
                saved_place.place_alias.as_str(),
            )
            .await?
        } else {
            Vec::new()
        };

        let mut transaction = self
            .client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let mut demoted = 0usize;
        for mut holder in holders.into_iter().filter(|h| h.id != saved_place.id) {
            holder.place_alias = PlaceAlias::None;
            holder.updated_at = saved_place.updated_at.clone();

            self.client
                .fluent()
                .update()
                .in_col(collections::SAVED_PLACES)
                .document_id(&holder.id)
                .object(&holder)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add demotion to transaction: {}", e))
                })?;
            demoted += 1;
        }

        self.client
            .fluent()
            .update()
            .in_col(collections::SAVED_PLACES)
            .document_id(&saved_place.id)
            .object(saved_place)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add saved place to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(
            user_id = %saved_place.user_id,
            saved_place_id = %saved_place.id,
            alias = saved_place.place_alias.as_str(),
            demoted,
            "Saved place written"
        );

        Ok(())
    }

    async fn delete_saved_place(
        &self,
        user_id: &str,
        saved_place_id: &str,
    ) -> Result<bool, AppError> {
        if self.get_saved_place(user_id, saved_place_id).await?.is_none() {
            return Ok(false);
        }
        self.delete_by_id(collections::SAVED_PLACES, saved_place_id)
            .await?;
        Ok(true)
    }
}

// ─── Visits ──────────────────────────────────────────────────

#[async_trait]
impl VisitRepository for FirestoreDb {
    async fn add_visit(&self, visit: &LastVisitedPlace) -> Result<(), AppError> {
        self.upsert(collections::LAST_VISITED, &visit.id, visit)
            .await
    }

    /// Needs a composite index on (user_id, created_at desc).
    async fn recent_visits(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<LastVisitedPlace>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::LAST_VISITED)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

// ─── Comms ───────────────────────────────────────────────────

#[async_trait]
impl CommsRepository for FirestoreDb {
    async fn create_contact_us(&self, contact: &ContactUs) -> Result<(), AppError> {
        self.upsert(collections::CONTACT_US, &contact.id, contact)
            .await
    }

    /// The about collection holds a single document; whichever comes first wins.
    async fn get_about(&self) -> Result<Option<About>, AppError> {
        let docs: Vec<About> = self
            .client
            .fluent()
            .select()
            .from(collections::ABOUT)
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(docs.into_iter().next())
    }
}
