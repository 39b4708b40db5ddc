// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account creation, password verification and profile edits.

use crate::db::UserRepository;
use crate::error::AppError;
use crate::locks::KeyedLocks;
use crate::models::User;
use std::sync::Arc;

/// Verified against when the email is unknown, so a login attempt costs one
/// bcrypt comparison whether or not the account exists.
const DUMMY_PASSWORD: &str = "lokate-no-such-user";

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    dummy_hash: Arc<str>,
    /// Serializes check-then-insert per email address
    email_locks: KeyedLocks,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Result<Self, AppError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, bcrypt_cost)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;

        Ok(Self {
            users,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
            email_locks: KeyedLocks::new(),
        })
    }

    /// Create an account. Fails with `Conflict` when the email is taken.
    pub async fn signup(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = self.hash_password(password).await?;

        let _guard = self.email_locks.lock(email).await;
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict(AppError::EMAIL_TAKEN.to_string()));
        }

        let user = User::new(first_name, last_name, email, password_hash);
        self.users.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Check an email/password pair. Unknown email and wrong password fail
    /// identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.users.find_user_by_email(email).await? else {
            self.verify_password(password, self.dummy_hash.to_string())
                .await?;
            return Err(AppError::InvalidCredentials);
        };

        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    /// Replace the user's profile fields. Tokens already issued keep the old
    /// identity until the next login.
    pub async fn edit_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        let _guard = self.email_locks.lock(&update.email).await;

        let mut user = self.get_user(user_id).await?;

        if user.email != update.email {
            if let Some(other) = self.users.find_user_by_email(&update.email).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict(AppError::EMAIL_TAKEN.to_string()));
                }
            }
        }

        user.apply_profile(
            &update.first_name,
            &update.last_name,
            &update.email,
            update.phone_number,
        );
        self.users.update_user(&user).await?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(anyhow::Error::from)?
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool, AppError> {
        let password = password.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(anyhow::Error::from)?
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check failed: {}", e)))
    }
}
