// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access/refresh token issuance and validation.
//!
//! Both tokens are HS256 JWTs carrying a [`UserIdentity`] snapshot. They are
//! signed with different secrets, so an access token never validates as a
//! refresh token or the other way round. The latest pair per user is
//! persisted; only refresh consults that record, and refresh re-reads the
//! user so the new pair carries the current profile.

use crate::config::Config;
use crate::db::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::models::{UserIdentity, UserTokens};
use crate::time_utils::now_rfc3339;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity snapshot at issuance
    pub user: UserIdentity,
    /// Unique per token, so two pairs issued in the same second differ
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SigningKeys {
    fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    tokens: Arc<dyn TokenRepository>,
    users: Arc<dyn UserRepository>,
    access: SigningKeys,
    refresh: SigningKeys,
}

impl TokenService {
    pub fn new(
        config: &Config,
        tokens: Arc<dyn TokenRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            tokens,
            users,
            access: SigningKeys::new(&config.access_token_secret, config.access_token_ttl_secs),
            refresh: SigningKeys::new(
                &config.refresh_token_secret,
                config.refresh_token_ttl_secs,
            ),
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Sign a token as if issued at `issued_at` (Unix seconds).
    pub(crate) fn sign(
        &self,
        user: &UserIdentity,
        kind: TokenKind,
        issued_at: i64,
    ) -> Result<String, AppError> {
        let keys = self.keys(kind);
        let claims = Claims {
            user: user.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: issued_at + keys.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to sign {:?} token: {}", kind, e))
        })
    }

    /// Check signature and expiry. No leeway: a token is rejected the second
    /// after `exp`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, ?kind, "Rejected token");
                AppError::InvalidToken
            })
    }

    /// Identity carried by a valid access token. No storage lookup.
    pub fn user_from_access_token(&self, token: &str) -> Result<UserIdentity, AppError> {
        self.verify(token, TokenKind::Access).map(|claims| claims.user)
    }

    /// Sign a new pair for `user` and make it the user's active pair.
    pub async fn generate_token_pair(&self, user: &UserIdentity) -> Result<TokenPair, AppError> {
        let now = Utc::now().timestamp();
        let pair = TokenPair {
            access_token: self.sign(user, TokenKind::Access, now)?,
            refresh_token: self.sign(user, TokenKind::Refresh, now)?,
        };

        self.tokens
            .set_tokens(&UserTokens {
                user_id: user.id.clone(),
                access_token: pair.access_token.clone(),
                refresh_token: pair.refresh_token.clone(),
                created_at: now_rfc3339(),
            })
            .await?;

        tracing::debug!(user_id = %user.id, "Issued token pair");
        Ok(pair)
    }

    /// Exchange the active refresh token for a new pair.
    ///
    /// A refresh token that is validly signed but no longer the stored one
    /// (after logout or a newer login) is rejected. The new pair is signed
    /// for the stored user, not the snapshot inside the old token.
    pub async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<(UserIdentity, TokenPair), AppError> {
        let claims = self.verify(refresh_token, TokenKind::Refresh)?;

        let stored = self.tokens.get_tokens(&claims.user.id).await?;
        let is_current = stored.is_some_and(|t| {
            bool::from(t.refresh_token.as_bytes().ct_eq(refresh_token.as_bytes()))
        });
        if !is_current {
            tracing::info!(user_id = %claims.user.id, "Refresh token is not the active one");
            return Err(AppError::InvalidToken);
        }

        let Some(user) = self.users.get_user(&claims.user.id).await? else {
            tracing::info!(user_id = %claims.user.id, "Refresh for unknown user");
            return Err(AppError::InvalidToken);
        };

        let identity = user.identity();
        let pair = self.generate_token_pair(&identity).await?;
        Ok((identity, pair))
    }

    /// Forget the user's active pair. Access tokens already handed out stay
    /// valid until they expire.
    pub async fn logout(&self, user_id: &str) -> Result<(), AppError> {
        self.tokens.delete_tokens(user_id).await?;
        tracing::info!(user_id, "User logged out");
        Ok(())
    }
}
