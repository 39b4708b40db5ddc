// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde::{Deserialize, Serialize};

/// The active token pair for a user. Stored with document ID = `user_id`,
/// so writing a new pair replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTokens {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub created_at: String,
}
