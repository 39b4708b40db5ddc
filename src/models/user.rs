// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// UUIDv4 (also used as document ID)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// "First Last", derived from the title-cased names
    pub display_name: String,
    /// Unique across users, compared exactly
    pub email: String,
    /// bcrypt hash, never leaves the storage layer
    pub password_hash: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Public view of a user, embedded in tokens and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl User {
    /// Build a new account. Names are title-cased here so every write path
    /// stores the same canonical form.
    pub fn new(first_name: &str, last_name: &str, email: &str, password_hash: String) -> Self {
        let now = now_rfc3339();
        let first_name = title_case(first_name);
        let last_name = title_case(last_name);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name(&first_name, &last_name),
            first_name,
            last_name,
            email: email.to_string(),
            password_hash,
            phone_number: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the editable profile fields.
    pub fn apply_profile(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: Option<String>,
    ) {
        self.first_name = title_case(first_name);
        self.last_name = title_case(last_name);
        self.display_name = display_name(&self.first_name, &self.last_name);
        self.email = email.to_string();
        self.phone_number = phone_number;
        self.updated_at = now_rfc3339();
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest. Runs of whitespace collapse to one space.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
