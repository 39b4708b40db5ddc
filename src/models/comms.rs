// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact-us messages and the about document.

use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};

/// A message sent through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactUs {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl ContactUs {
    pub fn new(user_id: &str, user_email: &str, subject: &str, message: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            created_at: now_rfc3339(),
        }
    }
}

/// Free-form about document, returned as stored.
pub type About = serde_json::Value;
