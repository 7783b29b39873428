// ABOUTME: Chat session identity passed explicitly to the chat controller
// ABOUTME: Holds the user id and a session id generated once per controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::fmt;

use uuid::Uuid;

use crate::constants::chat::SESSION_ID_PREFIX;

/// Identity of one chat session
///
/// Created once when a controller is built and kept for its whole lifetime, so every
/// exchange of that controller shares the backend-side conversation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
    session_id: String,
}

impl SessionContext {
    /// New session for `user_id` with a fresh `session_<uuid>` id
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: format!("{SESSION_ID_PREFIX}{}", Uuid::new_v4()),
        }
    }

    /// Resume a known session
    pub fn with_session_id(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// User identifier
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Session identifier
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.session_id)
    }
}
