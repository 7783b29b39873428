// ABOUTME: Chat transcript messages and chat backend wire types
// ABOUTME: ChatMessage, Sender, ChatRequest, ChatResponse and NotificationPayload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HealthDataPayload;

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sender {
    /// The person using the app
    User,
    /// The AI coach
    Model,
}

/// A single message of the in-memory chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Stable identity used to replace a pending placeholder in place
    pub id: Uuid,
    /// Author of the message
    pub sender: Sender,
    /// Display text
    pub text: String,
    /// When the message was added to the transcript
    pub timestamp: DateTime<Utc>,
    /// True while the message is a placeholder awaiting the backend
    pub pending: bool,
}

impl ChatMessage {
    /// Create a message authored by the user
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, false)
    }

    /// Create a message authored by the model
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Sender::Model, text, false)
    }

    /// Create a model placeholder shown while the answer is pending
    #[must_use]
    pub fn pending(text: impl Into<String>) -> Self {
        Self::new(Sender::Model, text, true)
    }

    fn new(sender: Sender, text: impl Into<String>, pending: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            pending,
        }
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// User identifier
    pub user_id: String,
    /// Chat session identifier, stable for the life of the controller
    pub session_id: String,
    /// Message typed by the user
    pub message: String,
    /// Health snapshot bundled with the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_data: Option<HealthDataPayload>,
}

/// Push notification the backend may attach to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
}

/// Body returned by `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Free-form answer; may embed a JSON object with `response_for_user`
    pub chat_response: String,
    /// Optional notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationPayload>,
}
