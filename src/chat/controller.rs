// ABOUTME: Chat controller owning the transcript and the session context
// ABOUTME: Sends messages with optional health data and resolves each exchange's placeholder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use super::{extract_display_text, ChatBackend, SessionContext, Transcript};
use crate::constants::chat::ERROR_PREFIX;
use crate::errors::{AppError, AppResult};
use crate::models::{ChatMessage, ChatRequest, HealthDataPayload, NotificationPayload};
use crate::snapshot::SnapshotBuilder;

/// Whether a message carries health data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthAttachment {
    /// Send the text only
    #[default]
    None,
    /// Attach the snapshot for a date
    ForDate(NaiveDate),
}

/// How an exchange ended
#[derive(Debug)]
pub enum ChatOutcome {
    /// The backend answered
    Delivered,
    /// The backend could not be reached or answered with an error
    Failed(AppError),
}

/// Result of one exchange
#[derive(Debug)]
pub struct ChatReply {
    /// Model message that replaced the placeholder
    pub message: ChatMessage,
    /// Notification the backend attached, if any
    pub notification: Option<NotificationPayload>,
    /// Delivery outcome
    pub outcome: ChatOutcome,
}

impl ChatReply {
    /// Whether the backend answered
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self.outcome, ChatOutcome::Delivered)
    }
}

/// Owns one chat session and its transcript
pub struct ChatController {
    context: SessionContext,
    backend: Arc<dyn ChatBackend>,
    snapshots: Option<SnapshotBuilder>,
    transcript: Transcript,
}

impl ChatController {
    /// Controller for `context` talking to `backend`
    #[must_use]
    pub fn new(context: SessionContext, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            context,
            backend,
            snapshots: None,
            transcript: Transcript::new(),
        }
    }

    /// Enable health attachments built by `builder`
    #[must_use]
    pub fn with_snapshots(mut self, builder: SnapshotBuilder) -> Self {
        self.snapshots = Some(builder);
        self
    }

    /// Session identity of this controller
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Ordered copy of the transcript
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.messages().await
    }

    /// Send one message and wait for the answer
    ///
    /// The user's message and a `"..."` placeholder are appended before the network
    /// call; the placeholder is then replaced by the extracted answer or by an inline
    /// error text. Backend failures are reported through [`ChatOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank message; nothing is appended in that case.
    #[instrument(skip(self, text), fields(chat.session_id = %self.context.session_id()))]
    pub async fn send_message(&self, text: &str, health: HealthAttachment) -> AppResult<ChatReply> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_input("chat message is empty"));
        }

        let exchange = self.transcript.begin_exchange(text).await;

        let request = ChatRequest {
            user_id: self.context.user_id().to_owned(),
            session_id: self.context.session_id().to_owned(),
            message: text.to_owned(),
            health_data: self.health_payload(health).await,
        };

        let (display_text, notification, outcome) = match self.backend.send(&request).await {
            Ok(response) => (
                extract_display_text(&response.chat_response),
                response.notification,
                ChatOutcome::Delivered,
            ),
            Err(error) => {
                warn!(%error, "Chat message failed");
                (
                    format!("{ERROR_PREFIX}{}", error.message),
                    None,
                    ChatOutcome::Failed(error),
                )
            }
        };

        let message = match self
            .transcript
            .resolve(exchange.placeholder_id, display_text.clone())
            .await
        {
            Some(message) => message,
            None => ChatMessage::model(display_text),
        };

        info!(delivered = matches!(outcome, ChatOutcome::Delivered), "Chat exchange finished");
        Ok(ChatReply {
            message,
            notification,
            outcome,
        })
    }

    /// Build the attachment; a failed snapshot sends the message without health data
    async fn health_payload(&self, health: HealthAttachment) -> Option<HealthDataPayload> {
        let HealthAttachment::ForDate(date) = health else {
            return None;
        };
        let Some(builder) = &self.snapshots else {
            warn!(%date, "Health data requested but no snapshot source is configured");
            return None;
        };

        match builder.build_snapshot(date).await {
            Ok(snapshot) => Some(snapshot.to_payload()),
            Err(error) => {
                warn!(%date, %error, "Sending chat message without health data");
                None
            }
        }
    }
}
