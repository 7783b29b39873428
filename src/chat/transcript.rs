// ABOUTME: Append-only in-memory chat transcript shared by concurrent sends
// ABOUTME: Appends user message plus placeholder atomically and resolves placeholders by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::constants::chat::PENDING_PLACEHOLDER;
use crate::models::ChatMessage;

/// Handle to the two messages one exchange added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingExchange {
    /// Id of the user's message
    pub user_message_id: Uuid,
    /// Id of the placeholder the answer will replace
    pub placeholder_id: Uuid,
}

/// Ordered chat transcript
///
/// Every send owns its placeholder by id, so concurrent sends never replace each
/// other's placeholder even when their answers arrive out of order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl Transcript {
    /// Empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the user's message and a pending placeholder under one lock
    pub async fn begin_exchange(&self, text: &str) -> PendingExchange {
        let user = ChatMessage::user(text);
        let placeholder = ChatMessage::pending(PENDING_PLACEHOLDER);
        let exchange = PendingExchange {
            user_message_id: user.id,
            placeholder_id: placeholder.id,
        };

        let mut messages = self.messages.write().await;
        messages.push(user);
        messages.push(placeholder);
        exchange
    }

    /// Replace a placeholder with the final model message, keeping its position
    ///
    /// Returns the stored message, or `None` if the placeholder no longer exists.
    pub async fn resolve(&self, placeholder_id: Uuid, text: String) -> Option<ChatMessage> {
        let mut messages = self.messages.write().await;
        let slot = messages.iter_mut().find(|m| m.id == placeholder_id)?;
        let mut resolved = ChatMessage::model(text);
        resolved.id = placeholder_id;
        *slot = resolved.clone();
        Some(resolved)
    }

    /// Ordered copy of every message
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Number of messages
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether the transcript is empty
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}
