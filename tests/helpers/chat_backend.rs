// ABOUTME: Scripted in-process chat backend for controller tests
// ABOUTME: Records every request and answers from a caller-supplied function
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use wellness_coach::chat::ChatBackend;
use wellness_coach::errors::AppResult;
use wellness_coach::models::{ChatRequest, ChatResponse};

type Responder = Box<dyn Fn(&ChatRequest) -> AppResult<ChatResponse> + Send + Sync>;

/// Chat backend answering from a function, optionally after a per-message delay
pub struct ScriptedChatBackend {
    responder: Responder,
    delay: Box<dyn Fn(&ChatRequest) -> Duration + Send + Sync>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest) -> AppResult<ChatResponse> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: Box::new(|_| Duration::ZERO),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Backend always answering `chat_response`
    pub fn answering(chat_response: &str) -> Self {
        let text = chat_response.to_owned();
        Self::new(move |_| {
            Ok(ChatResponse {
                chat_response: text.clone(),
                notification: None,
            })
        })
    }

    pub fn with_delay<D>(mut self, delay: D) -> Self
    where
        D: Fn(&ChatRequest) -> Duration + Send + Sync + 'static,
    {
        self.delay = Box::new(delay);
        self
    }

    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedChatBackend {
    async fn send(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.requests.lock().await.push(request.clone());
        let delay = (self.delay)(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(request)
    }
}
