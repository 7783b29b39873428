// ABOUTME: Chat backend client trait and its reqwest-based HTTP implementation
// ABOUTME: POSTs ChatRequest JSON to {base}/chat and decodes the ChatResponse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::AppConfig;
use crate::constants::{chat::CHAT_PATH, env_config, service_names::CHAT_BACKEND};
use crate::errors::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::utils::http_client::create_client_with_timeout;

/// Remote conversational backend
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and wait for the answer
    async fn send(&self, request: &ChatRequest) -> AppResult<ChatResponse>;
}

/// Chat backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    endpoint: Url,
}

impl HttpChatBackend {
    /// Backend at `base_url` using `client`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the `chat` endpoint cannot be derived from `base_url`.
    pub fn new(base_url: &Url, client: Client) -> AppResult<Self> {
        Ok(Self {
            client,
            endpoint: chat_endpoint(base_url)?,
        })
    }

    /// Backend configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the configured base URL is unusable.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            &config.chat.base_url,
            create_client_with_timeout(config.http_timeout.as_secs()),
        )
    }

    /// Full URL requests are posted to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `{base}/chat`, keeping any path prefix of the base URL
fn chat_endpoint(base_url: &Url) -> AppResult<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(CHAT_PATH)
        .map_err(|e| AppError::config_invalid(env_config::CHAT_BASE_URL, e))
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    #[instrument(skip(self, request), fields(chat.session_id = %request.session_id, chat.with_health = request.health_data.is_some()))]
    async fn send(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(CHAT_BACKEND, format!("request failed: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(CHAT_BACKEND, format!("failed to read response: {e}"))
                .with_source(e)
        })?;

        if !status.is_success() {
            return Err(AppError::external_service(
                CHAT_BACKEND,
                format!("HTTP {status}: {body}"),
            ));
        }

        debug!(%status, bytes = body.len(), "Chat backend answered");
        serde_json::from_str(&body).map_err(|e| {
            AppError::external_service(CHAT_BACKEND, format!("invalid response body: {e}"))
                .with_source(e)
        })
    }
}
