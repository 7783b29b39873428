// ABOUTME: Environment-based configuration for the chat backend, document store and sync job
// ABOUTME: Parses WELLNESS_* variables with defaults, validation and a loggable summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Environment-based configuration management
//!
//! There are no configuration files: every setting comes from a `WELLNESS_*`
//! environment variable or falls back to a default. Empty values count as unset.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::constants::env_config;
use crate::constants::sync::{DEFAULT_SYNC_INTERVAL_MINUTES, MIN_SYNC_INTERVAL_SECS};
use crate::errors::{AppError, AppResult};

/// Chat backend settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBackendConfig {
    /// Base URL; requests go to `{base_url}/chat`
    pub base_url: Url,
}

/// Periodic sync settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Period between sync ticks, never below the platform floor
    pub interval: Duration,
}

impl SyncConfig {
    /// Build from a minute count, raising values below the 15 minute floor
    #[must_use]
    pub fn from_minutes(minutes: u64) -> Self {
        let requested = Duration::from_secs(minutes.saturating_mul(60));
        let floor = Duration::from_secs(MIN_SYNC_INTERVAL_SECS);
        if requested < floor {
            warn!(
                requested_minutes = minutes,
                floor_minutes = MIN_SYNC_INTERVAL_SECS / 60,
                "Sync interval below platform minimum, raising to the minimum"
            );
            return Self { interval: floor };
        }
        Self {
            interval: requested,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_SYNC_INTERVAL_MINUTES)
    }
}

/// Firestore REST settings
#[derive(Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    /// Google Cloud project id; required to upload
    pub project_id: Option<String>,
    /// Database id
    pub database: String,
    /// REST API root
    pub base_url: Url,
    /// Optional OAuth bearer token
    pub token: Option<String>,
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl FirestoreConfig {
    /// Project id, or a `ConfigMissing` error naming the variable
    pub fn require_project_id(&self) -> AppResult<&str> {
        self.project_id
            .as_deref()
            .ok_or_else(|| AppError::config_missing(env_config::FIRESTORE_PROJECT_ID))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Placeholder user id used for every request
    pub user_id: String,
    /// Chat backend settings
    pub chat: ChatBackendConfig,
    /// Document store settings
    pub firestore: FirestoreConfig,
    /// Sync job settings
    pub sync: SyncConfig,
    /// JSON dataset for the synthetic health source
    pub health_fixture: Option<PathBuf>,
    /// Request timeout for outbound HTTP clients
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a URL or number cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let user_id = env_var_or(env_config::USER_ID, env_config::DEFAULT_USER_ID);
        let chat_base_url = parse_url(
            env_config::CHAT_BASE_URL,
            &env_var_or(env_config::CHAT_BASE_URL, env_config::DEFAULT_CHAT_BASE_URL),
        )?;
        let firestore_base_url = parse_url(
            env_config::FIRESTORE_BASE_URL,
            &env_var_or(
                env_config::FIRESTORE_BASE_URL,
                env_config::DEFAULT_FIRESTORE_BASE_URL,
            ),
        )?;
        let sync_minutes = parse_number(
            env_config::SYNC_INTERVAL_MINUTES,
            DEFAULT_SYNC_INTERVAL_MINUTES,
        )?;
        let timeout_secs = parse_number(
            env_config::HTTP_TIMEOUT_SECS,
            env_config::DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(AppError::config_invalid(
                env_config::HTTP_TIMEOUT_SECS,
                "timeout must be at least one second",
            ));
        }

        Ok(Self {
            user_id,
            chat: ChatBackendConfig {
                base_url: chat_base_url,
            },
            firestore: FirestoreConfig {
                project_id: optional_env(env_config::FIRESTORE_PROJECT_ID),
                database: env_var_or(
                    env_config::FIRESTORE_DATABASE,
                    env_config::DEFAULT_FIRESTORE_DATABASE,
                ),
                base_url: firestore_base_url,
                token: optional_env(env_config::FIRESTORE_TOKEN),
            },
            sync: SyncConfig::from_minutes(sync_minutes),
            health_fixture: optional_env(env_config::HEALTH_FIXTURE).map(PathBuf::from),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// One-line summary safe to log (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "user={} chat={} firestore={} database={} token={} sync_interval={}m fixture={} timeout={}s",
            self.user_id,
            self.chat.base_url,
            self.firestore.project_id.as_deref().unwrap_or("<unset>"),
            self.firestore.database,
            if self.firestore.token.is_some() {
                "set"
            } else {
                "unset"
            },
            self.sync.interval.as_secs() / 60,
            self.health_fixture
                .as_ref()
                .map_or_else(|| "<none>".to_owned(), |p| p.display().to_string()),
            self.http_timeout.as_secs(),
        )
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn env_var_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_owned())
}

fn parse_url(key: &str, raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|e| AppError::config_invalid(key, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::config_invalid(
            key,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_number(key: &str, default: u64) -> AppResult<u64> {
    optional_env(key).map_or(Ok(default), |raw| {
        raw.parse::<u64>()
            .map_err(|e| AppError::config_invalid(key, format!("'{raw}' is not a number: {e}")))
    })
}
