// ABOUTME: Tracing subscriber setup for the wellness coach CLI and library consumers
// ABOUTME: Chooses json, full or compact output on stderr and filters noisy HTTP internals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Structured logging
//!
//! Events are written to stderr so that command output on stdout (snapshot JSON, chat
//! answers, sync reports) can be piped. `hyper` and `reqwest` are capped at `warn`
//! regardless of the requested level.

use std::env;
use std::fmt;
use std::io;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self as subscriber_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::constants::service_names;

const NOISY_TARGETS: [&str; 4] = ["hyper", "hyper::proto", "hyper_util", "reqwest"];

/// How events are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-field human readable lines
    #[default]
    Pretty,
    /// Single-line output without targets
    Compact,
}

impl LogFormat {
    /// `LOG_FORMAT` value; anything unrecognised selects [`LogFormat::Pretty`]
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Level directive for this crate, also the fallback filter when `RUST_LOG` is unset
    pub level: String,
    /// Output rendering
    pub format: LogFormat,
    /// Add file and line to events
    pub include_location: bool,
    /// Add thread ids and names to events
    pub include_thread: bool,
    /// Emit span open/close events (sync runs, chat exchanges)
    pub include_spans: bool,
    /// Name reported in the startup event
    pub service_name: String,
    /// Deployment label (`development`, `production`, ...)
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::WELLNESS_COACH.to_owned(),
            environment: "development".to_owned(),
        }
    }
}

fn flag(key: &str) -> bool {
    env::var_os(key).is_some()
}

impl LoggingConfig {
    /// Settings from `RUST_LOG`, `LOG_FORMAT`, `ENVIRONMENT`, `SERVICE_NAME` and the
    /// `LOG_INCLUDE_LOCATION` / `LOG_INCLUDE_THREAD` / `LOG_INCLUDE_SPANS` flags
    ///
    /// `ENVIRONMENT=production` turns on location and thread fields.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let production = environment.eq_ignore_ascii_case("production");

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map(|raw| LogFormat::from_str_or_default(&raw))
                .unwrap_or_default(),
            include_location: production || flag("LOG_INCLUDE_LOCATION"),
            include_thread: production || flag("LOG_INCLUDE_THREAD"),
            include_spans: flag("LOG_INCLUDE_SPANS"),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));
        for target in NOISY_TARGETS {
            if let Ok(directive) = format!("{target}=warn").parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
        // Skipped when `level` holds a directive list instead of a bare level
        if let Ok(directive) = format!("wellness_coach={}", self.level).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
        filter
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn output_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = subscriber_fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(false)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Json => base
                .json()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_filter(self.env_filter())
                .boxed(),
            LogFormat::Pretty => base
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_thread_ids(self.include_thread)
                .with_thread_names(self.include_thread)
                .with_filter(self.env_filter())
                .boxed(),
            LogFormat::Compact => base
                .compact()
                .with_target(false)
                .with_filter(self.env_filter())
                .boxed(),
        }
    }

    /// Install the global subscriber and log one startup event
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.output_layer())
            .try_init()
            .map_err(|e| anyhow!("tracing subscriber already installed: {e}"))?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = %self.format,
            log.spans = self.include_spans,
            "Logging initialised"
        );
        Ok(())
    }
}

/// Install the subscriber with [`LoggingConfig::default`]
///
/// # Errors
///
/// See [`LoggingConfig::init`].
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Install the subscriber with [`LoggingConfig::from_env`]
///
/// # Errors
///
/// See [`LoggingConfig::init`].
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default(" COMPACT "), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.include_spans);
        assert_eq!(config.service_name, service_names::WELLNESS_COACH);
    }

    #[test]
    fn test_span_events_follow_flag() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.span_events(), FmtSpan::NONE);
        config.include_spans = true;
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }
}
