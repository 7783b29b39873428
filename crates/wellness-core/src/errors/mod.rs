// ABOUTME: Unified error handling with error codes shared by every Wellness Coach crate
// ABOUTME: Defines ErrorCode, AppError, AppResult and conversions from library errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Unified Error Handling System
//!
//! `AppError` carries an `ErrorCode` classifying the failure plus a human-readable
//! message. The codes map onto the four failure classes the application cares about:
//!
//! - **Permission denied**: health platform access not granted yet; surfaced so the
//!   caller can start an authorization flow.
//! - **External service**: chat backend or document store failed; shown inline or logged.
//! - **Configuration**: missing or invalid environment values.
//! - **Internal/serialization**: bugs and unexpected payloads.
//!
//! "No data" is deliberately not an error code: the health source reports it through
//! [`HealthSourceError::DataUnavailable`] and callers degrade to empty values.

mod source;

pub use source::{HealthSourceError, SourceResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Health platform permissions have not been granted
    PermissionDenied,
    /// Caller supplied an invalid value
    InvalidInput,
    /// A remote service answered with an error
    ExternalServiceError,
    /// A remote service could not be reached
    ExternalServiceUnavailable,
    /// Generic configuration problem
    ConfigError,
    /// A required configuration value is missing
    ConfigMissing,
    /// A configuration value could not be parsed
    ConfigInvalid,
    /// Data could not be serialized or deserialized
    SerializationError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Health data permissions have not been granted",
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether a later attempt may succeed without user intervention
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError | Self::ExternalServiceUnavailable
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Health platform permission missing
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing configuration value
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{key} environment variable is required"),
        )
    }

    /// Unparseable configuration value
    pub fn config_invalid(key: &str, reason: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ConfigInvalid, format!("{key}: {reason}"))
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether this error is a missing-permission condition
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.code == ErrorCode::PermissionDenied
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<HealthSourceError> for AppError {
    fn from(error: HealthSourceError) -> Self {
        let code = match &error {
            HealthSourceError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            HealthSourceError::InvalidRequest { .. } => ErrorCode::InvalidInput,
            HealthSourceError::DataUnavailable { .. } | HealthSourceError::Platform { .. } => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_permission_denied_conversion() {
        let error: AppError = HealthSourceError::permission_denied("STEPS").into();
        assert!(error.is_permission_denied());
        assert!(error.to_string().contains("STEPS"));
    }

    #[test]
    fn test_transient_codes() {
        assert!(ErrorCode::ExternalServiceUnavailable.is_transient());
        assert!(!ErrorCode::PermissionDenied.is_transient());
        assert!(!ErrorCode::ConfigInvalid.is_transient());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::PermissionDenied).unwrap();
        assert_eq!(json, "\"PERMISSION_DENIED\"");
    }
}
