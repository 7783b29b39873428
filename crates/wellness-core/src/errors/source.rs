// ABOUTME: Error types reported by health data sources (vendor platform bindings)
// ABOUTME: Separates permission denial and missing data from genuine platform failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

/// Failure reported by a health data source query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HealthSourceError {
    /// Read access for the data type has not been granted
    #[error("Permission not granted for {data_type}")]
    PermissionDenied {
        /// Platform data type the query needed (e.g. `STEPS`)
        data_type: String,
    },

    /// The query succeeded but the platform holds no records
    #[error("No {data_type} data available")]
    DataUnavailable {
        /// Platform data type that had no records
        data_type: String,
    },

    /// The request was rejected as malformed by the platform
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected
        reason: String,
    },

    /// Platform-internal failure
    #[error("Health platform error: {message}")]
    Platform {
        /// Platform error message
        message: String,
        /// Whether the platform offers a user-facing resolution (e.g. update the app)
        resolvable: bool,
    },
}

impl HealthSourceError {
    /// Permission missing for a data type
    pub fn permission_denied(data_type: impl Into<String>) -> Self {
        Self::PermissionDenied {
            data_type: data_type.into(),
        }
    }

    /// No data for a data type
    pub fn data_unavailable(data_type: impl Into<String>) -> Self {
        Self::DataUnavailable {
            data_type: data_type.into(),
        }
    }

    /// Non-resolvable platform failure
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
            resolvable: false,
        }
    }

    /// Whether this is a permission failure
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Whether the user can resolve this failure through a platform prompt
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::Platform { resolvable: true, .. }
        )
    }
}

/// Result type for health data source queries
pub type SourceResult<T> = Result<T, HealthSourceError>;
