// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the Wellness Coach platform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Constants module
//!
//! Constants are grouped by the subsystem that owns them.

/// Sync job scheduling constants
pub mod sync;

/// Environment variable names and defaults
pub mod env_config;

/// Service names used in structured logs
pub mod service_names {
    /// Name reported by the logging subsystem
    pub const WELLNESS_COACH: &str = "wellness-coach";
    /// Chat backend name used in error messages
    pub const CHAT_BACKEND: &str = "chat backend";
    /// Document store name used in error messages
    pub const DOCUMENT_STORE: &str = "document store";
}

/// Chat wire constants
pub mod chat {
    /// Backend endpoint path relative to the base URL
    pub const CHAT_PATH: &str = "chat";
    /// Prefix of generated session identifiers
    pub const SESSION_ID_PREFIX: &str = "session_";
    /// Text shown while the backend answer is pending
    pub const PENDING_PLACEHOLDER: &str = "...";
    /// Prefix of the inline error shown in place of a failed answer
    pub const ERROR_PREFIX: &str = "An error occurred: ";
    /// Field of the embedded JSON object that carries the user-facing text
    pub const RESPONSE_FOR_USER_FIELD: &str = "response_for_user";
}

/// Health log document constants
pub mod health_log {
    /// Exercise type tag of the daily step entry
    pub const EXERCISE_TYPE_STEPS_DAILY: &str = "STEPS_DAILY";
    /// Top-level collection holding users
    pub const USERS_COLLECTION: &str = "users";
    /// Per-user sub-collection of daily logs
    pub const HEALTH_LOGS_COLLECTION: &str = "health_logs";
    /// Field assigned by the store at write time
    pub const TIMESTAMP_FIELD: &str = "timestamp";
    /// Field holding the exercise entries
    pub const EXERCISE_DATA_FIELD: &str = "exercise_data";
    /// Field holding the sleep summary
    pub const SLEEP_DATA_FIELD: &str = "sleep_data";
}

/// Health platform data type names
pub mod data_types {
    /// Step counts
    pub const STEPS: &str = "STEPS";
    /// Daily step goal
    pub const STEPS_GOAL: &str = "STEPS_GOAL";
    /// Sleep sessions
    pub const SLEEP: &str = "SLEEP";
}

/// Time-window conventions for daily snapshots
pub mod windows {
    /// Hour of the previous day at which the sleep window opens, and of the
    /// snapshot date at which it closes
    pub const SLEEP_WINDOW_PIVOT_HOUR: u32 = 12;
}
