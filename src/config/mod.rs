// ABOUTME: Configuration module declarations
// ABOUTME: Environment-only application configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

/// Environment variable based configuration
pub mod environment;

pub use environment::{AppConfig, ChatBackendConfig, FirestoreConfig, SyncConfig};
