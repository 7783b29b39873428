// ABOUTME: Unified error handling re-exported from wellness-core
// ABOUTME: AppError, ErrorCode and AppResult shared by every module of the application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Error types live in `wellness-core` so the provider crate and this crate share one
//! taxonomy. This module keeps `crate::errors::*` paths working throughout the crate.

pub use wellness_core::errors::{
    AppError, AppResult, ErrorCode, HealthSourceError, SourceResult,
};
