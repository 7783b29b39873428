// ABOUTME: Health data source abstractions and the fixture-backed synthetic source
// ABOUTME: Capability trait, time windows, permissions and platform sleep types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Health data source abstractions.
//!
//! The vendor health platform is consumed through the narrow [`HealthDataSource`]
//! capability interface. Concrete vendor bindings live outside this workspace; the
//! [`SyntheticHealthSource`] serves development, the CLI and the test-suite.

// Re-export wellness-core modules so provider code can keep `use crate::errors::*` etc.
pub use wellness_core::constants;
pub use wellness_core::errors;
pub use wellness_core::models;

/// Core provider traits and interfaces
pub mod core;
/// In-memory health source loaded from JSON fixtures
pub mod synthetic;

pub use crate::core::{
    required_permissions, AccessType, HealthDataSource, Permission, PermissionSet,
    PlatformSleepSession, PlatformSleepStage, TimeRange,
};
pub use crate::synthetic::{HealthDataset, StepSample, SyntheticHealthSource};
pub use wellness_core::errors::{HealthSourceError, SourceResult};
