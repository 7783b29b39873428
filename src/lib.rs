// ABOUTME: Main library entry point for the Wellness Coach application core
// ABOUTME: Snapshot builder, chat client and controller, document store sync, dashboard state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

#![deny(unsafe_code)]

//! # Wellness Coach
//!
//! Application core of a wearable health companion. It reads step and sleep data from
//! a vendor health platform, turns it into daily [`HealthSnapshot`]s, uploads them to a
//! cloud document store on a fixed interval, and forwards chat messages (optionally
//! bundled with the day's metrics) to a remote AI coach.
//!
//! ## Architecture
//!
//! - **Snapshot**: builds a normalized daily snapshot from a `HealthDataSource`
//! - **Chat**: response extraction, backend client, session context and transcript
//! - **Store**: merge-write document stores (Firestore REST and in-memory)
//! - **Sync**: the upload job and the periodic job scheduler
//! - **Dashboard**: permission and date-selection state for the dashboard view
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wellness_coach::snapshot::SnapshotBuilder;
//! use wellness_coach::errors::AppResult;
//! use wellness_providers::SyntheticHealthSource;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let builder = SnapshotBuilder::new(Arc::new(SyntheticHealthSource::new()));
//!     let today = chrono::Local::now().date_naive();
//!     let snapshot = builder.build_snapshot(today).await?;
//!     println!("{} steps", snapshot.steps.total_count);
//!     Ok(())
//! }
//! ```
//!
//! [`HealthSnapshot`]: wellness_core::models::HealthSnapshot

/// Unified error handling (re-exported from `wellness-core`)
pub mod errors;

/// Application constants (re-exported from `wellness-core`)
pub use wellness_core::constants;

/// Domain models (re-exported from `wellness-core`)
pub use wellness_core::models;

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Shared HTTP client construction
pub mod utils;

/// Daily health snapshot builder
pub mod snapshot;

/// Chat response extraction, backend client and controller
pub mod chat;

/// Merge-write document stores
pub mod store;

/// Upload job and periodic job scheduler
pub mod sync;

/// Dashboard view state controller
pub mod dashboard;
