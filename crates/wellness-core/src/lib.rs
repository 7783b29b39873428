// ABOUTME: Core types and constants for the Wellness Coach platform
// ABOUTME: Foundation crate with error handling, health/chat models, and wire payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

#![deny(unsafe_code)]

//! # Wellness Core
//!
//! Foundation crate providing shared types and constants for the Wellness Coach
//! platform. Nothing in here performs I/O; the snapshot builder, chat client and
//! document stores in the main crate all exchange the types defined here.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `HealthSourceError`
//! - **constants**: Wire names, default values and platform limits
//! - **models**: Step, sleep, snapshot, chat and health-log document models

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (steps, sleep, snapshots, chat, health logs)
pub mod models;
