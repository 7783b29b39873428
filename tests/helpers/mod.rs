// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports health fixtures and fake chat backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod chat_backend;
pub mod fixtures;
