// ABOUTME: Utility module declarations
// ABOUTME: Shared HTTP client helpers used by the chat backend and the document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

/// HTTP client construction with timeout configuration
pub mod http_client;
