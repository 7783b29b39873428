// ABOUTME: Chat module declarations and re-exports
// ABOUTME: Response extraction, backend client, session context, transcript and controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Chat
//!
//! User messages go to a remote AI coach through a [`ChatBackend`], optionally with the
//! day's [`HealthDataPayload`](crate::models::HealthDataPayload) attached. The backend
//! answers free-form text that may embed a JSON object; [`extract_display_text`] pulls
//! the user-facing message out of it. [`ChatController`] owns the transcript and keeps
//! each exchange consistent when several sends are in flight.

/// Backend client trait and HTTP implementation
pub mod client;
/// Controller owning the transcript
pub mod controller;
/// Display text extraction from raw backend answers
pub mod extract;
/// Per-controller session identity
pub mod session;
/// In-memory transcript
pub mod transcript;

pub use client::{ChatBackend, HttpChatBackend};
pub use controller::{ChatController, ChatOutcome, ChatReply, HealthAttachment};
pub use extract::extract_display_text;
pub use session::SessionContext;
pub use transcript::{PendingExchange, Transcript};
