// ABOUTME: Core data models for daily health snapshots, chat exchanges and health logs
// ABOUTME: Re-exports step, sleep, snapshot, chat and document payload types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! Data models
//!
//! The snapshot types (`DailyStepRecord`, `SleepRecord`, `HealthSnapshot`) are the
//! normalized read of one calendar day. `HealthDataPayload` is their wire shape,
//! shared by the chat request (`healthData`) and the stored health-log document.

mod chat;
mod health_log;
mod sleep;
mod snapshot;
mod steps;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, NotificationPayload, Sender};
pub use health_log::{
    ExerciseEntry, HealthDataPayload, HealthLogDocument, SleepPayload, SleepStagePayload,
    StepStats,
};
pub use sleep::{SleepRecord, SleepStageDuration, SleepStageKind};
pub use snapshot::HealthSnapshot;
pub use steps::{DailyStepRecord, HourlyStepBucket};
