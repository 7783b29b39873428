// ABOUTME: Daily health snapshot combining step and sleep records for one date
// ABOUTME: Unit exchanged with both the document store and the chat backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DailyStepRecord, HealthDataPayload, SleepRecord};

/// Point-in-time read of step and sleep metrics for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Calendar date the snapshot describes
    pub date: NaiveDate,
    /// Steps for the date
    pub steps: DailyStepRecord,
    /// Sleep for the night ending on the date, if any was recorded
    pub sleep: Option<SleepRecord>,
}

impl HealthSnapshot {
    /// Snapshot with no recorded activity
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            steps: DailyStepRecord::empty(),
            sleep: None,
        }
    }

    /// ISO-8601 date string used as the document key
    #[must_use]
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Wire representation shared by chat requests and health logs
    #[must_use]
    pub fn to_payload(&self) -> HealthDataPayload {
        HealthDataPayload::from(self)
    }
}
