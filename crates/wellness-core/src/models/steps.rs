// ABOUTME: Daily step models with hourly breakdown
// ABOUTME: DailyStepRecord and HourlyStepBucket definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Steps counted during one local hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyStepBucket {
    /// Local wall-clock start of the hour
    pub hour_start: NaiveDateTime,
    /// Steps counted in the hour
    pub count: u64,
}

impl HourlyStepBucket {
    /// Create a bucket
    #[must_use]
    pub const fn new(hour_start: NaiveDateTime, count: u64) -> Self {
        Self { hour_start, count }
    }

    /// Hour-of-day key used by the wire payloads (`"0"` to `"23"`)
    #[must_use]
    pub fn hour_key(&self) -> String {
        self.hour_start.hour().to_string()
    }
}

/// Step totals for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStepRecord {
    /// Total steps over the day window
    pub total_count: u64,
    /// Step goal in effect for the day (0 when none is set)
    pub goal: u32,
    /// Hourly breakdown ordered by hour
    pub hourly_buckets: Vec<HourlyStepBucket>,
}

impl DailyStepRecord {
    /// Zero-valued record used when the platform has nothing to report
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_count: 0,
            goal: 0,
            hourly_buckets: Vec::new(),
        }
    }

    /// Sum of all hourly buckets
    #[must_use]
    pub fn hourly_sum(&self) -> u64 {
        self.hourly_buckets.iter().map(|b| b.count).sum()
    }

    /// Whether the hourly breakdown adds up to the reported total
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.hourly_sum() == self.total_count
    }

    /// Progress toward the goal as a ratio (0.0 when no goal is set)
    #[must_use]
    pub fn goal_progress(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        self.total_count as f64 / f64::from(self.goal)
    }

    /// Whether the goal was reached; a day without a goal never counts as reached
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.goal > 0 && self.total_count >= u64::from(self.goal)
    }
}
