// ABOUTME: Core health data source trait and the request/response types it exchanges
// ABOUTME: Defines TimeRange windows, permissions, and platform sleep session shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Health Data Source Capability Interface
//!
//! The snapshot builder only ever talks to the health platform through
//! [`HealthDataSource`]. A binding for a vendor SDK implements four read queries
//! plus a permission check:
//!
//! - `get_step_goal(date)`: step goal in effect on a date
//! - `get_step_total(range)`: aggregated steps over a window
//! - `get_hourly_step_buckets(range)`: the same aggregate grouped by local hour
//! - `get_sleep_sessions(range)`: sleep sessions ending inside a window
//!
//! All times are local wall-clock (`NaiveDateTime`), matching the platform's
//! local-time filters. Windows are half-open: `[start, end)`.
//!
//! ## Error Contract
//!
//! Implementations report missing permissions as
//! [`HealthSourceError::PermissionDenied`] and empty results as either an empty
//! value or [`HealthSourceError::DataUnavailable`]; callers treat both alike.

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{data_types, windows::SLEEP_WINDOW_PIVOT_HOUR};
use crate::errors::{HealthSourceError, SourceResult};
use crate::models::HourlyStepBucket;

// Evaluated at compile time: an out-of-range hour fails the build
#[allow(clippy::panic)]
const SLEEP_WINDOW_PIVOT: NaiveTime = match NaiveTime::from_hms_opt(SLEEP_WINDOW_PIVOT_HOUR, 0, 0) {
    Some(pivot) => pivot,
    None => panic!("sleep window pivot hour must be below 24"),
};

/// Half-open local time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start
    pub start: NaiveDateTime,
    /// Exclusive end
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Create a window, rejecting one whose end does not follow its start
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> SourceResult<Self> {
        if end <= start {
            return Err(HealthSourceError::InvalidRequest {
                reason: format!("time range end {end} must be after start {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// The 24-hour window `[date 00:00, date+1 00:00)`
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// The night associated with `date`: previous day's noon to the date's noon
    #[must_use]
    pub fn sleep_night(date: NaiveDate) -> Self {
        let end = date.and_time(SLEEP_WINDOW_PIVOT);
        Self {
            start: end - Duration::days(1),
            end,
        }
    }

    /// Whether an instant falls inside the window
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Kind of access a permission grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessType {
    /// Read access
    Read,
    /// Write access
    Write,
}

/// Access to one platform data type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Platform data type name (e.g. `STEPS`)
    pub data_type: String,
    /// Access kind
    pub access: AccessType,
}

impl Permission {
    /// Read access to a data type
    pub fn read(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            access: AccessType::Read,
        }
    }
}

/// Set of granted or required permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permission
    pub fn insert(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    /// Whether a permission is present
    #[must_use]
    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    /// Whether every permission of `other` is present
    #[must_use]
    pub fn contains_all(&self, other: &Self) -> bool {
        other.0.is_subset(&self.0)
    }

    /// Permissions of `required` that are absent from this set
    #[must_use]
    pub fn missing_from(&self, required: &Self) -> Vec<Permission> {
        required.0.difference(&self.0).cloned().collect()
    }

    /// Iterate over the permissions
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Permissions the application needs before it can build snapshots
#[must_use]
pub fn required_permissions() -> PermissionSet {
    [data_types::STEPS, data_types::STEPS_GOAL, data_types::SLEEP]
        .into_iter()
        .map(Permission::read)
        .collect()
}

/// One stage entry as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSleepStage {
    /// Platform stage code (e.g. `LIGHT`); unknown codes are tolerated
    pub code: String,
    /// Stage start
    pub start: NaiveDateTime,
    /// Stage end
    pub end: NaiveDateTime,
}

/// One sleep session as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSleepSession {
    /// Session start
    pub start: NaiveDateTime,
    /// Session end
    pub end: NaiveDateTime,
    /// Stage entries, possibly empty
    #[serde(default)]
    pub stages: Vec<PlatformSleepStage>,
}

/// Read-only capability interface onto the vendor health platform
#[async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &'static str;

    /// Permissions the user has granted so far
    async fn granted_permissions(&self) -> SourceResult<PermissionSet>;

    /// Step goal in effect on `date`, `None` if no goal was ever set
    async fn get_step_goal(&self, date: NaiveDate) -> SourceResult<Option<u32>>;

    /// Total steps over `range`
    async fn get_step_total(&self, range: &TimeRange) -> SourceResult<u64>;

    /// Steps over `range` grouped by local hour, ordered by hour
    async fn get_hourly_step_buckets(&self, range: &TimeRange)
        -> SourceResult<Vec<HourlyStepBucket>>;

    /// Sleep sessions ending inside `range`, ordered by start
    async fn get_sleep_sessions(&self, range: &TimeRange) -> SourceResult<Vec<PlatformSleepSession>>;

    /// Whether every required permission has been granted
    async fn has_required_permissions(&self) -> SourceResult<bool> {
        Ok(self
            .granted_permissions()
            .await?
            .contains_all(&required_permissions()))
    }
}
