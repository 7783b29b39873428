// ABOUTME: Synthetic health data source for development and testing
// ABOUTME: Serves step samples, step goals and sleep sessions from an in-memory dataset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

// RwLock poisoning errors are converted to HealthSourceError::Platform
// for proper error propagation through the application

//! # Synthetic Health Source
//!
//! A [`HealthDataSource`] that answers every query from an in-memory
//! [`HealthDataset`] instead of a vendor SDK:
//!
//! - Loads deterministic datasets from JSON fixtures
//! - Supports granting and revoking read permissions at runtime
//! - Supports injecting per-data-type failures for tests
//!
//! Step data is stored as raw samples (one count at one instant); totals and hourly
//! buckets are aggregated on demand the way the platform aggregates them, so the
//! hourly breakdown always sums to the reported total.
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock`; one instance can be shared through an
//! `Arc` by the dashboard, the chat controller and the sync job at the same time.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::data_types;
use crate::core::{
    HealthDataSource, Permission, PermissionSet, PlatformSleepSession, TimeRange,
};
use crate::errors::{HealthSourceError, SourceResult};
use crate::models::HourlyStepBucket;

const SOURCE_NAME: &str = "synthetic";

/// Steps recorded at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSample {
    /// Local time the steps were recorded
    pub start: NaiveDateTime,
    /// Number of steps
    pub count: u64,
}

/// Complete dataset served by the synthetic source
///
/// Fixture files use this shape directly:
///
/// ```json
/// {
///   "granted": ["STEPS", "STEPS_GOAL", "SLEEP"],
///   "step_goals": { "2025-06-01": 8000 },
///   "step_samples": [{ "start": "2025-06-02T08:15:00", "count": 1200 }],
///   "sleep_sessions": [{
///     "start": "2025-06-01T23:00:00",
///     "end": "2025-06-02T07:00:00",
///     "stages": [{ "code": "LIGHT", "start": "2025-06-01T23:00:00", "end": "2025-06-02T01:00:00" }]
///   }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDataset {
    /// Data types with granted read access; every required type when omitted
    #[serde(default = "all_data_types")]
    pub granted: BTreeSet<String>,
    /// Step goal changes keyed by the date they take effect
    #[serde(default)]
    pub step_goals: BTreeMap<NaiveDate, u32>,
    /// Raw step samples
    #[serde(default)]
    pub step_samples: Vec<StepSample>,
    /// Recorded sleep sessions
    #[serde(default)]
    pub sleep_sessions: Vec<PlatformSleepSession>,
}

fn all_data_types() -> BTreeSet<String> {
    [data_types::STEPS, data_types::STEPS_GOAL, data_types::SLEEP]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

impl Default for HealthDataset {
    fn default() -> Self {
        Self {
            granted: all_data_types(),
            step_goals: BTreeMap::new(),
            step_samples: Vec::new(),
            sleep_sessions: Vec::new(),
        }
    }
}

/// Synthetic health data source for development and testing
///
/// # Examples
///
/// ```rust,no_run
/// use wellness_providers::{HealthDataSource, SyntheticHealthSource, TimeRange};
/// use chrono::NaiveDate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = SyntheticHealthSource::from_fixture_file("fixtures/week.json")?;
/// let date = NaiveDate::from_ymd_opt(2025, 6, 2).ok_or("bad date")?;
/// let total = source.get_step_total(&TimeRange::day(date)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyntheticHealthSource {
    dataset: Arc<RwLock<HealthDataset>>,
    /// Injected failures keyed by data type
    failures: Arc<RwLock<HashMap<String, HealthSourceError>>>,
}

impl SyntheticHealthSource {
    /// Empty source with every permission granted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source serving the given dataset
    #[must_use]
    pub fn with_dataset(dataset: HealthDataset) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            failures: Arc::default(),
        }
    }

    /// Load a dataset from a JSON fixture file
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::InvalidRequest` if the file cannot be read or parsed.
    pub fn from_fixture_file(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| HealthSourceError::InvalidRequest {
            reason: format!("cannot read health fixture {}: {e}", path.display()),
        })?;
        Self::from_json(&raw)
    }

    /// Parse a dataset from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::InvalidRequest` if the JSON does not describe a dataset.
    pub fn from_json(raw: &str) -> SourceResult<Self> {
        let dataset: HealthDataset =
            serde_json::from_str(raw).map_err(|e| HealthSourceError::InvalidRequest {
                reason: format!("invalid health fixture: {e}"),
            })?;
        Ok(Self::with_dataset(dataset))
    }

    fn read_dataset(&self) -> SourceResult<RwLockReadGuard<'_, HealthDataset>> {
        self.dataset
            .read()
            .map_err(|_| HealthSourceError::platform("RwLock poisoned: dataset lock"))
    }

    fn write_dataset(&self) -> SourceResult<RwLockWriteGuard<'_, HealthDataset>> {
        self.dataset
            .write()
            .map_err(|_| HealthSourceError::platform("RwLock poisoned: dataset lock"))
    }

    /// Grant read access to a data type
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn grant(&self, data_type: &str) -> SourceResult<()> {
        self.write_dataset()?.granted.insert(data_type.to_owned());
        Ok(())
    }

    /// Revoke read access to a data type
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn revoke(&self, data_type: &str) -> SourceResult<()> {
        self.write_dataset()?.granted.remove(data_type);
        Ok(())
    }

    /// Revoke every permission
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn revoke_all(&self) -> SourceResult<()> {
        self.write_dataset()?.granted.clear();
        Ok(())
    }

    /// Record steps at an instant
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn add_steps(&self, start: NaiveDateTime, count: u64) -> SourceResult<()> {
        self.write_dataset()?
            .step_samples
            .push(StepSample { start, count });
        Ok(())
    }

    /// Set the step goal taking effect on `date`
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn set_step_goal(&self, date: NaiveDate, goal: u32) -> SourceResult<()> {
        self.write_dataset()?.step_goals.insert(date, goal);
        Ok(())
    }

    /// Record a sleep session
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn add_sleep_session(&self, session: PlatformSleepSession) -> SourceResult<()> {
        self.write_dataset()?.sleep_sessions.push(session);
        Ok(())
    }

    /// Make every query for `data_type` fail with `error` until cleared
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn fail_with(&self, data_type: &str, error: HealthSourceError) -> SourceResult<()> {
        self.failures
            .write()
            .map_err(|_| HealthSourceError::platform("RwLock poisoned: failures lock"))?
            .insert(data_type.to_owned(), error);
        Ok(())
    }

    /// Remove an injected failure
    ///
    /// # Errors
    ///
    /// Returns `HealthSourceError::Platform` if the internal `RwLock` is poisoned.
    pub fn clear_failure(&self, data_type: &str) -> SourceResult<()> {
        self.failures
            .write()
            .map_err(|_| HealthSourceError::platform("RwLock poisoned: failures lock"))?
            .remove(data_type);
        Ok(())
    }

    /// Gate a query on injected failures and granted permissions
    fn check_access(&self, data_type: &str) -> SourceResult<()> {
        if let Some(error) = self
            .failures
            .read()
            .map_err(|_| HealthSourceError::platform("RwLock poisoned: failures lock"))?
            .get(data_type)
        {
            return Err(error.clone());
        }

        if self.read_dataset()?.granted.contains(data_type) {
            Ok(())
        } else {
            Err(HealthSourceError::permission_denied(data_type))
        }
    }
}

fn truncate_to_hour(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .date()
        .and_hms_opt(instant.hour(), 0, 0)
        .unwrap_or(instant)
}

#[async_trait]
impl HealthDataSource for SyntheticHealthSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn granted_permissions(&self) -> SourceResult<PermissionSet> {
        Ok(self
            .read_dataset()?
            .granted
            .iter()
            .map(Permission::read)
            .collect())
    }

    async fn get_step_goal(&self, date: NaiveDate) -> SourceResult<Option<u32>> {
        self.check_access(data_types::STEPS_GOAL)?;
        // The goal in effect is the most recent one set on or before the date
        Ok(self
            .read_dataset()?
            .step_goals
            .range(..=date)
            .next_back()
            .map(|(_, goal)| *goal))
    }

    async fn get_step_total(&self, range: &TimeRange) -> SourceResult<u64> {
        self.check_access(data_types::STEPS)?;
        Ok(self
            .read_dataset()?
            .step_samples
            .iter()
            .filter(|sample| range.contains(sample.start))
            .map(|sample| sample.count)
            .sum())
    }

    async fn get_hourly_step_buckets(
        &self,
        range: &TimeRange,
    ) -> SourceResult<Vec<HourlyStepBucket>> {
        self.check_access(data_types::STEPS)?;
        let mut hours: BTreeMap<NaiveDateTime, u64> = BTreeMap::new();
        for sample in self
            .read_dataset()?
            .step_samples
            .iter()
            .filter(|sample| range.contains(sample.start))
        {
            *hours.entry(truncate_to_hour(sample.start)).or_insert(0) += sample.count;
        }

        debug!(source = SOURCE_NAME, %range, buckets = hours.len(), "Aggregated hourly steps");
        Ok(hours
            .into_iter()
            .map(|(hour_start, count)| HourlyStepBucket::new(hour_start, count))
            .collect())
    }

    async fn get_sleep_sessions(&self, range: &TimeRange) -> SourceResult<Vec<PlatformSleepSession>> {
        self.check_access(data_types::SLEEP)?;
        let mut sessions: Vec<PlatformSleepSession> = self
            .read_dataset()?
            .sleep_sessions
            .iter()
            .filter(|session| range.contains(session.end))
            .cloned()
            .collect();
        sessions.sort_by_key(|session| session.start);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::core::PlatformSleepStage;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn test_hourly_buckets_sum_to_total() {
        let source = SyntheticHealthSource::new();
        source.add_steps(at(2, 8, 5), 300).unwrap();
        source.add_steps(at(2, 8, 45), 700).unwrap();
        source.add_steps(at(2, 17, 30), 2500).unwrap();
        source.add_steps(at(3, 0, 10), 99).unwrap();

        let range = TimeRange::day(date(2));
        let total = source.get_step_total(&range).await.unwrap();
        let buckets = source.get_hourly_step_buckets(&range).await.unwrap();

        assert_eq!(total, 3500);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].hour_start, at(2, 8, 0));
        assert_eq!(buckets[0].count, 1000);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), total);
    }

    #[tokio::test]
    async fn test_step_goal_carries_forward() {
        let source = SyntheticHealthSource::new();
        source.set_step_goal(date(1), 6000).unwrap();
        source.set_step_goal(date(5), 9000).unwrap();

        assert_eq!(source.get_step_goal(date(3)).await.unwrap(), Some(6000));
        assert_eq!(source.get_step_goal(date(5)).await.unwrap(), Some(9000));
        assert_eq!(
            source
                .get_step_goal(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap())
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_revoked_permission_is_denied() {
        let source = SyntheticHealthSource::new();
        source.revoke(data_types::STEPS).unwrap();

        let error = source
            .get_step_total(&TimeRange::day(date(2)))
            .await
            .unwrap_err();
        assert!(error.is_permission_denied());
        assert!(!source.has_required_permissions().await.unwrap());

        source.grant(data_types::STEPS).unwrap();
        assert!(source.has_required_permissions().await.unwrap());
    }

    #[tokio::test]
    async fn test_sleep_sessions_filtered_by_end() {
        let source = SyntheticHealthSource::new();
        source
            .add_sleep_session(PlatformSleepSession {
                start: at(1, 23, 0),
                end: at(2, 7, 0),
                stages: vec![PlatformSleepStage {
                    code: "DEEP".to_owned(),
                    start: at(1, 23, 0),
                    end: at(2, 1, 0),
                }],
            })
            .unwrap();
        source
            .add_sleep_session(PlatformSleepSession {
                start: at(2, 22, 0),
                end: at(3, 6, 0),
                stages: Vec::new(),
            })
            .unwrap();

        let sessions = source
            .get_sleep_sessions(&TimeRange::sleep_night(date(2)))
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].end, at(2, 7, 0));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let source = SyntheticHealthSource::new();
        source
            .fail_with(data_types::SLEEP, HealthSourceError::platform("sdk crashed"))
            .unwrap();
        let error = source
            .get_sleep_sessions(&TimeRange::sleep_night(date(2)))
            .await
            .unwrap_err();
        assert!(matches!(error, HealthSourceError::Platform { .. }));

        source.clear_failure(data_types::SLEEP).unwrap();
        assert!(source
            .get_sleep_sessions(&TimeRange::sleep_night(date(2)))
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fixture_defaults_grant_everything() {
        let source = SyntheticHealthSource::from_json(
            r#"{ "step_samples": [{ "start": "2025-06-02T08:15:00", "count": 12 }] }"#,
        )
        .unwrap();
        let dataset = source.read_dataset().unwrap();
        assert_eq!(dataset.granted, all_data_types());
        assert_eq!(dataset.step_samples.len(), 1);
    }

    #[test]
    fn test_fixture_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("health.json");
        std::fs::write(&path, r#"{ "granted": ["STEPS"] }"#).unwrap();

        let source = SyntheticHealthSource::from_fixture_file(&path).unwrap();
        assert_eq!(source.read_dataset().unwrap().granted.len(), 1);
        assert!(SyntheticHealthSource::from_fixture_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_malformed_fixture_rejected() {
        let error = SyntheticHealthSource::from_json("{ not json").unwrap_err();
        assert!(matches!(error, HealthSourceError::InvalidRequest { .. }));
    }
}
