// ABOUTME: Daily health snapshot builder over a HealthDataSource
// ABOUTME: Queries step goal, totals, hourly buckets and the previous night's sleep for a date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Daily Health Snapshot Builder
//!
//! [`SnapshotBuilder::build_snapshot`] assembles a [`HealthSnapshot`] for one calendar date:
//!
//! - steps over `[date 00:00, date+1 00:00)`, as a total and hourly buckets
//! - the step goal in effect on the date
//! - sleep sessions ending in `[date-1 12:00, date 12:00)`, flattened into one stage list
//!
//! ## Error policy
//!
//! A permission denial from any query is returned as `ErrorCode::PermissionDenied` so the
//! caller can prompt for authorization. Every other failure degrades: a zero step record,
//! a zero goal, or no sleep record. The builder holds no state and is safe to call
//! concurrently for different dates.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};
use wellness_providers::{HealthDataSource, PlatformSleepSession, TimeRange};

use crate::errors::{AppResult, HealthSourceError, SourceResult};
use crate::models::{
    DailyStepRecord, HealthSnapshot, SleepRecord, SleepStageDuration, SleepStageKind,
};

/// Builds daily snapshots from a health data source
#[derive(Clone)]
pub struct SnapshotBuilder {
    source: Arc<dyn HealthDataSource>,
}

impl SnapshotBuilder {
    /// Create a builder reading from `source`
    #[must_use]
    pub fn new(source: Arc<dyn HealthDataSource>) -> Self {
        Self { source }
    }

    /// The underlying data source
    #[must_use]
    pub fn source(&self) -> &Arc<dyn HealthDataSource> {
        &self.source
    }

    /// Build the snapshot for `date`
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::PermissionDenied` if the platform refused any of the reads.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn build_snapshot(&self, date: NaiveDate) -> AppResult<HealthSnapshot> {
        let day = TimeRange::day(date);
        let night = TimeRange::sleep_night(date);

        let (steps, sleep) = tokio::join!(self.read_steps(date, &day), self.read_sleep(&night));

        Ok(HealthSnapshot {
            date,
            steps: steps?,
            sleep: sleep?,
        })
    }

    async fn read_steps(&self, date: NaiveDate, day: &TimeRange) -> AppResult<DailyStepRecord> {
        let (goal, total, buckets) = tokio::join!(
            self.source.get_step_goal(date),
            self.source.get_step_total(day),
            self.source.get_hourly_step_buckets(day),
        );

        let goal = degrade(goal, "step goal")?.flatten().unwrap_or(0);

        // Total and breakdown degrade together so a partial failure cannot
        // produce buckets that disagree with the total
        let total = degrade(total, "step total")?;
        let buckets = degrade(buckets, "hourly steps")?;
        let (total_count, hourly_buckets) = match (total, buckets) {
            (Some(total), Some(buckets)) => (total, buckets),
            _ => (0, Vec::new()),
        };

        let record = DailyStepRecord {
            total_count,
            goal,
            hourly_buckets,
        };
        if !record.is_consistent() {
            debug!(
                %day,
                total = record.total_count,
                hourly_sum = record.hourly_sum(),
                "Platform hourly breakdown differs from the daily total"
            );
        }
        Ok(record)
    }

    async fn read_sleep(&self, night: &TimeRange) -> AppResult<Option<SleepRecord>> {
        let sessions = degrade(self.source.get_sleep_sessions(night).await, "sleep sessions")?;
        Ok(sessions.and_then(|sessions| summarize_sleep(&sessions)))
    }
}

/// Convert a query result into a degraded value, surfacing only permission denial
///
/// `Ok(None)` means the query failed for a non-permission reason and the caller
/// should fall back to its empty value.
fn degrade<T>(result: SourceResult<T>, what: &str) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_permission_denied() => Err(error.into()),
        Err(error @ HealthSourceError::DataUnavailable { .. }) => {
            debug!(query = what, %error, "No data, using empty value");
            Ok(None)
        }
        Err(error) => {
            warn!(query = what, %error, "Health platform query failed, using empty value");
            Ok(None)
        }
    }
}

/// Flatten platform sleep sessions into one record; `None` when there are no sessions
///
/// Session totals and stage durations are whole minutes (floor) of the reported
/// instants, clamped at zero. Stage entries keep the order the platform reported them in.
#[must_use]
pub fn summarize_sleep(sessions: &[PlatformSleepSession]) -> Option<SleepRecord> {
    if sessions.is_empty() {
        return None;
    }

    let mut total_minutes: u32 = 0;
    let mut stages = Vec::new();
    for session in sessions {
        total_minutes = total_minutes.saturating_add(whole_minutes(session.start, session.end));

        stages.extend(session.stages.iter().map(|stage| SleepStageDuration {
            stage: SleepStageKind::from_platform_code(&stage.code),
            duration_minutes: whole_minutes(stage.start, stage.end),
        }));
    }

    Some(SleepRecord {
        total_minutes,
        stages,
    })
}

/// Whole minutes from `start` to `end`, zero when `end` precedes `start`
fn whole_minutes(start: chrono::NaiveDateTime, end: chrono::NaiveDateTime) -> u32 {
    let minutes = (end - start).num_minutes().max(0);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::NaiveDateTime;
    use wellness_providers::PlatformSleepStage;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn stage(code: &str, start: NaiveDateTime, end: NaiveDateTime) -> PlatformSleepStage {
        PlatformSleepStage {
            code: code.to_owned(),
            start,
            end,
        }
    }

    #[test]
    fn test_whole_minutes_floors_and_clamps() {
        assert_eq!(whole_minutes(at(1, 23, 0, 0), at(1, 23, 59, 59)), 59);
        assert_eq!(whole_minutes(at(1, 23, 0, 0), at(1, 22, 0, 0)), 0);
    }

    #[test]
    fn test_summarize_sleep_flattens_sessions() {
        let sessions = vec![
            PlatformSleepSession {
                start: at(1, 22, 0, 0),
                end: at(2, 2, 0, 0),
                stages: vec![
                    stage("DEEP", at(1, 23, 0, 0), at(2, 0, 30, 0)),
                    stage("LIGHT", at(1, 22, 0, 0), at(1, 23, 0, 0)),
                ],
            },
            PlatformSleepSession {
                start: at(2, 3, 0, 0),
                end: at(2, 6, 30, 0),
                stages: vec![stage("mystery", at(2, 3, 0, 0), at(2, 3, 45, 30))],
            },
        ];

        let record = summarize_sleep(&sessions).unwrap();
        assert_eq!(record.total_minutes, 240 + 210);
        let stages: Vec<_> = record
            .stages
            .iter()
            .map(|s| (s.stage, s.duration_minutes))
            .collect();
        assert_eq!(
            stages,
            vec![
                (SleepStageKind::Deep, 90),
                (SleepStageKind::Light, 60),
                (SleepStageKind::Unknown, 45)
            ]
        );
    }

    #[test]
    fn test_stage_durations_use_reported_instants() {
        let sessions = vec![PlatformSleepSession {
            start: at(1, 23, 0, 0),
            end: at(2, 1, 0, 0),
            stages: vec![
                stage("REM", at(2, 0, 0, 0), at(2, 1, 30, 0)),
                stage("LIGHT", at(1, 22, 30, 0), at(1, 23, 30, 0)),
                stage("AWAKE", at(2, 1, 0, 0), at(2, 0, 50, 0)),
            ],
        }];
        let record = summarize_sleep(&sessions).unwrap();
        assert_eq!(record.total_minutes, 120);
        let stages: Vec<_> = record
            .stages
            .iter()
            .map(|s| (s.stage.as_str(), s.duration_minutes))
            .collect();
        assert_eq!(stages, vec![("REM", 90), ("LIGHT", 60), ("AWAKE", 0)]);
    }

    #[test]
    fn test_no_sessions_means_no_record() {
        assert!(summarize_sleep(&[]).is_none());
    }

    #[test]
    fn test_degrade_policy() {
        let denied: SourceResult<u64> = Err(HealthSourceError::permission_denied("STEPS"));
        assert!(degrade(denied, "steps").unwrap_err().is_permission_denied());

        let missing: SourceResult<u64> = Err(HealthSourceError::data_unavailable("STEPS"));
        assert_eq!(degrade(missing, "steps").unwrap(), None);

        let broken: SourceResult<u64> = Err(HealthSourceError::platform("boom"));
        assert_eq!(degrade(broken, "steps").unwrap(), None);

        assert_eq!(degrade(Ok(5_u64), "steps").unwrap(), Some(5));
    }
}
