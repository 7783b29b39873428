// ABOUTME: Wire payloads for health data sent to the chat backend and stored as daily logs
// ABOUTME: Converts HealthSnapshot into exercise_data / sleep_data documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::HealthSnapshot;
use crate::constants::health_log::EXERCISE_TYPE_STEPS_DAILY;
use crate::errors::AppResult;

/// Step statistics of a daily exercise entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Total steps for the day
    pub total_steps: u64,
    /// Step goal for the day
    pub goal: u32,
    /// Steps per hour-of-day (`"0"` to `"23"`)
    pub hourly_steps: BTreeMap<String, u64>,
}

/// One entry of `exercise_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Entry tag, always `STEPS_DAILY` for step summaries
    pub exercise_type: String,
    /// Step statistics
    pub stats: StepStats,
}

/// One stage of `sleep_data.stages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStagePayload {
    /// Stage name (`AWAKE`, `LIGHT`, `DEEP`, `REM`, `UNKNOWN`)
    pub stage: String,
    /// Whole minutes in the stage
    pub duration_minutes: u32,
}

/// `sleep_data` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepPayload {
    /// Total sleep minutes
    pub duration_minutes: u32,
    /// Stage breakdown
    pub stages: Vec<SleepStagePayload>,
}

/// Health data in wire form (`healthData` in chat requests, fields of a health log)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDataPayload {
    /// Exercise entries; a snapshot produces exactly one `STEPS_DAILY` entry
    pub exercise_data: Vec<ExerciseEntry>,
    /// Sleep summary, omitted when no sleep was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_data: Option<SleepPayload>,
}

/// Fields merged into `users/{user}/health_logs/{date}`
pub type HealthLogDocument = HealthDataPayload;

impl HealthDataPayload {
    /// Top-level fields for a merge-write
    ///
    /// The store assigns `timestamp` itself, so it is not part of the map.
    pub fn to_fields(&self) -> AppResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Ok(Map::new()),
        }
    }
}

impl From<&HealthSnapshot> for HealthDataPayload {
    fn from(snapshot: &HealthSnapshot) -> Self {
        let mut hourly_steps = BTreeMap::new();
        for bucket in &snapshot.steps.hourly_buckets {
            *hourly_steps.entry(bucket.hour_key()).or_insert(0) += bucket.count;
        }

        let steps_entry = ExerciseEntry {
            exercise_type: EXERCISE_TYPE_STEPS_DAILY.to_owned(),
            stats: StepStats {
                total_steps: snapshot.steps.total_count,
                goal: snapshot.steps.goal,
                hourly_steps,
            },
        };

        let sleep_data = snapshot.sleep.as_ref().map(|sleep| SleepPayload {
            duration_minutes: sleep.total_minutes,
            stages: sleep
                .stages
                .iter()
                .map(|s| SleepStagePayload {
                    stage: s.stage.as_str().to_owned(),
                    duration_minutes: s.duration_minutes,
                })
                .collect(),
        });

        Self {
            exercise_data: vec![steps_entry],
            sleep_data,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{
        DailyStepRecord, HourlyStepBucket, SleepRecord, SleepStageDuration, SleepStageKind,
    };
    use chrono::NaiveDate;

    fn snapshot(with_sleep: bool) -> HealthSnapshot {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let hour = |h| date.and_hms_opt(h, 0, 0).unwrap();
        HealthSnapshot {
            date,
            steps: DailyStepRecord {
                total_count: 3200,
                goal: 6000,
                hourly_buckets: vec![
                    HourlyStepBucket::new(hour(7), 1200),
                    HourlyStepBucket::new(hour(18), 2000),
                ],
            },
            sleep: with_sleep.then(|| SleepRecord {
                total_minutes: 400,
                stages: vec![SleepStageDuration {
                    stage: SleepStageKind::Deep,
                    duration_minutes: 80,
                }],
            }),
        }
    }

    #[test]
    fn test_payload_shape() {
        let value = serde_json::to_value(snapshot(true).to_payload()).unwrap();
        let entry = &value["exercise_data"][0];
        assert_eq!(entry["exercise_type"], "STEPS_DAILY");
        assert_eq!(entry["stats"]["total_steps"], 3200);
        assert_eq!(entry["stats"]["goal"], 6000);
        assert_eq!(entry["stats"]["hourly_steps"]["7"], 1200);
        assert_eq!(entry["stats"]["hourly_steps"]["18"], 2000);
        assert_eq!(value["sleep_data"]["duration_minutes"], 400);
        assert_eq!(value["sleep_data"]["stages"][0]["stage"], "DEEP");
    }

    #[test]
    fn test_sleep_omitted_when_absent() {
        let fields = snapshot(false).to_payload().to_fields().unwrap();
        assert!(fields.contains_key("exercise_data"));
        assert!(!fields.contains_key("sleep_data"));
        assert!(!fields.contains_key("timestamp"));
    }

    #[test]
    fn test_exercise_entry_carries_only_type_and_stats() {
        let value = serde_json::to_value(snapshot(false).to_payload()).unwrap();
        let mut keys: Vec<_> = value["exercise_data"][0]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        assert_eq!(keys, ["exercise_type", "stats"]);
    }
}
