// ABOUTME: Sleep summary models for the night preceding a snapshot date
// ABOUTME: SleepRecord, SleepStageDuration, and SleepStageKind definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Types of sleep stages
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SleepStageKind {
    /// Awake during the session
    Awake,
    /// Light sleep
    Light,
    /// Deep sleep
    Deep,
    /// REM sleep
    Rem,
    /// Stage code the platform reported but we do not recognize
    Unknown,
}

impl SleepStageKind {
    /// Map a platform stage code; unrecognized codes become `Unknown`
    #[must_use]
    pub fn from_platform_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "AWAKE" => Self::Awake,
            "LIGHT" => Self::Light,
            "DEEP" => Self::Deep,
            "REM" => Self::Rem,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the stage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Awake => "AWAKE",
            Self::Light => "LIGHT",
            Self::Deep => "DEEP",
            Self::Rem => "REM",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SleepStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time spent in one stage entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStageDuration {
    /// Stage type
    pub stage: SleepStageKind,
    /// Whole minutes spent in the stage
    pub duration_minutes: u32,
}

/// Sleep summary for one night
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Total session time in whole minutes
    pub total_minutes: u32,
    /// Stage entries of every session, in platform order
    pub stages: Vec<SleepStageDuration>,
}

impl SleepRecord {
    /// Minutes covered by stage entries
    #[must_use]
    pub fn staged_minutes(&self) -> u32 {
        self.stages.iter().map(|s| s.duration_minutes).sum()
    }

    /// Total minutes per stage type, ordered by stage
    #[must_use]
    pub fn stage_summary(&self) -> BTreeMap<SleepStageKind, u32> {
        let mut summary = BTreeMap::new();
        for stage in &self.stages {
            *summary.entry(stage.stage).or_insert(0) += stage.duration_minutes;
        }
        summary
    }

    /// Minutes the stage entries leave unaccounted for (untracked or gaps)
    #[must_use]
    pub fn untracked_minutes(&self) -> u32 {
        self.total_minutes.saturating_sub(self.staged_minutes())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_platform_code_mapping() {
        assert_eq!(SleepStageKind::from_platform_code("DEEP"), SleepStageKind::Deep);
        assert_eq!(SleepStageKind::from_platform_code("rem"), SleepStageKind::Rem);
        assert_eq!(
            SleepStageKind::from_platform_code("UNDEFINED"),
            SleepStageKind::Unknown
        );
        assert_eq!(SleepStageKind::from_platform_code(""), SleepStageKind::Unknown);
    }

    #[test]
    fn test_stage_summary_and_gaps() {
        let record = SleepRecord {
            total_minutes: 420,
            stages: vec![
                SleepStageDuration {
                    stage: SleepStageKind::Light,
                    duration_minutes: 200,
                },
                SleepStageDuration {
                    stage: SleepStageKind::Deep,
                    duration_minutes: 90,
                },
                SleepStageDuration {
                    stage: SleepStageKind::Light,
                    duration_minutes: 100,
                },
            ],
        };
        let summary = record.stage_summary();
        assert_eq!(summary.get(&SleepStageKind::Light), Some(&300));
        assert_eq!(summary.get(&SleepStageKind::Deep), Some(&90));
        assert_eq!(record.untracked_minutes(), 30);
    }

    #[test]
    fn test_stage_serializes_uppercase() {
        let json = serde_json::to_string(&SleepStageKind::Rem).unwrap();
        assert_eq!(json, "\"REM\"");
    }
}
