// ABOUTME: Deterministic health datasets for integration tests
// ABOUTME: Builds a synthetic source with known steps, goals and sleep sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use wellness_providers::{PlatformSleepSession, PlatformSleepStage, SyntheticHealthSource};

/// Day with steps, a goal and a staged night of sleep
pub const SAMPLE_DAY: (i32, u32, u32) = (2025, 6, 2);

/// Steps recorded on the sample day
pub const SAMPLE_DAY_STEPS: u64 = 7600;

/// Goal in effect on the sample day
pub const SAMPLE_GOAL: u32 = 8000;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn sample_day() -> NaiveDate {
    date(SAMPLE_DAY.0, SAMPLE_DAY.1, SAMPLE_DAY.2)
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

fn stage(code: &str, start: NaiveDateTime, end: NaiveDateTime) -> PlatformSleepStage {
    PlatformSleepStage {
        code: code.to_owned(),
        start,
        end,
    }
}

/// Source populated around the sample day
///
/// - sample day: 7600 steps over hours 7, 12, 18 and 23, goal 8000 (set 2025-05-20)
/// - night before the sample day: one 450 minute session with five stages (420 staged)
/// - afternoon nap on the sample day: belongs to the following day's night
/// - neighbouring days: a few steps just outside the sample day window
pub fn populated_source() -> SyntheticHealthSource {
    let source = SyntheticHealthSource::new();
    let day = sample_day();
    let previous = date(2025, 6, 1);
    let next = date(2025, 6, 3);

    source.set_step_goal(date(2025, 5, 20), SAMPLE_GOAL).unwrap();

    source.add_steps(at(previous, 23, 30), 400).unwrap();
    source.add_steps(at(day, 7, 10), 1200).unwrap();
    source.add_steps(at(day, 7, 40), 800).unwrap();
    source.add_steps(at(day, 12, 5), 3000).unwrap();
    source.add_steps(at(day, 18, 30), 2500).unwrap();
    source.add_steps(at(day, 23, 59), 100).unwrap();
    source.add_steps(at(next, 0, 0), 500).unwrap();

    source
        .add_sleep_session(PlatformSleepSession {
            start: at(previous, 23, 0),
            end: at(day, 6, 30),
            stages: vec![
                stage("LIGHT", at(previous, 23, 0), at(day, 1, 0)),
                stage("DEEP", at(day, 1, 0), at(day, 2, 30)),
                stage("REM", at(day, 2, 30), at(day, 3, 15)),
                stage("AWAKE", at(day, 3, 15), at(day, 3, 20)),
                stage("LIGHT", at(day, 3, 20), at(day, 6, 0)),
            ],
        })
        .unwrap();
    source
        .add_sleep_session(PlatformSleepSession {
            start: at(day, 13, 0),
            end: at(day, 13, 40),
            stages: Vec::new(),
        })
        .unwrap();

    source
}

/// Path of a JSON fixture under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
