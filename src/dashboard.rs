// ABOUTME: Dashboard controller tracking permissions, the selected date and its snapshot
// ABOUTME: Maps health platform failures to an error view without retrying denied permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Dashboard Controller
//!
//! Holds the state a dashboard view renders: whether permissions were requested and
//! granted, the date the user is browsing and its snapshot, and the last health error.
//! The dashboard always targets the user-selected date and never uploads; uploads
//! belong to the periodic sync job, which always targets today.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, ErrorCode, HealthSourceError};
use crate::models::{HealthSnapshot, SleepRecord, SleepStageKind};
use crate::snapshot::SnapshotBuilder;

/// Health error shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthErrorView {
    /// Error classification
    pub code: ErrorCode,
    /// Message for the user
    pub message: String,
    /// Whether the platform offers a resolution (permission prompt, app update)
    pub resolvable: bool,
}

impl From<&AppError> for HealthErrorView {
    fn from(error: &AppError) -> Self {
        let resolvable = error
            .source
            .as_ref()
            .and_then(|source| source.downcast_ref::<HealthSourceError>())
            .map_or(error.is_permission_denied(), HealthSourceError::is_resolvable);
        Self {
            code: error.code,
            message: error.message.clone(),
            resolvable,
        }
    }
}

/// Figures the step progress bar and the sleep card render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Steps over goal, 0.0 without a goal and above 1.0 once the goal is exceeded
    pub goal_progress: f64,
    /// Goal set and reached
    pub goal_reached: bool,
    /// Total sleep minutes, 0 without a sleep record
    pub sleep_minutes: u32,
    /// Minutes per stage type
    pub stage_minutes: BTreeMap<SleepStageKind, u32>,
}

impl DailySummary {
    /// Summary of `snapshot`
    #[must_use]
    pub fn of(snapshot: &HealthSnapshot) -> Self {
        Self {
            goal_progress: snapshot.steps.goal_progress(),
            goal_reached: snapshot.steps.goal_reached(),
            sleep_minutes: snapshot.sleep.as_ref().map_or(0, |sleep| sleep.total_minutes),
            stage_minutes: snapshot
                .sleep
                .as_ref()
                .map(SleepRecord::stage_summary)
                .unwrap_or_default(),
        }
    }
}

/// Everything the dashboard view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    /// A permission prompt is pending
    pub permission_requested: bool,
    /// Every required permission is granted
    pub permissions_granted: bool,
    /// Date the user is browsing
    pub selected_date: NaiveDate,
    /// Snapshot of the selected date (empty until loaded)
    pub snapshot: HealthSnapshot,
    /// Summary of `snapshot`
    pub summary: DailySummary,
    /// Latest health error, cleared by a successful load
    pub error: Option<HealthErrorView>,
}

impl DashboardState {
    fn initial(date: NaiveDate) -> Self {
        let snapshot = HealthSnapshot::empty(date);
        Self {
            permission_requested: false,
            permissions_granted: false,
            selected_date: date,
            summary: DailySummary::of(&snapshot),
            snapshot,
            error: None,
        }
    }

    fn show(&mut self, snapshot: HealthSnapshot) {
        self.summary = DailySummary::of(&snapshot);
        self.snapshot = snapshot;
    }
}

/// Drives the dashboard state
pub struct DashboardController {
    builder: SnapshotBuilder,
    state: RwLock<DashboardState>,
}

impl DashboardController {
    /// Controller browsing `initial_date`
    #[must_use]
    pub fn new(builder: SnapshotBuilder, initial_date: NaiveDate) -> Self {
        Self {
            builder,
            state: RwLock::new(DashboardState::initial(initial_date)),
        }
    }

    /// Copy of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Ask the platform which permissions are granted; loads the snapshot when they all are
    pub async fn check_permissions(&self) -> DashboardState {
        match self.builder.source().has_required_permissions().await {
            Ok(granted) => {
                {
                    let mut state = self.state.write().await;
                    state.permission_requested = !granted;
                    state.permissions_granted = granted;
                }
                if granted {
                    return self.refresh().await;
                }
                info!("Health permissions not granted so far");
            }
            Err(error) => self.record_error(&AppError::from(error)).await,
        }
        self.state().await
    }

    /// Outcome of the platform permission prompt
    ///
    /// A refusal leaves the dashboard in the not-granted state without re-prompting.
    pub async fn user_accepted_permissions(&self, agreed: bool) -> DashboardState {
        {
            let mut state = self.state.write().await;
            state.permission_requested = false;
            state.permissions_granted = agreed;
        }
        if agreed {
            self.refresh().await
        } else {
            info!("User declined health permissions");
            self.state().await
        }
    }

    /// Browse another date and load its snapshot
    pub async fn select_date(&self, date: NaiveDate) -> DashboardState {
        {
            let mut state = self.state.write().await;
            state.selected_date = date;
            state.show(HealthSnapshot::empty(date));
        }
        self.refresh().await
    }

    /// Reload the snapshot of the selected date
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> DashboardState {
        let date = self.state.read().await.selected_date;
        let result = self.builder.build_snapshot(date).await;

        let mut state = self.state.write().await;
        if state.selected_date != date {
            // The user moved on while this load was in flight
            return state.clone();
        }
        match result {
            Ok(snapshot) => {
                state.show(snapshot);
                state.error = None;
            }
            Err(error) => {
                warn!(%date, %error, "Dashboard snapshot failed");
                if error.is_permission_denied() {
                    state.permissions_granted = false;
                }
                state.error = Some(HealthErrorView::from(&error));
            }
        }
        state.clone()
    }

    async fn record_error(&self, error: &AppError) {
        warn!(%error, "Health platform error");
        let mut state = self.state.write().await;
        if error.is_permission_denied() {
            state.permissions_granted = false;
        }
        state.error = Some(HealthErrorView::from(error));
    }
}
