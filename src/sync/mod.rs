// ABOUTME: Health data sync job uploading daily snapshots to the document store
// ABOUTME: Builds today's snapshot and merge-writes it under the user's health logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Health Data Sync
//!
//! [`SyncJob`] composes the snapshot builder and a [`DocumentStore`]: one run builds the
//! snapshot for a date and merge-writes it to `users/{user}/health_logs/{date}` with a
//! server-assigned `timestamp`. Runs are awaited and return an explicit result so the
//! [`JobScheduler`] can record failures.

/// Periodic job scheduler
pub mod scheduler;

pub use scheduler::{
    ExistingJobPolicy, JobScheduler, JobStatus, PeriodicJob, Registration, TickOutcome,
};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, instrument};

use crate::constants::health_log::TIMESTAMP_FIELD;
use crate::constants::sync::HEALTH_DATA_SYNC_JOB;
use crate::errors::AppResult;
use crate::snapshot::SnapshotBuilder;
use crate::store::{DocumentPath, DocumentStore};

/// Summary of one successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Snapshot date
    pub date: NaiveDate,
    /// Document written
    pub path: String,
    /// Top-level fields written, excluding the server timestamp
    pub fields_written: usize,
    /// Steps uploaded
    pub total_steps: u64,
    /// Whether a sleep record was uploaded
    pub has_sleep: bool,
}

/// Uploads daily snapshots for one user
#[derive(Clone)]
pub struct SyncJob {
    user_id: String,
    builder: SnapshotBuilder,
    store: Arc<dyn DocumentStore>,
}

impl SyncJob {
    /// Job uploading `user_id`'s snapshots built by `builder` into `store`
    pub fn new(
        user_id: impl Into<String>,
        builder: SnapshotBuilder,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            builder,
            store,
        }
    }

    /// Build and upload the snapshot for `date`
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` when the health platform refuses access, or the
    /// store's error when the upload fails.
    #[instrument(skip(self), fields(user.id = %self.user_id, store = self.store.name()))]
    pub async fn run_for(&self, date: NaiveDate) -> AppResult<SyncReport> {
        let snapshot = self.builder.build_snapshot(date).await?;
        let fields = snapshot.to_payload().to_fields()?;
        let path = DocumentPath::health_log(&self.user_id, date)?;

        let report = SyncReport {
            date,
            path: path.to_string(),
            fields_written: fields.len(),
            total_steps: snapshot.steps.total_count,
            has_sleep: snapshot.sleep.is_some(),
        };

        self.store
            .merge(&path, fields, Some(TIMESTAMP_FIELD))
            .await?;

        info!(
            sync.date = %date,
            sync.path = %report.path,
            sync.steps = report.total_steps,
            sync.has_sleep = report.has_sleep,
            "Health data uploaded"
        );
        Ok(report)
    }

    /// Build and upload the snapshot for the current local date
    ///
    /// # Errors
    ///
    /// Same as [`SyncJob::run_for`].
    pub async fn run_today(&self) -> AppResult<SyncReport> {
        self.run_for(Local::now().date_naive()).await
    }
}

#[async_trait]
impl PeriodicJob for SyncJob {
    fn name(&self) -> &str {
        HEALTH_DATA_SYNC_JOB
    }

    async fn run(&self) -> AppResult<()> {
        self.run_today().await.map(|_| ())
    }
}
