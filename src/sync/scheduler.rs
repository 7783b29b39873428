// ABOUTME: Periodic job scheduler with deduplicated registration and a minimum interval
// ABOUTME: Runs each job on a tokio interval, logging failed ticks and continuing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Periodic Job Scheduler
//!
//! Jobs are identified by name. Registering a name that is already scheduled with
//! [`ExistingJobPolicy::Keep`] leaves the running job untouched. Intervals below the
//! platform floor of 15 minutes are raised to the floor. The first tick runs
//! immediately; a failing tick is logged and counted and the next tick proceeds.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::constants::sync::MIN_SYNC_INTERVAL_SECS;
use crate::errors::AppResult;

/// Work executed on every tick
#[async_trait]
pub trait PeriodicJob: Send + Sync {
    /// Unique job name used for deduplication
    fn name(&self) -> &str;

    /// Execute one tick
    async fn run(&self) -> AppResult<()>;
}

/// What to do when a job with the same name is already scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingJobPolicy {
    /// Leave the scheduled job running and ignore the new registration
    Keep,
    /// Cancel the scheduled job and start the new one
    Replace,
}

/// Result of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The job was started
    Scheduled,
    /// A job with this name was already running and was kept
    AlreadyScheduled,
    /// A running job with this name was cancelled and replaced
    Replaced,
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick completed
    Succeeded,
    /// The tick failed with this message
    Failed(String),
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Run history of a scheduled job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    /// Effective interval after applying the floor
    pub interval: Duration,
    /// Ticks executed
    pub runs: u64,
    /// Ticks that failed
    pub failures: u64,
    /// Outcome of the latest tick
    pub last_outcome: Option<TickOutcome>,
    /// Start time of the latest tick
    pub last_run_at: Option<DateTime<Utc>>,
}

impl JobStatus {
    const fn new(interval: Duration) -> Self {
        Self {
            interval,
            runs: 0,
            failures: 0,
            last_outcome: None,
            last_run_at: None,
        }
    }
}

struct ScheduledJob {
    handle: JoinHandle<()>,
    status: Arc<RwLock<JobStatus>>,
}

/// Schedules named periodic jobs on the Tokio runtime
pub struct JobScheduler {
    jobs: DashMap<String, ScheduledJob>,
    min_interval: Duration,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler {
    /// Scheduler enforcing the 15 minute floor
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            min_interval: Duration::from_secs(MIN_SYNC_INTERVAL_SECS),
        }
    }

    /// Interval actually used for a requested interval
    #[must_use]
    pub fn effective_interval(&self, requested: Duration) -> Duration {
        requested.max(self.min_interval)
    }

    /// Register `job` to run every `period`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn register_periodic(
        &self,
        job: Arc<dyn PeriodicJob>,
        period: Duration,
        policy: ExistingJobPolicy,
    ) -> Registration {
        let name = job.name().to_owned();
        let effective = self.effective_interval(period);
        if effective != period {
            warn!(
                job = %name,
                requested_secs = period.as_secs(),
                effective_secs = effective.as_secs(),
                "Periodic interval below platform minimum, raised"
            );
        }

        let registration = match self.jobs.entry(name.clone()) {
            Entry::Occupied(mut occupied) => {
                let running = !occupied.get().handle.is_finished();
                if running && policy == ExistingJobPolicy::Keep {
                    info!(job = %name, "Periodic job already scheduled, keeping existing");
                    return Registration::AlreadyScheduled;
                }
                occupied.get().handle.abort();
                occupied.insert(spawn_job(job, effective));
                if running {
                    Registration::Replaced
                } else {
                    Registration::Scheduled
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(spawn_job(job, effective));
                Registration::Scheduled
            }
        };

        info!(job = %name, interval_secs = effective.as_secs(), ?registration, "Periodic job registered");
        registration
    }

    /// Whether a job with this name is scheduled and running
    #[must_use]
    pub fn is_scheduled(&self, name: &str) -> bool {
        self.jobs
            .get(name)
            .is_some_and(|job| !job.handle.is_finished())
    }

    /// Run history of a job
    pub async fn status(&self, name: &str) -> Option<JobStatus> {
        let status = self.jobs.get(name).map(|job| Arc::clone(&job.status))?;
        let snapshot = status.read().await.clone();
        Some(snapshot)
    }

    /// Cancel a job; returns whether it existed
    pub fn cancel(&self, name: &str) -> bool {
        self.jobs.remove(name).is_some_and(|(_, job)| {
            job.handle.abort();
            info!(job = %name, "Periodic job cancelled");
            true
        })
    }

    /// Cancel every job
    pub fn shutdown(&self) {
        let names: Vec<String> = self.jobs.iter().map(|job| job.key().clone()).collect();
        for name in names {
            self.cancel(&name);
        }
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        for job in self.jobs.iter() {
            job.handle.abort();
        }
    }
}

fn spawn_job(job: Arc<dyn PeriodicJob>, period: Duration) -> ScheduledJob {
    let status = Arc::new(RwLock::new(JobStatus::new(period)));
    let handle = tokio::spawn(run_periodic(job, period, Arc::clone(&status)));
    ScheduledJob { handle, status }
}

async fn run_periodic(job: Arc<dyn PeriodicJob>, period: Duration, status: Arc<RwLock<JobStatus>>) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;
        let started_at = Utc::now();
        let outcome = match job.run().await {
            Ok(()) => {
                info!(job = job.name(), "Periodic job tick completed");
                TickOutcome::Succeeded
            }
            Err(e) => {
                // Continue on the next tick; the failure is recorded in the status
                error!(job = job.name(), error = %e, "Periodic job tick failed");
                TickOutcome::Failed(e.to_string())
            }
        };

        let mut current = status.write().await;
        current.runs += 1;
        if matches!(outcome, TickOutcome::Failed(_)) {
            current.failures += 1;
        }
        current.last_outcome = Some(outcome);
        current.last_run_at = Some(started_at);
    }
}
