// ABOUTME: Scheduling constants for the periodic health-log sync job
// ABOUTME: Interval floor and job identity shared by the scheduler and configuration

/// Platform-imposed minimum period of a periodic job (15 minutes)
pub const MIN_SYNC_INTERVAL_SECS: u64 = 900;

/// Default sync period in minutes
pub const DEFAULT_SYNC_INTERVAL_MINUTES: u64 = 15;

/// Unique name of the health-log sync job; re-registration under this name is a no-op
pub const HEALTH_DATA_SYNC_JOB: &str = "HealthDataSyncWorker";
