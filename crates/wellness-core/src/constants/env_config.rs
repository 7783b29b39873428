// ABOUTME: Environment variable names and default values for runtime configuration
// ABOUTME: Single source of truth for the environment-only configuration contract

/// Chat backend base URL
pub const CHAT_BASE_URL: &str = "WELLNESS_CHAT_BASE_URL";
/// Default chat backend base URL
pub const DEFAULT_CHAT_BASE_URL: &str = "http://localhost:8000";

/// Placeholder user id (no authentication)
pub const USER_ID: &str = "WELLNESS_USER_ID";
/// Default placeholder user id
pub const DEFAULT_USER_ID: &str = "user_1";

/// Sync period in minutes
pub const SYNC_INTERVAL_MINUTES: &str = "WELLNESS_SYNC_INTERVAL_MINUTES";

/// Firestore project id
pub const FIRESTORE_PROJECT_ID: &str = "WELLNESS_FIRESTORE_PROJECT_ID";
/// Firestore database id
pub const FIRESTORE_DATABASE: &str = "WELLNESS_FIRESTORE_DATABASE";
/// Default Firestore database id
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
/// Firestore REST root
pub const FIRESTORE_BASE_URL: &str = "WELLNESS_FIRESTORE_BASE_URL";
/// Default Firestore REST root
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
/// Optional bearer token for Firestore
pub const FIRESTORE_TOKEN: &str = "WELLNESS_FIRESTORE_TOKEN";

/// JSON dataset backing the synthetic health source
pub const HEALTH_FIXTURE: &str = "WELLNESS_HEALTH_FIXTURE";

/// Outbound HTTP request timeout in seconds
pub const HTTP_TIMEOUT_SECS: &str = "WELLNESS_HTTP_TIMEOUT_SECS";
/// Default outbound HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
