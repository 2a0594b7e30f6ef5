//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default wait for a pool connection before giving up, in seconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default delay between batch status polls, in milliseconds
pub const DEFAULT_JUDGE_POLL_INTERVAL_MS: u64 = 1000;

/// Default maximum number of batch status polls before giving up
pub const DEFAULT_JUDGE_MAX_POLL_ATTEMPTS: u32 = 50;

// =============================================================================
// AI DEFAULTS
// =============================================================================

/// Default base URL for the generative model API
pub const DEFAULT_GEMINI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta";

/// Default fast/cheap model tier
pub const DEFAULT_GEMINI_FLASH_MODEL: &str = "gemini-2.5-flash";

/// Default higher-quality model tier
pub const DEFAULT_GEMINI_PRO_MODEL: &str = "gemini-2.5-pro";

/// Timeout for buffered generation requests, in seconds
pub const GEMINI_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Timeout for streaming generation requests, in seconds
pub const GEMINI_STREAM_TIMEOUT_SECS: u64 = 120;

/// Maximum number of escalating hint levels
pub const MAX_HINT_LEVEL: u32 = 3;

/// Reference solution language assumed when the caller names none
pub const DEFAULT_EXPLAIN_LANGUAGE: &str = "JAVASCRIPT";

/// How many conversation turns of chat history are kept in a prompt
pub const CHAT_HISTORY_WINDOW: usize = 6;

/// How many recent submissions feed the recommendation success rate
pub const RECENT_SUBMISSION_WINDOW: i64 = 10;

/// How many candidate problems a recommendation returns
pub const RECOMMENDATION_LIMIT: i64 = 5;

// =============================================================================
// PROBLEM DIFFICULTIES
// =============================================================================

/// Problem difficulty identifiers
pub mod difficulties {
    pub const EASY: &str = "EASY";
    pub const MEDIUM: &str = "MEDIUM";
    pub const HARD: &str = "HARD";

    /// All supported difficulties
    pub const ALL: &[&str] = &[EASY, MEDIUM, HARD];
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Aggregate submission statuses
pub mod statuses {
    pub const ACCEPTED: &str = "Accepted";
    pub const WRONG_ANSWER: &str = "Wrong Answer";
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum chat message length
pub const MAX_CHAT_MESSAGE_LENGTH: u64 = 4096;
