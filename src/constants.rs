//! Constants used throughout the application.
//!
//! This module contains all constants used in the wellspring application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "wellspring";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "A wellness companion for mood journaling, sleep tracking and guided exercises";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_WELLSPRING_DIR: &str = "WELLSPRING_DIR";
/// Environment variable for specifying the SQLite store file.
pub const ENV_VAR_WELLSPRING_DB: &str = "WELLSPRING_DB";
/// Environment variable for the nightly sleep goal in hours.
pub const ENV_VAR_WELLSPRING_SLEEP_GOAL: &str = "WELLSPRING_SLEEP_GOAL";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for application data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/wellspring";
/// Default file name of the SQLite store inside the data directory.
pub const DEFAULT_DB_FILENAME: &str = "wellspring.db";
/// Default nightly sleep goal in hours.
pub const DEFAULT_SLEEP_GOAL_HOURS: f64 = 8.0;
/// Sleep quality recorded when none is given.
pub const DEFAULT_SLEEP_QUALITY: &str = "Good";
/// Upper bound accepted for the sleep goal.
pub const MAX_SLEEP_GOAL_HOURS: f64 = 24.0;

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Store Keys
/// Store key holding the serialized mood journal list.
pub const MOOD_ENTRIES_KEY: &str = "mood_entries";
/// Store key holding the serialized sleep log.
pub const SLEEP_ENTRIES_KEY: &str = "sleep_entries";
/// Prefix of the per-entry audio locator keys.
pub const AUDIO_KEY_PREFIX: &str = "audio_";
/// Infix used when quarantining an unparseable value.
pub const CORRUPT_KEY_INFIX: &str = ".corrupt.";

// Analytics
/// Number of most recent entries considered by the insight heuristics.
pub const INSIGHT_WINDOW: usize = 7;
/// Happy entries within the window that trigger a positive-trend insight.
pub const HAPPY_TREND_THRESHOLD: usize = 4;
/// Calm entries within the window that trigger a positive-trend insight.
pub const CALM_TREND_THRESHOLD: usize = 3;
/// Anxious entries within the window that trigger a caution insight.
pub const ANXIOUS_CAUTION_THRESHOLD: usize = 3;
/// Sad entries within the window that trigger a support suggestion.
pub const SAD_SUPPORT_THRESHOLD: usize = 4;
/// Lifetime entry count that triggers the milestone insight.
pub const MILESTONE_ENTRY_COUNT: usize = 7;
/// Default analytics period in days ("this week").
pub const DEFAULT_PERIOD_DAYS: i64 = 7;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "wellspring";
