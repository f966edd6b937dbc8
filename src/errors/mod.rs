//! Error handling utilities for the wellspring application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Every failure in wellspring is recoverable: errors return control to the
//! caller with a reported condition and never abort the process.

use std::io;
use thiserror::Error;

/// Represents the ways a new entry can be rejected before anything is persisted.
///
/// Validation runs synchronously ahead of every write, so a `ValidationError`
/// guarantees that neither the store nor the in-memory lists were touched.
///
/// # Examples
///
/// ```
/// use wellspring::errors::ValidationError;
///
/// let error = ValidationError::EmptyContent;
/// assert!(format!("{}", error).contains("text or an audio recording"));
///
/// let error = ValidationError::UnknownMood("grumpy".to_string());
/// assert!(format!("{}", error).contains("grumpy"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No mood was selected for a journal entry.
    #[error("A mood must be selected before saving a journal entry.")]
    MissingMood,

    /// Both the text and the audio channel are empty.
    #[error("A journal entry needs some text or an audio recording.")]
    EmptyContent,

    /// A mood name that is not part of the known set.
    #[error("Unknown mood '{0}'. Expected one of: happy, calm, neutral, sad, anxious, energetic.")]
    UnknownMood(String),

    /// Sleep duration that is zero, negative or not a number.
    #[error("Sleep hours must be a positive number, got {0}.")]
    InvalidSleepHours(f64),
}

/// Represents failures of the key-value store backing all persisted state.
///
/// # Examples
///
/// ```
/// use wellspring::errors::StoreError;
///
/// let error = StoreError::Backend("disk full".to_string());
/// assert!(format!("{}", error).contains("disk full"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database error.
    #[error("Database error: {0}\n\nIf you're seeing 'file is not a database' errors, the store file may be corrupted or was written by another program.")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other wellspring instances.")]
    Pool(#[from] r2d2::Error),

    /// A value could not be serialized before writing.
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        /// The key that was being written
        key: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure reported by a store implementation.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Represents failures reported by the external audio capability.
///
/// Audio failures are independent of the entry lists: a failed recording
/// never blocks saving a text-only entry.
///
/// # Examples
///
/// ```
/// use wellspring::errors::AudioError;
///
/// let error = AudioError::PermissionDenied;
/// assert!(format!("{}", error).contains("Microphone permission"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// The user declined the microphone permission prompt.
    #[error("Microphone permission was denied. Enable it in the system settings to record voice notes.")]
    PermissionDenied,

    /// The audio device is held by another application.
    #[error("The audio device is busy. Close other recording or playback apps and try again.")]
    DeviceBusy,

    /// `stop` was requested while nothing was recording.
    #[error("No recording is in progress.")]
    NoActiveRecording,

    /// A catch-all for other capability errors.
    #[error("Audio capability error: {0}")]
    Capability(String),
}

/// Represents all possible errors that can occur in the wellspring application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use wellspring::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from a validation error:
/// ```
/// use wellspring::errors::{AppError, ValidationError};
///
/// let app_error: AppError = ValidationError::MissingMood.into();
/// assert!(matches!(app_error, AppError::Validation(ValidationError::MissingMood)));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors in journal logic that are not tied to a single entry.
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// A new entry was rejected before persistence.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A persisted list could not be parsed.
    ///
    /// Callers recover by treating the list as empty; the raw value is kept.
    #[error("Stored data under '{key}' is corrupt and could not be read: {source}")]
    CorruptStore {
        /// The store key holding the unparseable value
        key: String,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A write to the store failed; in-memory state was left untouched.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// Errors raised by the external audio capability.
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use wellspring::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
