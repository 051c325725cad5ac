//! Error types for schedule rules evaluation.
//!
//! Checkers and the evaluator never fail: their inputs are typed and
//! already validated. Errors arise only at the boundary, when raw
//! strings or JSON payloads are turned into those types, and when a
//! rules configuration is rejected on save.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors produced while parsing inputs or persisting configurations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A time string is not `HH:MM` (or `HH:MM:SS`).
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    /// A time slot does not end after it starts.
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidTimeRange { start: String, end: String },

    /// Unknown weekday name.
    #[error("Invalid day '{value}'")]
    InvalidDay { value: String },

    /// A rules configuration failed validation.
    #[error("Invalid rules configuration: {}", errors.join("; "))]
    InvalidConfig { errors: Vec<String> },

    /// Payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration or data file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Whether the error was caused by malformed input data
    /// (as opposed to a rejected configuration or an I/O failure).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidTime { .. }
                | ScheduleError::InvalidTimeRange { .. }
                | ScheduleError::InvalidDay { .. }
                | ScheduleError::Json(_)
        )
    }
}
