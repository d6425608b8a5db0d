//! Error type shared by the engine and config layers.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid ward '{0}' (expected e.g. \"Ward 7\")")]
    InvalidWard(String),
    #[error("invalid clock time '{0}' (expected e.g. \"6:00 AM\")")]
    InvalidTime(String),
    #[error("invalid time slot '{0}': {1}")]
    InvalidTimeSlot(String, String),
    #[error("invalid task status '{0}' (expected scheduled, in-progress or completed)")]
    InvalidStatus(String),
    #[error("{ward}: pickup days must be 3 distinct weekdays in 0..=6, got {days:?}")]
    InvalidPickupDays { ward: String, days: Vec<u8> },
    #[error("ward '{0}' appears more than once in the catalog")]
    DuplicateWard(String),
    #[error("default ward '{0}' is not in the catalog")]
    MissingDefaultWard(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
