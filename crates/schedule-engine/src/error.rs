//! Error types for schedule-engine operations.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Appointment {id} ends before it starts")]
    InvertedInterval { id: String },

    #[error("Duplicate appointment id: {id}")]
    DuplicateId { id: String },

    #[error("No local midnight for {0}")]
    UnresolvableDay(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
