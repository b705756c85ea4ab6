//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The estimate is negative or not a finite number.
    #[error("invalid estimate {0} hours, expected a finite non-negative number")]
    InvalidEstimateHours(f64),
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing activity event types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task event type: {0}")]
pub struct ParseTaskEventTypeError(pub String);
