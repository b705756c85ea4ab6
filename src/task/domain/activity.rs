//! Append-only activity log entries derived from task mutations.

use super::{ActivityLogEntryId, ParseTaskEventTypeError, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of state-changing event recorded against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEventType {
    /// The task was created.
    TaskCreated,
    /// The status moved between two non-done statuses.
    StatusChanged,
    /// The task moved into [`TaskStatus::Done`].
    Completed,
    /// The task moved out of [`TaskStatus::Done`].
    Reopened,
    /// The description text changed.
    DescriptionUpdated,
}

impl TaskEventType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "TASK_CREATED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::Completed => "COMPLETED",
            Self::Reopened => "REOPENED",
            Self::DescriptionUpdated => "DESCRIPTION_UPDATED",
        }
    }
}

impl TryFrom<&str> for TaskEventType {
    type Error = ParseTaskEventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "TASK_CREATED" => Ok(Self::TaskCreated),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "COMPLETED" => Ok(Self::Completed),
            "REOPENED" => Ok(Self::Reopened),
            "DESCRIPTION_UPDATED" => Ok(Self::DescriptionUpdated),
            _ => Err(ParseTaskEventTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured before/after data attached to an activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityPayload {
    /// Snapshot of the initial task fields.
    Created {
        /// Title at creation.
        title: String,
        /// Status at creation.
        status: TaskStatus,
        /// Priority at creation.
        priority: TaskPriority,
    },
    /// Status before and after a transition.
    Transition {
        /// Previous status.
        from: TaskStatus,
        /// New status.
        to: TaskStatus,
    },
}

/// Single append-only record in a task's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskActivityLogEntry {
    id: ActivityLogEntryId,
    task_id: TaskId,
    event_type: TaskEventType,
    payload: Option<ActivityPayload>,
    timestamp: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityData {
    /// Persisted entry identifier.
    pub id: ActivityLogEntryId,
    /// Owning task.
    pub task_id: TaskId,
    /// Persisted event type.
    pub event_type: TaskEventType,
    /// Persisted payload, if any.
    pub payload: Option<ActivityPayload>,
    /// Persisted event timestamp.
    pub timestamp: DateTime<Utc>,
}

impl TaskActivityLogEntry {
    fn new(
        task_id: TaskId,
        event_type: TaskEventType,
        payload: Option<ActivityPayload>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityLogEntryId::new(),
            task_id,
            event_type,
            payload,
            timestamp,
        }
    }

    /// Records task creation with a snapshot of the initial fields.
    #[must_use]
    pub fn task_created(
        task_id: TaskId,
        title: &str,
        status: TaskStatus,
        priority: TaskPriority,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let payload = ActivityPayload::Created {
            title: title.to_owned(),
            status,
            priority,
        };
        Self::new(task_id, TaskEventType::TaskCreated, Some(payload), timestamp)
    }

    /// Records a status change, classifying it as completion, reopening,
    /// or a plain status change.
    ///
    /// Returns `None` when `from` and `to` are equal.
    #[must_use]
    pub fn status_transition(
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        if from == to {
            return None;
        }
        let event_type = if to == TaskStatus::Done {
            TaskEventType::Completed
        } else if from == TaskStatus::Done {
            TaskEventType::Reopened
        } else {
            TaskEventType::StatusChanged
        };
        let payload = ActivityPayload::Transition { from, to };
        Some(Self::new(task_id, event_type, Some(payload), timestamp))
    }

    /// Records a description edit. Carries no payload.
    #[must_use]
    pub fn description_updated(task_id: TaskId, timestamp: DateTime<Utc>) -> Self {
        Self::new(task_id, TaskEventType::DescriptionUpdated, None, timestamp)
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            event_type: data.event_type,
            payload: data.payload,
            timestamp: data.timestamp,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityLogEntryId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> TaskEventType {
        self.event_type
    }

    /// Returns the structured payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&ActivityPayload> {
        self.payload.as_ref()
    }

    /// Returns when the event happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
