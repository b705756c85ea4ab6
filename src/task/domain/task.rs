//! Task aggregate root and the inputs that create and mutate it.

use super::{
    EstimateHours, ProjectId, TaskActivityLogEntry, TaskDomainError, TaskId, TaskLabels,
    TaskPriority, TaskStatus,
    fields::{normalize_description, normalize_title},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    labels: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    estimate_hours: Option<f64>,
}

impl NewTask {
    /// Creates an input with the required fields.
    ///
    /// Status defaults to [`TaskStatus::Todo`] and priority to
    /// [`TaskPriority::Medium`].
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            labels: Vec::new(),
            due_date: None,
            estimate_hours: None,
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the effort estimate in hours.
    #[must_use]
    pub const fn with_estimate_hours(mut self, hours: f64) -> Self {
        self.estimate_hours = Some(hours);
        self
    }
}

/// Partial update applied to an existing task.
///
/// Fields left unset are untouched. Nullable fields use a nested `Option`
/// where `Some(None)` clears the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskUpdate {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    labels: Option<Vec<String>>,
    due_date: Option<Option<DateTime<Utc>>>,
    estimate_hours: Option<Option<f64>>,
    blocked_reason: Option<Option<String>>,
}

impl TaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Moves the task to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces all labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets the effort estimate in hours.
    #[must_use]
    pub const fn with_estimate_hours(mut self, hours: f64) -> Self {
        self.estimate_hours = Some(Some(hours));
        self
    }

    /// Removes the effort estimate.
    #[must_use]
    pub const fn clear_estimate_hours(mut self) -> Self {
        self.estimate_hours = Some(None);
        self
    }

    /// Records why the task is blocked.
    #[must_use]
    pub fn with_blocked_reason(mut self, reason: impl Into<String>) -> Self {
        self.blocked_reason = Some(Some(reason.into()));
        self
    }

    /// Removes the blocked reason.
    #[must_use]
    pub fn clear_blocked_reason(mut self) -> Self {
        self.blocked_reason = Some(None);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    labels: TaskLabels,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    blocked_reason: Option<String>,
    estimate_hours: Option<EstimateHours>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted labels.
    pub labels: TaskLabels,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted blocked reason, if any.
    pub blocked_reason: Option<String>,
    /// Persisted estimate, if any.
    pub estimate_hours: Option<EstimateHours>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task and the `TASK_CREATED` entry that accompanies it.
    ///
    /// A task created directly as [`TaskStatus::Done`] gets its completion
    /// timestamp set to the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::InvalidEstimateHours`] for an invalid estimate.
    pub fn create(
        new_task: NewTask,
        clock: &impl Clock,
    ) -> Result<(Self, TaskActivityLogEntry), TaskDomainError> {
        let title = normalize_title(&new_task.title)?;
        let estimate_hours = new_task
            .estimate_hours
            .map(EstimateHours::new)
            .transpose()?;
        let timestamp = clock.utc();
        let status = new_task.status;

        let task = Self {
            id: TaskId::new(),
            project_id: new_task.project_id,
            title,
            description: normalize_description(new_task.description),
            status,
            priority: new_task.priority,
            labels: TaskLabels::new(new_task.labels),
            due_date: new_task.due_date,
            completed_at: (status == TaskStatus::Done).then_some(timestamp),
            blocked_reason: None,
            estimate_hours,
            created_at: timestamp,
            updated_at: timestamp,
        };
        let entry = TaskActivityLogEntry::task_created(
            task.id,
            &task.title,
            task.status,
            task.priority,
            timestamp,
        );
        Ok((task, entry))
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            labels: data.labels,
            due_date: data.due_date,
            completed_at: data.completed_at,
            blocked_reason: data.blocked_reason,
            estimate_hours: data.estimate_hours,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Applies a partial update and returns the activity entries it produced.
    ///
    /// All inputs are validated before any field changes, so a rejected
    /// update leaves the task untouched. A status change yields at most one
    /// entry (`COMPLETED`, `REOPENED` or `STATUS_CHANGED`); a description
    /// change yields a `DESCRIPTION_UPDATED` entry independently of it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank replacement title
    /// and [`TaskDomainError::InvalidEstimateHours`] for an invalid estimate.
    pub fn apply_update(
        &mut self,
        update: TaskUpdate,
        clock: &impl Clock,
    ) -> Result<Vec<TaskActivityLogEntry>, TaskDomainError> {
        let title = update.title.as_deref().map(normalize_title).transpose()?;
        let estimate_hours = update
            .estimate_hours
            .map(|hours| hours.map(EstimateHours::new).transpose())
            .transpose()?;
        let timestamp = clock.utc();
        let mut activity = Vec::new();

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(labels) = update.labels {
            self.labels = TaskLabels::new(labels);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(estimate) = estimate_hours {
            self.estimate_hours = estimate;
        }
        if let Some(reason) = update.blocked_reason {
            self.blocked_reason = reason.filter(|text| !text.trim().is_empty());
        }
        if let Some(status) = update.status {
            activity.extend(self.transition_to(status, timestamp));
        }
        if let Some(description) = update.description {
            let normalized = normalize_description(description);
            if normalized != self.description {
                self.description = normalized;
                activity.push(TaskActivityLogEntry::description_updated(
                    self.id, timestamp,
                ));
            }
        }

        self.updated_at = timestamp;
        Ok(activity)
    }

    /// Moves to `status`, maintaining `completed_at`.
    fn transition_to(
        &mut self,
        status: TaskStatus,
        timestamp: DateTime<Utc>,
    ) -> Option<TaskActivityLogEntry> {
        let entry = TaskActivityLogEntry::status_transition(self.id, self.status, status, timestamp)?;
        if status == TaskStatus::Done {
            self.completed_at = Some(timestamp);
        } else if self.status == TaskStatus::Done {
            self.completed_at = None;
        }
        self.status = status;
        Some(entry)
    }

    /// Returns `true` when the task has a due date before `now` and is not done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| due < now)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the labels.
    #[must_use]
    pub const fn labels(&self) -> &TaskLabels {
        &self.labels
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns when the task was last completed, if it is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the stored blocked reason.
    ///
    /// The value is kept across status changes but only describes the task
    /// while it is [`TaskStatus::Blocked`].
    #[must_use]
    pub fn blocked_reason(&self) -> Option<&str> {
        self.blocked_reason.as_deref()
    }

    /// Returns the effort estimate, if any.
    #[must_use]
    pub const fn estimate_hours(&self) -> Option<EstimateHours> {
        self.estimate_hours
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl AsRef<Self> for Task {
    fn as_ref(&self) -> &Self {
        self
    }
}
