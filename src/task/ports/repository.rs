//! Repository port for task and activity log persistence.

use crate::task::domain::{
    ProjectId, ProjectSummary, Task, TaskActivityLogEntry, TaskId, TaskListing, TaskPriority,
    TaskStatus,
    views::{TaskFilter, TaskSort},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Criteria for listing tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    /// Restrict to one project.
    pub project_id: Option<ProjectId>,
    /// Status, priority, label and title/description constraints.
    pub filter: TaskFilter,
    /// Result order. Defaults to newest first.
    pub sort: TaskSort,
}

impl TaskQuery {
    /// Creates a query matching every task, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one project.
    #[must_use]
    pub const fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.filter.status = Some(status);
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.filter.priority = Some(priority);
        self
    }

    /// Restricts results to titles or descriptions containing `text`.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.filter.search = Some(text.into());
        self
    }

    /// Sets the result order.
    #[must_use]
    pub const fn sorted_by(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns `true` when `task` satisfies the project and filter criteria.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.project_id
            .is_none_or(|project_id| task.project_id() == project_id)
            && self.filter.matches(task)
    }
}

/// Task persistence contract.
///
/// Every write that carries activity entries must commit the task row and
/// the entries together or not at all.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its creation entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::UnknownProject`] when the owning
    /// project does not exist.
    async fn create(&self, task: &Task, created: &TaskActivityLogEntry)
    -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task and appends `activity` in the
    /// same atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(
        &self,
        task: &Task,
        activity: &[TaskActivityLogEntry],
    ) -> TaskRepositoryResult<()>;

    /// Deletes a task and its activity log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task and its project by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskListing>>;

    /// Lists tasks matching `query`, in the order it requests.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>>;

    /// Returns the activity log of a task, newest first.
    ///
    /// Entries sharing a timestamp are returned most recently appended first.
    async fn activity_log(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskActivityLogEntry>>;

    /// Finds a project summary by identifier.
    async fn find_project(&self, id: ProjectId) -> TaskRepositoryResult<Option<ProjectSummary>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    UnknownProject(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
