//! Service layer for task creation, updates, and task reads.

use crate::task::{
    domain::{
        NewTask, ProjectId, Task, TaskActivityLogEntry, TaskDomainError, TaskEventType, TaskId,
        TaskListing, TaskUpdate,
        views::{
            ProjectWorkload, SortField, TaskSort, TaskStats, matches_search, project_workloads,
            recent_open_tasks, sort_tasks, upcoming_deadlines, urgent_tasks,
        },
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// No project exists with the given identifier.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    /// A search was requested without query text.
    #[error("search query must not be empty")]
    EmptySearchQuery,
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// A task with its project and activity log, newest entry first.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetails {
    /// Task and project.
    pub listing: TaskListing,
    /// Activity entries, newest first.
    pub activity: Vec<TaskActivityLogEntry>,
}

/// Dashboard summary of every task.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    /// Headline counts.
    pub stats: TaskStats,
    /// Blocked and overdue tasks, blocked first.
    pub urgent: Vec<TaskListing>,
    /// Most recently updated open tasks.
    pub recent: Vec<TaskListing>,
    /// Open tasks due now or later, soonest first.
    pub upcoming: Vec<TaskListing>,
    /// Per-project counts, busiest first.
    pub workloads: Vec<ProjectWorkload>,
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_listing_or_error(&self, id: TaskId) -> TaskLifecycleResult<TaskListing> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Creates a task and records its `TASK_CREATED` entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails, before
    /// anything is written, or [`TaskLifecycleError::Repository`] when
    /// storage rejects the task.
    pub async fn create_task(&self, new_task: NewTask) -> TaskLifecycleResult<Task> {
        let (task, created) = Task::create(new_task, &*self.clock)?;
        self.repository.create(&task, &created).await?;
        info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a partial update and records the activity it produces.
    ///
    /// The task row and its new activity entries are persisted in one
    /// repository call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Domain`] when validation fails, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update_task(&self, id: TaskId, update: TaskUpdate) -> TaskLifecycleResult<Task> {
        let TaskListing { mut task, .. } = self.find_listing_or_error(id).await?;
        let activity = task.apply_update(update, &*self.clock)?;
        self.repository.update(&task, &activity).await?;

        let events: Vec<TaskEventType> = activity
            .iter()
            .map(TaskActivityLogEntry::event_type)
            .collect();
        debug!(task_id = %id, status = %task.status(), ?events, "task updated");
        Ok(task)
    }

    /// Deletes a task and its activity log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns a task with its project and activity log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<TaskDetails> {
        let listing = self.find_listing_or_error(id).await?;
        let activity = self.repository.activity_log(id).await?;
        Ok(TaskDetails { listing, activity })
    }

    /// Returns the activity log of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn activity_log(&self, id: TaskId) -> TaskLifecycleResult<Vec<TaskActivityLogEntry>> {
        self.find_listing_or_error(id).await?;
        Ok(self.repository.activity_log(id).await?)
    }

    /// Lists tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks(&self, query: &TaskQuery) -> TaskLifecycleResult<Vec<TaskListing>> {
        Ok(self.repository.list(query).await?)
    }

    /// Lists the tasks of one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ProjectNotFound`] when the project does
    /// not exist or [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_project_tasks(
        &self,
        project_id: ProjectId,
        query: TaskQuery,
    ) -> TaskLifecycleResult<Vec<TaskListing>> {
        if self.repository.find_project(project_id).await?.is_none() {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }
        Ok(self.repository.list(&query.for_project(project_id)).await?)
    }

    /// Searches titles, descriptions and labels, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::EmptySearchQuery`] for blank input or
    /// [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn search_tasks(&self, text: &str) -> TaskLifecycleResult<Vec<TaskListing>> {
        let needle = text.trim();
        if needle.is_empty() {
            return Err(TaskLifecycleError::EmptySearchQuery);
        }
        let mut matches: Vec<TaskListing> = self
            .repository
            .list(&TaskQuery::new())
            .await?
            .into_iter()
            .filter(|listing| matches_search(&listing.task, needle))
            .collect();
        sort_tasks(&mut matches, TaskSort::descending(SortField::UpdatedAt));
        Ok(matches)
    }

    /// Builds the dashboard summary as of the service clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn dashboard(&self) -> TaskLifecycleResult<DashboardOverview> {
        let listings = self.repository.list(&TaskQuery::new()).await?;
        let now = self.clock.utc();
        Ok(DashboardOverview {
            stats: TaskStats::collect(&listings, now),
            urgent: urgent_tasks(&listings, now).into_iter().cloned().collect(),
            recent: recent_open_tasks(&listings).into_iter().cloned().collect(),
            upcoming: upcoming_deadlines(&listings, now)
                .into_iter()
                .cloned()
                .collect(),
            workloads: project_workloads(&listings, now),
        })
    }
}
