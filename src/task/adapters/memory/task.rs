//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        ProjectId, ProjectSummary, Task, TaskActivityLogEntry, TaskId, TaskListing,
        views::sort_tasks,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// A single write lock covers a task row and its activity entries, so each
/// write is applied completely or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    projects: HashMap<ProjectId, ProjectSummary>,
    tasks: HashMap<TaskId, Task>,
    activity: HashMap<TaskId, Vec<TaskActivityLogEntry>>,
}

impl InMemoryTaskState {
    fn listing(&self, task: &Task) -> TaskListing {
        TaskListing::new(task.clone(), self.projects.get(&task.project_id()).cloned())
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already knows `projects`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn with_projects(
        projects: impl IntoIterator<Item = ProjectSummary>,
    ) -> TaskRepositoryResult<Self> {
        let repository = Self::new();
        for project in projects {
            repository.add_project(project)?;
        }
        Ok(repository)
    }

    /// Registers a project so tasks can be created in it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn add_project(&self, project: ProjectSummary) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.projects.insert(project.id, project);
        Ok(())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(
        &self,
        task: &Task,
        created: &TaskActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::UnknownProject(task.project_id()));
        }

        state.tasks.insert(task.id(), task.clone());
        state.activity.insert(task.id(), vec![created.clone()]);
        Ok(())
    }

    async fn update(
        &self,
        task: &Task,
        activity: &[TaskActivityLogEntry],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        state
            .activity
            .entry(task.id())
            .or_default()
            .extend_from_slice(activity);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.activity.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskListing>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).map(|task| state.listing(task)))
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>> {
        let state = self.read()?;
        let mut listings: Vec<TaskListing> = state
            .tasks
            .values()
            .filter(|task| query.matches(task))
            .map(|task| state.listing(task))
            .collect();
        // HashMap iteration order is arbitrary; settle ties by creation order.
        listings.sort_by_key(|listing| (listing.task.created_at(), listing.task.id()));
        sort_tasks(&mut listings, query.sort);
        Ok(listings)
    }

    async fn activity_log(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskActivityLogEntry>> {
        let state = self.read()?;
        let mut entries: Vec<TaskActivityLogEntry> = state
            .activity
            .get(&id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default();
        entries.sort_by(|left, right| right.timestamp().cmp(&left.timestamp()));
        Ok(entries)
    }

    async fn find_project(&self, id: ProjectId) -> TaskRepositoryResult<Option<ProjectSummary>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }
}
