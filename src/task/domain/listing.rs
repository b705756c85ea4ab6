//! Read models pairing tasks with their owning project.

use super::{ProjectId, Task};
use serde::{Deserialize, Serialize};

/// Display name used when a task's project cannot be resolved.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown Project";

/// Minimal project data joined onto task reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: ProjectId,
    /// Project display name.
    pub name: String,
}

impl ProjectSummary {
    /// Creates a project summary.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Task together with its resolved project, as returned by list queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListing {
    /// The task record.
    pub task: Task,
    /// The owning project, when it could be resolved.
    pub project: Option<ProjectSummary>,
}

impl TaskListing {
    /// Pairs a task with its project.
    #[must_use]
    pub const fn new(task: Task, project: Option<ProjectSummary>) -> Self {
        Self { task, project }
    }

    /// Returns the project name, or [`UNKNOWN_PROJECT_NAME`].
    #[must_use]
    pub fn project_name(&self) -> &str {
        self.project
            .as_ref()
            .map_or(UNKNOWN_PROJECT_NAME, |project| project.name.as_str())
    }
}

impl AsRef<Task> for TaskListing {
    fn as_ref(&self) -> &Task {
        &self.task
    }
}
