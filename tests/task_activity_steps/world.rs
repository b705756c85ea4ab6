//! Shared world state for task activity log BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ProjectSummary, Task},
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task activity behaviour tests.
pub struct TaskActivityWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub service: TestTaskService,
    pub project: Option<ProjectSummary>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskActivityWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
        Self {
            repository,
            service,
            project: None,
            task: None,
            last_result: None,
        }
    }

    /// Returns the current project or an error when none was set up.
    ///
    /// # Errors
    ///
    /// Returns an error when no project exists in the scenario world.
    pub fn project(&self) -> Result<&ProjectSummary, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the current task or an error when none was created.
    ///
    /// # Errors
    ///
    /// Returns an error when no task exists in the scenario world.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records an operation result, keeping the latest successful task.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskActivityWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskActivityWorld {
    TaskActivityWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
