//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::{Value, json};
use taskdeck::{
    cache::{
        domain::ResourceKey,
        ports::{FetchError, FetchResult, ResourceFetcher},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{ProjectId, ProjectSummary},
        ports::TaskQuery,
        services::TaskLifecycleService,
    },
};

/// Service type used by in-memory integration tests.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Task service with two registered projects.
pub struct Dashboard {
    pub service: Arc<TestService>,
    pub website: ProjectSummary,
    pub mobile: ProjectSummary,
}

/// Provides a service backed by a fresh repository.
#[fixture]
pub fn dashboard() -> Dashboard {
    let website = ProjectSummary::new(ProjectId::new(), "Website");
    let mobile = ProjectSummary::new(ProjectId::new(), "Mobile app");
    let repository = InMemoryTaskRepository::with_projects([website.clone(), mobile.clone()])
        .expect("fresh repository");
    Dashboard {
        service: Arc::new(TaskLifecycleService::new(
            Arc::new(repository),
            Arc::new(DefaultClock),
        )),
        website,
        mobile,
    }
}

/// Resource key of the full task list.
pub const TASKS_KEY: &str = "/api/tasks";

/// Fetcher serving task listings from the service as JSON.
pub struct ServiceFetcher {
    pub service: Arc<TestService>,
}

#[async_trait]
impl ResourceFetcher for ServiceFetcher {
    type Output = Value;

    async fn fetch(&self, key: &ResourceKey) -> FetchResult<Value> {
        if key.as_str() != TASKS_KEY {
            return Err(FetchError::Status {
                key: key.clone(),
                status: 404,
            });
        }
        let listings = self
            .service
            .list_tasks(&TaskQuery::new())
            .await
            .map_err(FetchError::backend)?;
        let tasks: Vec<Value> = listings
            .iter()
            .map(|listing| {
                json!({
                    "id": listing.task.id(),
                    "title": listing.task.title(),
                    "status": listing.task.status(),
                    "project": listing.project_name(),
                })
            })
            .collect();
        Ok(Value::Array(tasks))
    }
}
