//! Request cache layered over the task service.

use std::sync::Arc;

use super::helpers::{Dashboard, ServiceFetcher, TASKS_KEY, dashboard};
use rstest::rstest;
use serde_json::Value;
use taskdeck::{
    cache::{
        domain::{CacheConfig, FetchOptions, ResourceKey},
        ports::FetchError,
        services::RequestCache,
    },
    task::domain::{NewTask, TaskStatus, TaskUpdate},
};

fn cache_for(dashboard: &Dashboard) -> RequestCache<ServiceFetcher> {
    RequestCache::new(
        Arc::new(ServiceFetcher {
            service: Arc::clone(&dashboard.service),
        }),
        CacheConfig::default(),
    )
}

fn statuses(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(|task| task.get("status").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutation_followed_by_invalidation_is_visible(
    dashboard: Dashboard,
) -> Result<(), eyre::Report> {
    let cache = cache_for(&dashboard);
    let key = ResourceKey::new(TASKS_KEY)?;
    let task = dashboard
        .service
        .create_task(NewTask::new(dashboard.website.id, "Newsletter"))
        .await?;

    let before = cache.fetch_with_cache(&key, FetchOptions::new()).await?;
    dashboard
        .service
        .update_task(task.id(), TaskUpdate::new().with_status(TaskStatus::Done))
        .await?;
    let cached = cache.fetch_with_cache(&key, FetchOptions::new()).await?;
    cache.invalidate(&key);
    let after = cache.fetch_with_cache(&key, FetchOptions::new()).await?;

    eyre::ensure!(statuses(&before) == vec!["TODO"], "unexpected {before}");
    eyre::ensure!(cached == before, "fresh entry should be served from cache");
    eyre::ensure!(statuses(&after) == vec!["DONE"], "unexpected {after}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_resource_is_not_cached(dashboard: Dashboard) -> Result<(), eyre::Report> {
    let cache = cache_for(&dashboard);
    let key = ResourceKey::new("/api/unknown")?;

    let result = cache.fetch_with_cache(&key, FetchOptions::new()).await;

    eyre::ensure!(
        matches!(result, Err(FetchError::Status { status: 404, .. })),
        "expected a 404, got {result:?}"
    );
    eyre::ensure!(!cache.is_cached(&key), "failed fetch must not be cached");
    Ok(())
}
