//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Dashboard, dashboard};
use rstest::rstest;
use taskdeck::task::{
    domain::{
        NewTask, TaskEventType, TaskPriority, TaskStatus, TaskUpdate,
        views::{SortField, TaskSort, group_by_project, group_by_status},
    },
    ports::TaskQuery,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_project_and_priority(dashboard: Dashboard) -> Result<(), eyre::Report> {
    let service = &dashboard.service;
    service
        .create_task(
            NewTask::new(dashboard.website.id, "Hero banner").with_priority(TaskPriority::High),
        )
        .await?;
    service
        .create_task(NewTask::new(dashboard.website.id, "Footer links"))
        .await?;
    service
        .create_task(
            NewTask::new(dashboard.mobile.id, "Push notifications")
                .with_priority(TaskPriority::High),
        )
        .await?;

    let website_high = service
        .list_tasks(
            &TaskQuery::new()
                .for_project(dashboard.website.id)
                .with_priority(TaskPriority::High),
        )
        .await?;

    let titles: Vec<&str> = website_high
        .iter()
        .map(|listing| listing.task.title())
        .collect();
    eyre::ensure!(titles == vec!["Hero banner"], "unexpected tasks {titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_sorts_by_requested_field(dashboard: Dashboard) -> Result<(), eyre::Report> {
    let service = &dashboard.service;
    for (title, priority) in [
        ("Low one", TaskPriority::Low),
        ("Critical one", TaskPriority::Critical),
        ("Medium one", TaskPriority::Medium),
    ] {
        service
            .create_task(NewTask::new(dashboard.website.id, title).with_priority(priority))
            .await?;
    }

    let sorted = service
        .list_tasks(&TaskQuery::new().sorted_by(TaskSort::ascending(SortField::Priority)))
        .await?;

    let titles: Vec<&str> = sorted.iter().map(|listing| listing.task.title()).collect();
    eyre::ensure!(
        titles == vec!["Critical one", "Medium one", "Low one"],
        "unexpected order {titles:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_text_in_query_narrows_listing(dashboard: Dashboard) -> Result<(), eyre::Report> {
    let service = &dashboard.service;
    service
        .create_task(
            NewTask::new(dashboard.website.id, "Audit").with_description("Check ACCESSIBILITY"),
        )
        .await?;
    service
        .create_task(NewTask::new(dashboard.website.id, "Deploy"))
        .await?;

    let found = service
        .list_tasks(&TaskQuery::new().with_search("accessibility"))
        .await?;

    eyre::ensure!(found.len() == 1, "expected one match, found {}", found.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_project_groupings_reflect_updates(
    dashboard: Dashboard,
) -> Result<(), eyre::Report> {
    let service = &dashboard.service;
    let task = service
        .create_task(NewTask::new(dashboard.website.id, "Contact form"))
        .await?;
    service
        .create_task(NewTask::new(dashboard.mobile.id, "Onboarding"))
        .await?;
    service
        .update_task(task.id(), TaskUpdate::new().with_status(TaskStatus::InProgress))
        .await?;

    let listings = service.list_tasks(&TaskQuery::new()).await?;
    let columns: Vec<(TaskStatus, usize)> = group_by_status(&listings)
        .into_iter()
        .map(|(status, column)| (status, column.len()))
        .filter(|(_, count)| *count > 0)
        .collect();
    let mut projects: Vec<&str> = group_by_project(&listings)
        .iter()
        .map(|group| group.name)
        .collect();
    projects.sort_unstable();

    eyre::ensure!(
        columns == vec![(TaskStatus::Todo, 1), (TaskStatus::InProgress, 1)],
        "unexpected board {columns:?}"
    );
    eyre::ensure!(
        projects == vec!["Mobile app", "Website"],
        "unexpected groups {projects:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_read_returns_full_history(dashboard: Dashboard) -> Result<(), eyre::Report> {
    let service = &dashboard.service;
    let task = service
        .create_task(NewTask::new(dashboard.mobile.id, "Offline mode"))
        .await?;
    service
        .update_task(task.id(), TaskUpdate::new().with_status(TaskStatus::Done))
        .await?;
    service
        .update_task(task.id(), TaskUpdate::new().with_status(TaskStatus::Backlog))
        .await?;

    let details = service.get_task(task.id()).await?;

    let events: Vec<TaskEventType> = details
        .activity
        .iter()
        .map(|entry| entry.event_type())
        .collect();
    eyre::ensure!(
        events
            == vec![
                TaskEventType::Reopened,
                TaskEventType::Completed,
                TaskEventType::TaskCreated,
            ],
        "unexpected history {events:?}"
    );
    eyre::ensure!(
        details.listing.task.completed_at().is_none(),
        "reopened task must not keep completed_at"
    );
    eyre::ensure!(
        details.listing.project_name() == "Mobile app",
        "unexpected project {}",
        details.listing.project_name()
    );
    Ok(())
}
