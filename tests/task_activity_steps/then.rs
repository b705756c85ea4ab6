//! Then steps for task activity log BDD scenarios.

use super::world::{TaskActivityWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskdeck::task::{
    domain::{TaskDomainError, TaskStatus},
    ports::TaskRepositoryError,
    services::TaskLifecycleError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskActivityWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.get_task(task_id)).wrap_err("reload task")?;
    let actual = stored.listing.task.status();
    eyre::ensure!(actual == expected, "expected status {expected}, found {actual}");
    Ok(())
}

#[then(r#"the activity log reads "{events}""#)]
fn activity_log_reads(world: &TaskActivityWorld, events: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let log = run_async(world.service.activity_log(task_id)).wrap_err("read activity log")?;
    let actual: Vec<&str> = log.iter().map(|entry| entry.event_type().as_str()).collect();
    let expected: Vec<&str> = events.split(',').map(str::trim).collect();
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the task has a completion timestamp")]
fn has_completion_timestamp(world: &TaskActivityWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.completed_at().is_some(),
        "expected completed_at to be set"
    );
    Ok(())
}

#[then("the task has no completion timestamp")]
fn has_no_completion_timestamp(world: &TaskActivityWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.completed_at().is_none(),
        "expected completed_at to be cleared, found {:?}",
        task.completed_at()
    );
    Ok(())
}

#[then("the update is rejected for an empty title")]
fn update_rejected_for_empty_title(world: &TaskActivityWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
        ),
        "expected EmptyTitle error, got {result:?}"
    );
    Ok(())
}

#[then("creation is rejected for an unknown project")]
fn creation_rejected_for_unknown_project(world: &TaskActivityWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Repository(
                TaskRepositoryError::UnknownProject(_)
            ))
        ),
        "expected UnknownProject error, got {result:?}"
    );
    Ok(())
}
