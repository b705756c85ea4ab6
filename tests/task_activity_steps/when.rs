//! When steps for task activity log BDD scenarios.

use super::world::{TaskActivityWorld, run_async};
use rstest_bdd_macros::when;
use taskdeck::task::domain::{NewTask, ProjectId, TaskStatus, TaskUpdate};

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut TaskActivityWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id;
    let result = run_async(world.service.create_task(NewTask::new(project_id, title)));
    world.record(result);
    Ok(())
}

#[when("creating a task for a missing project")]
fn create_task_for_missing_project(world: &mut TaskActivityWorld) {
    let result = run_async(
        world
            .service
            .create_task(NewTask::new(ProjectId::new(), "Orphan")),
    );
    world.record(result);
}

#[when(r#"the task status is set to "{status}""#)]
fn set_status(world: &mut TaskActivityWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    let task_id = world.task()?.id();
    let result = run_async(
        world
            .service
            .update_task(task_id, TaskUpdate::new().with_status(target)),
    );
    world.record(result);
    Ok(())
}

#[when(r#"the task is completed with description "{description}""#)]
fn complete_with_description(
    world: &mut TaskActivityWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let update = TaskUpdate::new()
        .with_status(TaskStatus::Done)
        .with_description(description);
    let result = run_async(world.service.update_task(task_id, update));
    world.record(result);
    Ok(())
}

#[when("the task title is cleared while completing it")]
fn clear_title_while_completing(world: &mut TaskActivityWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let update = TaskUpdate::new()
        .with_status(TaskStatus::Done)
        .with_title("");
    let result = run_async(world.service.update_task(task_id, update));
    world.record(result);
    Ok(())
}
