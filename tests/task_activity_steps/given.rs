//! Given steps for task activity log BDD scenarios.

use super::world::{TaskActivityWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdeck::task::domain::{NewTask, ProjectId, ProjectSummary};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut TaskActivityWorld, name: String) -> Result<(), eyre::Report> {
    let project = ProjectSummary::new(ProjectId::new(), name);
    world
        .repository
        .add_project(project.clone())
        .wrap_err("register scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut TaskActivityWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id;
    let created = run_async(world.service.create_task(NewTask::new(project_id, title)))
        .wrap_err("create task in scenario setup")?;
    world.task = Some(created);
    Ok(())
}
