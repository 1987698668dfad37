//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, parse_fields, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrail::task::{
    domain::{TaskType, User},
    ports::UserDirectory,
    services::{CreateTaskRequest, MoveTaskRequest},
};

#[given(r#"a user "{name}""#)]
fn a_user(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let user = User::new(name.clone(), email);
    run_async(world.users.store(&user)).wrap_err("store scenario user")?;
    world.known_users.insert(name, user);
    Ok(())
}

#[given(r#"a "{task_type}" task assigned to "{name}""#)]
fn a_task_assigned_to(
    world: &mut TaskWorkflowWorld,
    task_type: String,
    name: String,
) -> Result<(), eyre::Report> {
    let parsed_type = TaskType::try_from(task_type.as_str())
        .map_err(|err| eyre::eyre!("invalid task type in scenario: {err}"))?;
    let assignee = world
        .known_users
        .get(&name)
        .ok_or_else(|| eyre::eyre!("unknown scenario user {name}"))?;

    let request = CreateTaskRequest::new(format!("{task_type} task"), parsed_type, assignee.id());
    let created = run_async(world.service.create(request)).wrap_err("create scenario task")?;
    world.task = Some(created.task);
    Ok(())
}

#[given(r#"the task has been advanced with fields "{pairs}""#)]
fn task_has_been_advanced(
    world: &mut TaskWorkflowWorld,
    pairs: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let fields = parse_fields(&pairs)?;
    let moved = run_async(
        world
            .service
            .advance(MoveTaskRequest::new(task_id).with_custom_fields(fields)),
    )
    .wrap_err("advance task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}
