//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::Value;
use tasktrail::task::domain::Task;

fn stored_task(world: &TaskWorkflowWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.service.get_task(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from storage"))
}

#[then("the task is at status {status:u32}")]
fn task_is_at_status(world: &TaskWorkflowWorld, status: u32) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if task.status().value() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"the stored field "{field}" is "{value}""#)]
fn stored_field_is(
    world: &TaskWorkflowWorld,
    field: String,
    value: String,
) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    let expected = Value::String(value);
    match task.custom_fields().get(&field) {
        Some(found) if *found == expected => Ok(()),
        other => Err(eyre::eyre!("expected {field} = {expected}, found {other:?}")),
    }
}

#[then(r#"the operation fails with "{kind}""#)]
fn operation_fails_with(world: &TaskWorkflowWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind} error, got {other:?}")),
    }
}

#[then(r#"the task lifecycle is "{state}""#)]
fn task_lifecycle_is(world: &TaskWorkflowWorld, state: String) -> Result<(), eyre::Report> {
    let task = stored_task(world)?;
    if task.lifecycle().as_str() != state {
        return Err(eyre::eyre!(
            "expected lifecycle {state}, found {}",
            task.lifecycle()
        ));
    }
    Ok(())
}
