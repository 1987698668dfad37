//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, parse_fields, run_async};
use rstest_bdd_macros::when;
use tasktrail::task::services::MoveTaskRequest;

#[when(r#"the task is advanced with fields "{pairs}""#)]
fn advance_with_fields(world: &mut TaskWorkflowWorld, pairs: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let fields = parse_fields(&pairs)?;
    let result = run_async(
        world
            .service
            .advance(MoveTaskRequest::new(task_id).with_custom_fields(fields)),
    );
    world.record(result);
    Ok(())
}

#[when("the task is advanced without fields")]
fn advance_without_fields(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.advance(MoveTaskRequest::new(task_id)));
    world.record(result);
    Ok(())
}

#[when("the task is reversed")]
fn reverse(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.reverse(MoveTaskRequest::new(task_id)));
    world.record(result);
    Ok(())
}

#[when("the task is closed")]
fn close(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.close(task_id));
    world.record(result);
    Ok(())
}
