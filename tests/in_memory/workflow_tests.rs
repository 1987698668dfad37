//! In-memory integration tests for complete task journeys.

use super::helpers::{Workspace, workspace};
use eyre::{bail, ensure};
use rstest::rstest;
use serde_json::json;
use tasktrail::task::{
    domain::{CustomFields, DisplayState, LifecycleState, TaskType},
    services::{CreateTaskRequest, ErrorKind, MoveTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn procurement_task_runs_to_closure(workspace: Workspace) -> eyre::Result<()> {
    let alice = workspace.add_user("Alice Johnson", "alice@example.com").await?;
    let service = &workspace.service;
    let task = service
        .create(CreateTaskRequest::new(
            "Purchase Office Supplies",
            TaskType::Procurement,
            alice.id(),
        ))
        .await?
        .task;
    let task_id = task.id();

    let quoted = service
        .advance(
            MoveTaskRequest::new(task_id).with_custom_fields(
                CustomFields::new()
                    .with("quote1", json!("A"))
                    .with("quote2", json!("B")),
            ),
        )
        .await?;
    ensure!(quoted.status().value() == 2);
    ensure!(
        quoted.custom_fields()
            == &CustomFields::new()
                .with("quote1", json!("A"))
                .with("quote2", json!("B"))
    );

    let missing_receipt = service.advance(MoveTaskRequest::new(task_id)).await;
    match missing_receipt {
        Err(err) if err.kind() == ErrorKind::ValidationFailed => {}
        other => bail!("expected validation failure, got {other:?}"),
    }

    let received = service
        .advance(
            MoveTaskRequest::new(task_id)
                .with_custom_fields(CustomFields::new().with("receipt", json!("R1"))),
        )
        .await?;
    ensure!(received.status().value() == 3);
    ensure!(
        received.custom_fields()
            == &CustomFields::new()
                .with("quote1", json!("A"))
                .with("quote2", json!("B"))
                .with("receipt", json!("R1"))
    );
    ensure!(service.display_state(&received)? == DisplayState::Completed);

    let closed = service.close(task_id).await?;
    ensure!(closed.lifecycle() == LifecycleState::Closed);

    match service.advance(MoveTaskRequest::new(task_id)).await {
        Err(err) if err.kind() == ErrorKind::Immutable => {}
        other => bail!("expected immutable error, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn development_task_walks_back_without_losing_fields(
    workspace: Workspace,
) -> eyre::Result<()> {
    let bob = workspace.add_user("Bob Smith", "bob@example.com").await?;
    let service = &workspace.service;
    let task = service
        .create(CreateTaskRequest::new(
            "Implement User Authentication",
            TaskType::Development,
            bob.id(),
        ))
        .await?
        .task;
    let task_id = task.id();

    service
        .advance(
            MoveTaskRequest::new(task_id)
                .with_custom_fields(CustomFields::new().with("specification", json!("Spec"))),
        )
        .await?;
    let at_three = service
        .advance(
            MoveTaskRequest::new(task_id)
                .with_custom_fields(CustomFields::new().with("branch", json!("feature/auth"))),
        )
        .await?;
    ensure!(service.display_state(&at_three)? == DisplayState::Review);

    let reversed = service.reverse(MoveTaskRequest::new(task_id)).await?;

    ensure!(reversed.status().value() == 2);
    ensure!(reversed.custom_fields().get("branch") == Some(&json!("feature/auth")));
    ensure!(reversed.custom_fields().get("specification") == Some(&json!("Spec")));

    let forward_again = service.advance(MoveTaskRequest::new(task_id)).await?;
    ensure!(forward_again.status().value() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn development_task_without_specification_stays_put(
    workspace: Workspace,
) -> eyre::Result<()> {
    let charlie = workspace.add_user("Charlie Brown", "charlie@example.com").await?;
    let service = &workspace.service;
    let task = service
        .create(CreateTaskRequest::new(
            "New Feature Development",
            TaskType::Development,
            charlie.id(),
        ))
        .await?
        .task;

    let result = service.advance(MoveTaskRequest::new(task.id())).await;

    match result {
        Err(err) if err.kind() == ErrorKind::ValidationFailed => {}
        other => bail!("expected validation failure, got {other:?}"),
    }
    let details = service.get_task_details(task.id()).await?;
    ensure!(details.task == task);
    ensure!(details.display_state == DisplayState::Draft);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_listing_covers_every_assignee(workspace: Workspace) -> eyre::Result<()> {
    let alice = workspace.add_user("Alice Johnson", "alice@example.com").await?;
    let bob = workspace.add_user("Bob Smith", "bob@example.com").await?;
    let service = &workspace.service;
    for (title, owner) in [("First", &alice), ("Second", &bob), ("Third", &alice)] {
        service
            .create(CreateTaskRequest::new(title, TaskType::Procurement, owner.id()))
            .await?;
    }

    ensure!(service.list_tasks().await?.len() == 3);
    let alice_tasks = service.list_tasks_for_user(alice.id()).await?;
    ensure!(alice_tasks.len() == 2);
    ensure!(alice_tasks.iter().all(|task| task.assignee_id() == alice.id()));
    Ok(())
}
