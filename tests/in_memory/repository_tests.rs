//! In-memory integration tests for the storage ports.

use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use tasktrail::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryUserDirectory},
    domain::{CustomFields, NewTaskData, Status, Task, TaskTitle, TaskType, User, UserId},
    ports::{TaskRepository, TaskRepositoryError, UserDirectory, UserDirectoryError},
};

fn new_task(assignee_id: UserId) -> eyre::Result<Task> {
    Ok(Task::new(
        NewTaskData {
            title: TaskTitle::new("Buy New Laptops")?,
            description: None,
            task_type: TaskType::Procurement,
            assignee_id,
            custom_fields: CustomFields::new(),
        },
        &DefaultClock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_update_is_rejected_and_storage_unchanged() -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let original = new_task(UserId::new())?;
    repo.store(&original).await?;
    let loaded_version = original.version();

    let mut first_writer = original.clone();
    first_writer.move_to(
        Status::new(2)?,
        first_writer.assignee_id(),
        CustomFields::new(),
        &DefaultClock,
    )?;
    repo.update(&first_writer, loaded_version).await?;

    let mut second_writer = original.clone();
    second_writer.close(&DefaultClock)?;
    let result = repo.update(&second_writer, loaded_version).await;

    match result {
        Err(TaskRepositoryError::VersionConflict {
            expected, actual, ..
        }) => {
            ensure!(expected == loaded_version);
            ensure!(actual == first_writer.version());
        }
        other => bail!("expected version conflict, got {other:?}"),
    }
    ensure!(repo.find_by_id(original.id()).await? == Some(first_writer));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_and_missing_tasks_are_reported() -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let task = new_task(UserId::new())?;

    match repo.update(&task, task.version()).await {
        Err(TaskRepositoryError::NotFound(id)) if id == task.id() => {}
        other => bail!("expected not found, got {other:?}"),
    }

    repo.store(&task).await?;
    match repo.store(&task).await {
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id() => {}
        other => bail!("expected duplicate task, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_emails_are_unique_ignoring_case() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    directory
        .store(&User::new("Alice Johnson", "alice@example.com"))
        .await?;

    let result = directory
        .store(&User::new("Alice Again", "ALICE@example.com"))
        .await;

    match result {
        Err(UserDirectoryError::DuplicateEmail(email)) => {
            ensure!(email == "alice@example.com");
        }
        other => bail!("expected duplicate email, got {other:?}"),
    }
    ensure!(directory.find_all().await?.len() == 1);
    Ok(())
}
