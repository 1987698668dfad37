//! Domain-focused tests for the task aggregate and its value types.

use crate::task::domain::{
    CustomFields, LifecycleState, NewTaskData, Status, Task, TaskDomainError, TaskEdit,
    TaskTitle, TaskType, TaskVersion, User, UserId,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn open_task(clock: DefaultClock) -> Result<Task, TaskDomainError> {
    let data = NewTaskData {
        title: TaskTitle::new("Buy New Laptops")?,
        description: Some("  Procure 10 laptops  ".to_owned()),
        task_type: TaskType::Procurement,
        assignee_id: UserId::new(),
        custom_fields: CustomFields::new(),
    };
    Ok(Task::new(data, &clock))
}

#[rstest]
fn status_rejects_zero() {
    assert_eq!(Status::new(0), Err(TaskDomainError::InvalidStatus(0)));
    assert_eq!(Status::new(1), Ok(Status::FIRST));
}

#[rstest]
#[should_panic(expected = "statuses are one-based")]
fn zero_status_literal_is_refused() {
    assert_eq!(Status::literal(0).value(), 0);
}

#[rstest]
fn status_steps_stop_at_one() {
    assert_eq!(Status::FIRST.previous(), None);
    assert_eq!(Status::FIRST.next().map(Status::value), Some(2));
}

#[rstest]
fn title_is_trimmed() -> eyre::Result<()> {
    let title = TaskTitle::new("  Purchase Server Equipment \n")?;
    ensure!(title.as_str() == "Purchase Server Equipment");
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_title_is_rejected(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn overlong_title_is_rejected() {
    let raw = "x".repeat(TaskTitle::MAX_LENGTH + 1);
    assert_eq!(
        TaskTitle::new(raw),
        Err(TaskDomainError::TitleTooLong(TaskTitle::MAX_LENGTH))
    );
}

#[rstest]
fn user_email_is_normalized() {
    let user = User::new("Alice Johnson", "  Alice@Example.com ");
    assert_eq!(user.email(), "alice@example.com");
    assert_eq!(user.name(), "Alice Johnson");
}

#[rstest]
fn new_task_starts_open_at_first_status(
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let task = open_task?;
    ensure!(task.status() == Status::FIRST);
    ensure!(task.lifecycle() == LifecycleState::Open);
    ensure!(task.version() == TaskVersion::INITIAL);
    ensure!(task.description() == Some("Procure 10 laptops"));
    ensure!(task.created_at() == task.updated_at());
    Ok(())
}

#[rstest]
fn move_to_records_assignee_fields_and_revision(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    let next_assignee = UserId::new();
    let fields = CustomFields::new()
        .with("quote1", json!("A"))
        .with("quote2", json!("B"));

    task.move_to(Status::literal(2), next_assignee, fields.clone(), &clock)?;

    ensure!(task.status().value() == 2);
    ensure!(task.assignee_id() == next_assignee);
    ensure!(task.custom_fields() == &fields);
    ensure!(task.version() == TaskVersion::INITIAL.next());
    ensure!(task.updated_at() >= task.created_at());
    Ok(())
}

#[rstest]
fn apply_edit_with_blank_description_clears_it(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    let original_title = task.title().clone();

    task.apply_edit(
        TaskEdit {
            description: Some("   ".to_owned()),
            ..TaskEdit::default()
        },
        &clock,
    )?;

    ensure!(task.description().is_none());
    ensure!(task.title() == &original_title);
    Ok(())
}

#[rstest]
fn closed_task_rejects_every_mutation(
    clock: DefaultClock,
    open_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = open_task?;
    task.close(&clock)?;
    let task_id = task.id();
    let frozen = task.clone();

    let moved = task.move_to(Status::literal(2), task.assignee_id(), CustomFields::new(), &clock);
    let edited = task.apply_edit(TaskEdit::default(), &clock);
    let closed_again = task.close(&clock);

    for result in [moved, edited, closed_again] {
        match result {
            Err(TaskDomainError::TaskClosed(id)) if id == task_id => {}
            other => bail!("expected TaskClosed, got {other:?}"),
        }
    }
    ensure!(task == frozen);
    Ok(())
}

#[rstest]
fn merged_fields_prefer_provided_values() {
    let existing = CustomFields::new()
        .with("quote1", json!("old"))
        .with("budget", json!(100));
    let provided = CustomFields::new()
        .with("quote1", json!("new"))
        .with("quote2", json!("B"));

    let merged = existing.merged_with(&provided);

    assert_eq!(merged.get("quote1"), Some(&json!("new")));
    assert_eq!(merged.get("quote2"), Some(&json!("B")));
    assert_eq!(merged.get("budget"), Some(&json!(100)));
    assert_eq!(merged.len(), 3);
}

#[rstest]
fn custom_fields_only_accept_objects() {
    assert_eq!(CustomFields::from_json(json!(null)), Some(CustomFields::new()));
    assert_eq!(CustomFields::from_json(json!(["quote1"])), None);
    let parsed = CustomFields::from_json(json!({"branch": "main"}));
    assert_eq!(parsed.and_then(|fields| fields.get("branch").cloned()), Some(json!("main")));
}
