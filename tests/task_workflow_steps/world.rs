//! Shared world state for task workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use tasktrail::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryUserDirectory},
    domain::{CustomFields, Task, User},
    registry::TaskTypeRegistry,
    services::{TaskWorkflowError, TaskWorkflowService},
};

/// Service type used by the BDD world.
pub type TestWorkflowService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub service: TestWorkflowService,
    pub users: Arc<InMemoryUserDirectory>,
    pub known_users: HashMap<String, User>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskWorkflowError>>,
}

impl TaskWorkflowWorld {
    /// Creates a world with the built-in task types and no users.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let service = TaskWorkflowService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&users),
            Arc::new(TaskTypeRegistry::with_builtin_types()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            users,
            known_users: HashMap::new(),
            task: None,
            last_result: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records an operation outcome, keeping the task current on success.
    pub fn record(&mut self, result: Result<Task, TaskWorkflowError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses `key=value` pairs separated by commas into string fields.
///
/// # Errors
///
/// Returns an error when a pair has no `=`.
pub fn parse_fields(pairs: &str) -> Result<CustomFields, eyre::Report> {
    pairs
        .split(',')
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim(), Value::String(value.trim().to_owned())))
                .ok_or_else(|| eyre::eyre!("field pair {pair:?} is missing '='"))
        })
        .collect()
}
