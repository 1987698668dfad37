//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrail::task::{
    adapters::memory::{InMemoryTaskRepository, InMemoryUserDirectory},
    domain::User,
    ports::UserDirectory,
    registry::TaskTypeRegistry,
    services::TaskWorkflowService,
};

/// Workflow service wired to in-memory adapters.
pub type TestService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserDirectory, DefaultClock>;

/// Service plus direct handles on its ports.
pub struct Workspace {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserDirectory>,
}

impl Workspace {
    /// Registers a user and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the user.
    pub async fn add_user(&self, name: &str, email: &str) -> eyre::Result<User> {
        let user = User::new(name, email);
        self.users.store(&user).await?;
        Ok(user)
    }
}

/// Provides a fresh workspace with the built-in task types.
#[fixture]
pub fn workspace() -> Workspace {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let service = TaskWorkflowService::new(
        Arc::clone(&tasks),
        Arc::clone(&users),
        Arc::new(TaskTypeRegistry::with_builtin_types()),
        Arc::new(DefaultClock),
    );
    Workspace {
        service,
        tasks,
        users,
    }
}
