//! Populates a `PostgreSQL` database with demo users and tasks.
//!
//! Usage:
//!
//! ```text
//! seed [--config <path>] [--reset]
//! ```
//!
//! Tasks are driven through the workflow service rather than inserted
//! directly, so every seeded task satisfies the requirements of the status
//! it ends at. The schema in `migrations/` must already be applied.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use diesel::RunQueryDsl;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use serde_json::json;
use tasktrail::config::AppConfig;
use tasktrail::observability::init_tracing;
use tasktrail::task::{
    adapters::postgres::{PostgresTaskRepository, PostgresUserDirectory, TaskPgPool},
    domain::{CustomFields, TaskType, User},
    ports::UserDirectory,
    registry::TaskTypeRegistry,
    services::{CreateTaskRequest, MoveTaskRequest, TaskWorkflowService},
};
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type SeedService = TaskWorkflowService<PostgresTaskRepository, PostgresUserDirectory, DefaultClock>;

/// Seed the task database with demo data.
#[derive(Parser, Debug)]
#[command(version, about = "Seed the task database with demo users and tasks")]
struct Cli {
    /// Path to config file (default: `tasktrail.toml`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delete every existing task and user first.
    #[arg(long)]
    reset: bool,
}

struct SeedUser {
    name: &'static str,
    email: &'static str,
}

const USERS: [SeedUser; 3] = [
    SeedUser {
        name: "Alice Johnson",
        email: "alice@example.com",
    },
    SeedUser {
        name: "Bob Smith",
        email: "bob@example.com",
    },
    SeedUser {
        name: "Charlie Brown",
        email: "charlie@example.com",
    },
];

/// A demo task and the forward moves applied after creation. Each move
/// carries the fields its target status requires.
struct SeedTask {
    title: &'static str,
    description: &'static str,
    task_type: TaskType,
    assignee: usize,
    moves: Vec<CustomFields>,
}

fn demo_tasks() -> Vec<SeedTask> {
    let quotes = || {
        CustomFields::new()
            .with("quote1", json!("5000 USD from Office Depot"))
            .with("quote2", json!("4800 USD from Staples"))
    };
    let specification = |text: &str| CustomFields::new().with("specification", json!(text));

    vec![
        SeedTask {
            title: "Purchase Office Supplies",
            description: "Order new office supplies for Q1",
            task_type: TaskType::Procurement,
            assignee: 0,
            moves: vec![quotes()],
        },
        SeedTask {
            title: "Buy New Laptops",
            description: "Procure 10 new laptops for the development team",
            task_type: TaskType::Procurement,
            assignee: 1,
            moves: Vec::new(),
        },
        SeedTask {
            title: "Purchase Server Equipment",
            description: "Buy new server hardware for production",
            task_type: TaskType::Procurement,
            assignee: 2,
            moves: vec![
                quotes(),
                CustomFields::new().with(
                    "receipt",
                    json!("REC-2024-003 - Server purchase completed on 2024-01-15"),
                ),
            ],
        },
        SeedTask {
            title: "Implement User Authentication",
            description: "Add JWT-based authentication to the API",
            task_type: TaskType::Development,
            assignee: 0,
            moves: vec![
                specification("Token-based authentication for every API route"),
                CustomFields::new().with("branch", json!("feature/auth")),
            ],
        },
        SeedTask {
            title: "Build Task Management UI",
            description: "Create components for task management",
            task_type: TaskType::Development,
            assignee: 2,
            moves: vec![
                specification("List, create, and move tasks from the browser"),
                CustomFields::new().with("branch", json!("feature/task-ui")),
                CustomFields::new().with("version", json!("1.0.0")),
            ],
        },
        SeedTask {
            title: "Fix Payment Gateway Integration",
            description: "Resolve issues with payment processing",
            task_type: TaskType::Development,
            assignee: 1,
            moves: vec![specification(
                "Fix payment gateway timeout issues. Implement retry logic with \
                 exponential backoff. Update error handling to provide better user feedback.",
            )],
        },
        SeedTask {
            title: "New Feature Development",
            description: "Start work on new dashboard feature",
            task_type: TaskType::Development,
            assignee: 0,
            moves: Vec::new(),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    let manager = ConnectionManager::<PgConnection>::new(config.database.url.as_str());
    let pool: TaskPgPool = Pool::builder()
        .max_size(config.database.max_connections)
        .build(manager)?;

    if cli.reset {
        reset(pool.clone()).await?;
    }

    let users = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let service = TaskWorkflowService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::clone(&users),
        Arc::new(TaskTypeRegistry::with_builtin_types()),
        Arc::new(DefaultClock),
    );

    let mut seeded_users = Vec::with_capacity(USERS.len());
    for seed_user in &USERS {
        let user = User::new(seed_user.name, seed_user.email);
        users.store(&user).await?;
        seeded_users.push(user);
    }
    info!(count = seeded_users.len(), "users created");

    let mut task_count = 0_usize;
    for seed_task in demo_tasks() {
        seed_one(&service, &seeded_users, seed_task).await?;
        task_count += 1;
    }
    info!(count = task_count, "tasks created");
    info!("seeding completed");
    Ok(())
}

async fn seed_one(
    service: &SeedService,
    users: &[User],
    seed_task: SeedTask,
) -> Result<(), BoxError> {
    let SeedTask {
        title,
        description,
        task_type,
        assignee,
        moves,
    } = seed_task;
    let assignee_user = users
        .get(assignee)
        .ok_or_else(|| format!("no seeded user at index {assignee}"))?;

    let created = service
        .create(
            CreateTaskRequest::new(title, task_type, assignee_user.id())
                .with_description(description),
        )
        .await?;
    for fields in moves {
        service
            .advance(MoveTaskRequest::new(created.task.id()).with_custom_fields(fields))
            .await?;
    }
    Ok(())
}

async fn reset(pool: TaskPgPool) -> Result<(), BoxError> {
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        let mut connection = pool.get()?;
        diesel::sql_query("TRUNCATE TABLE tasks, users CASCADE").execute(&mut connection)?;
        Ok(())
    })
    .await??;
    info!("existing tasks and users removed");
    Ok(())
}
