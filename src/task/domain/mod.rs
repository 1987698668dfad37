//! Domain model for the task workflow.
//!
//! Pure types and rules: identifiers, the task aggregate, custom fields,
//! validation reports, and the status transition rule. Nothing here touches
//! storage or knows which task types exist beyond the closed [`TaskType`]
//! tag.

mod error;
mod fields;
mod ids;
mod task;
mod task_type;
mod user;
mod validation;
pub mod workflow;

pub use error::{ParseLifecycleStateError, ParseTaskTypeError, TaskDomainError};
pub use fields::CustomFields;
pub use ids::{Status, TaskId, TaskTitle, TaskVersion, UserId};
pub use task::{DisplayState, LifecycleState, NewTaskData, PersistedTaskData, Task, TaskEdit};
pub use task_type::TaskType;
pub use user::User;
pub use validation::{ValidationIssue, ValidationReport};
pub use workflow::{Direction, TransitionRejection};
