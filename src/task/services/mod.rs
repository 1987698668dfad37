//! Application services for the task workflow.

mod error;
mod requests;
mod workflow;

pub use error::{ErrorKind, TaskWorkflowError, TaskWorkflowResult};
pub use requests::{CreateTaskRequest, MoveTaskRequest, UpdateTaskRequest};
pub use workflow::{TaskDetails, TaskWorkflowService};
