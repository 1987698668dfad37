//! Per-type workflow rules.
//!
//! Every task type is governed by one handler exposing the same capability:
//! its final status, the field requirements of each status, and the
//! normalization applied before fields are stored. The set of handlers is
//! closed; [`TypeHandler`] is the tagged union the registry hands out.
//!
//! Transformation never drops keys. Fields written at earlier statuses stay
//! in the map after the task moves on, so the stored fields double as an
//! audit trail.

mod development;
mod procurement;
pub mod rules;

pub use development::DevelopmentHandler;
pub use procurement::ProcurementHandler;

use crate::task::domain::{CustomFields, Status, TaskType, ValidationReport};

/// Capability shared by every task type handler.
pub trait TaskTypeHandler: Send + Sync {
    /// Task type this handler governs.
    fn task_type(&self) -> TaskType;

    /// Final status of the type's workflow.
    fn max_status(&self) -> Status;

    /// Checks `fields` against the requirements of `status`.
    ///
    /// Statuses outside `1..=max_status` produce an unsupported-status issue.
    fn validate_requirements(&self, status: Status, fields: &CustomFields) -> ValidationReport;

    /// Returns a copy of `fields` with the fields required at `status`
    /// normalized to trimmed strings. Every other key passes through
    /// unchanged. Applying the transform twice yields the same map.
    fn transform_fields(&self, status: Status, fields: &CustomFields) -> CustomFields;
}

/// Closed set of handler implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHandler {
    /// Procurement workflow.
    Procurement(ProcurementHandler),
    /// Development workflow.
    Development(DevelopmentHandler),
}

impl TypeHandler {
    /// Returns the built-in handler for `task_type`.
    #[must_use]
    pub const fn builtin(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Procurement => Self::Procurement(ProcurementHandler),
            TaskType::Development => Self::Development(DevelopmentHandler),
        }
    }
}

impl TaskTypeHandler for TypeHandler {
    fn task_type(&self) -> TaskType {
        match self {
            Self::Procurement(handler) => handler.task_type(),
            Self::Development(handler) => handler.task_type(),
        }
    }

    fn max_status(&self) -> Status {
        match self {
            Self::Procurement(handler) => handler.max_status(),
            Self::Development(handler) => handler.max_status(),
        }
    }

    fn validate_requirements(&self, status: Status, fields: &CustomFields) -> ValidationReport {
        match self {
            Self::Procurement(handler) => handler.validate_requirements(status, fields),
            Self::Development(handler) => handler.validate_requirements(status, fields),
        }
    }

    fn transform_fields(&self, status: Status, fields: &CustomFields) -> CustomFields {
        match self {
            Self::Procurement(handler) => handler.transform_fields(status, fields),
            Self::Development(handler) => handler.transform_fields(status, fields),
        }
    }
}
