//! Rules for procurement tasks.
//!
//! Statuses:
//! 1. created
//! 2. supplier offers received (`quote1`, `quote2`)
//! 3. purchase completed (`receipt`), final
//!
//! `budget` is optional at every status but must be a non-negative number
//! when present.

use super::{
    TaskTypeHandler,
    rules::{self, FieldRule},
};
use crate::task::domain::{CustomFields, Status, TaskType, ValidationIssue, ValidationReport};

const MAX_STATUS: Status = Status::literal(3);

const STATUS_RULES: &[&[FieldRule]] = &[
    &[],
    &[FieldRule::text("quote1"), FieldRule::text("quote2")],
    &[FieldRule::text("receipt")],
];

/// Handler for [`TaskType::Procurement`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcurementHandler;

impl TaskTypeHandler for ProcurementHandler {
    fn task_type(&self) -> TaskType {
        TaskType::Procurement
    }

    fn max_status(&self) -> Status {
        MAX_STATUS
    }

    fn validate_requirements(&self, status: Status, fields: &CustomFields) -> ValidationReport {
        let mut report = ValidationReport::new();
        rules::check_non_negative_number("budget", fields, &mut report);
        match rules::rules_for(STATUS_RULES, status) {
            Some(required) => rules::check_required(required, fields, &mut report),
            None => report.push(ValidationIssue::UnsupportedStatus {
                task_type: self.task_type(),
                status,
            }),
        }
        report
    }

    fn transform_fields(&self, status: Status, fields: &CustomFields) -> CustomFields {
        rules::rules_for(STATUS_RULES, status).map_or_else(
            || fields.clone(),
            |required| rules::normalize_required(required, fields),
        )
    }
}
