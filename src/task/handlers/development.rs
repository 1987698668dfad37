//! Rules for development tasks.
//!
//! Statuses:
//! 1. created
//! 2. specification completed (`specification`)
//! 3. development completed (`branch`)
//! 4. distribution completed (`version`, string or number), final

use super::{
    TaskTypeHandler,
    rules::{self, FieldRule},
};
use crate::task::domain::{CustomFields, Status, TaskType, ValidationIssue, ValidationReport};

const MAX_STATUS: Status = Status::literal(4);

const STATUS_RULES: &[&[FieldRule]] = &[
    &[],
    &[FieldRule::text("specification")],
    &[FieldRule::text("branch")],
    &[FieldRule::text_or_number("version")],
];

/// Handler for [`TaskType::Development`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DevelopmentHandler;

impl TaskTypeHandler for DevelopmentHandler {
    fn task_type(&self) -> TaskType {
        TaskType::Development
    }

    fn max_status(&self) -> Status {
        MAX_STATUS
    }

    fn validate_requirements(&self, status: Status, fields: &CustomFields) -> ValidationReport {
        let mut report = ValidationReport::new();
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
