//! Field validation outcomes produced by task type handlers.

use super::{Status, TaskType};
use std::fmt;
use thiserror::Error;

/// A single field-level problem found while checking status requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// A required text field is absent, not a string, or blank.
    #[error("{field} is required and must be a non-empty string")]
    RequiredText {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A required field is absent or neither a string nor a number.
    #[error("{field} is required and must be a string or number")]
    RequiredTextOrNumber {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An optional numeric field is present but negative or not a number.
    #[error("{field} must be a non-negative number")]
    NonNegativeNumber {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The status is outside the range the task type defines.
    #[error("unsupported status {status} for {task_type} task")]
    UnsupportedStatus {
        /// Task type whose workflow was consulted.
        task_type: TaskType,
        /// Requested status.
        status: Status,
    },
}

/// Aggregated result of validating custom fields against a status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates an empty (valid) report.
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Records an issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns whether no issues were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the recorded issues.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns human-readable messages, one per issue.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Returns whether the report rejects the status itself.
    #[must_use]
    pub fn has_unsupported_status(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ValidationIssue::UnsupportedStatus { .. }))
    }

    /// Converts the report into a result, failing when any issue exists.
    ///
    /// # Errors
    ///
    /// Returns the report itself when it contains at least one issue.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}
