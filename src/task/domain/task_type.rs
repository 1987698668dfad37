//! Closed set of task types known to the workflow engine.

use super::ParseTaskTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a task tracks; selects the handler governing its statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Purchasing goods from suppliers.
    Procurement,
    /// Building and shipping software.
    Development,
}

impl TaskType {
    /// Every task type, in declaration order.
    pub const ALL: [Self; 2] = [Self::Procurement, Self::Development];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Procurement => "procurement",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "procurement" => Ok(Self::Procurement),
            "development" => Ok(Self::Development),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}
