//! Status transition rule shared by every task type.
//!
//! Statuses are ascending integers starting at 1. A move changes the status
//! by exactly one step in either direction, and only while the task is
//! open. Closing is allowed only from the final status of the task's type.
//! Both functions here are pure; callers supply the type's maximum status.

use super::{LifecycleState, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Direction of a single-step status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increment the status by one.
    Forward,
    /// Decrement the status by one.
    Backward,
}

impl Direction {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a status move or close was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TransitionRejection {
    /// The task is closed and cannot move.
    #[error("closed tasks are immutable")]
    ClosedImmutable,
    /// A forward move would pass the final status.
    #[error("cannot move forward beyond the final status")]
    BeyondFinal,
    /// A backward move would go below status 1.
    #[error("cannot move backward before status 1")]
    BeforeFirst,
    /// The task is already closed.
    #[error("task is already closed")]
    AlreadyClosed,
    /// Closing was attempted from a non-final status.
    #[error("tasks can only be closed from their final status")]
    NotFinalStatus,
}

impl TransitionRejection {
    /// Returns the stable machine-readable reason code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ClosedImmutable => "closed-immutable",
            Self::BeyondFinal => "beyond-final",
            Self::BeforeFirst => "before-first",
            Self::AlreadyClosed => "already-closed",
            Self::NotFinalStatus => "not-final-status",
        }
    }
}

/// Decides the status reached by moving one step in `direction`.
///
/// # Errors
///
/// Returns [`TransitionRejection::ClosedImmutable`] for closed tasks,
/// [`TransitionRejection::BeyondFinal`] when moving forward from
/// `max_status`, and [`TransitionRejection::BeforeFirst`] when moving
/// backward from status 1.
pub fn transition(
    current: Status,
    max_status: Status,
    direction: Direction,
    lifecycle: LifecycleState,
) -> Result<Status, TransitionRejection> {
    if lifecycle == LifecycleState::Closed {
        return Err(TransitionRejection::ClosedImmutable);
    }

    match direction {
        Direction::Forward => current
            .next()
            .filter(|next| *next <= max_status)
            .ok_or(TransitionRejection::BeyondFinal),
        Direction::Backward => current.previous().ok_or(TransitionRejection::BeforeFirst),
    }
}

/// Decides whether a task may be closed.
///
/// Acceptance only covers the status rule; callers must still re-check the
/// final status's field requirements before closing.
///
/// # Errors
///
/// Returns [`TransitionRejection::AlreadyClosed`] for closed tasks and
/// [`TransitionRejection::NotFinalStatus`] when `current` is not
/// `max_status`.
pub fn can_close(
    current: Status,
    max_status: Status,
    lifecycle: LifecycleState,
) -> Result<(), TransitionRejection> {
    if lifecycle == LifecycleState::Closed {
        return Err(TransitionRejection::AlreadyClosed);
    }
    if current != max_status {
        return Err(TransitionRejection::NotFinalStatus);
    }
    Ok(())
}
