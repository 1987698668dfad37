//! Users that tasks are assigned to.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A person who can be assigned tasks. Referenced by tasks, never owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Creates a user with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(UserId::new(), name, email)
    }

    /// Creates a user with a known identifier.
    #[must_use]
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into().trim().to_ascii_lowercase(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique contact address, lowercased.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
