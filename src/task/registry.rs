//! Lookup table from task type to handler.
//!
//! The registry is built once at process start and then shared read-only
//! (typically behind an `Arc`) with the workflow service. Registration after
//! startup is possible through `&mut` access but not expected.

use crate::task::{
    domain::TaskType,
    handlers::{TaskTypeHandler, TypeHandler},
};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A handler for the type is already registered.
    #[error("task type {0} is already registered")]
    DuplicateType(TaskType),

    /// No handler is registered for the type.
    #[error("no handler registered for task type: {0}")]
    UnregisteredType(TaskType),
}

/// Maps task types to their handlers.
#[derive(Debug, Clone, Default)]
pub struct TaskTypeRegistry {
    handlers: HashMap<TaskType, TypeHandler>,
}

impl TaskTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in handler.
    #[must_use]
    pub fn with_builtin_types() -> Self {
        let handlers = TaskType::ALL
            .into_iter()
            .map(|task_type| (task_type, TypeHandler::builtin(task_type)))
            .collect();
        Self { handlers }
    }

    /// Registers a handler under its own task type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateType`] when the type already has a
    /// handler.
    pub fn register(&mut self, handler: TypeHandler) -> Result<(), RegistryError> {
        let task_type = handler.task_type();
        if self.handlers.contains_key(&task_type) {
            return Err(RegistryError::DuplicateType(task_type));
        }
        self.handlers.insert(task_type, handler);
        Ok(())
    }

    /// Returns the handler for `task_type`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnregisteredType`] when no handler exists.
    pub fn get(&self, task_type: TaskType) -> Result<&TypeHandler, RegistryError> {
        self.handlers
            .get(&task_type)
            .ok_or(RegistryError::UnregisteredType(task_type))
    }

    /// Returns whether `task_type` has a handler.
    #[must_use]
    pub fn is_registered(&self, task_type: TaskType) -> bool {
        self.handlers.contains_key(&task_type)
    }

    /// Returns every registered task type.
    #[must_use]
    pub fn list_types(&self) -> BTreeSet<TaskType> {
        self.handlers.keys().copied().collect()
    }
}
