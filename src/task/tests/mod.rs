//! Unit tests for the task module.
//!
//! Tests are organised by concept: the status transition rule, the type
//! handlers, the registry, the task aggregate, and the workflow service
//! against in-memory and mocked ports.

mod domain_tests;
