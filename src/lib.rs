//! Tasktrail: task tracking with per-type status workflows.
//!
//! Tasks of different types (procurement, development) move through their
//! own numbered statuses one step at a time. Each status can demand custom
//! fields before a task may enter it, and a task at its final status can be
//! closed, after which it never changes again.
//!
//! # Architecture
//!
//! Tasktrail follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task domain, type handlers, registry, and workflow service
//! - [`config`]: Layered TOML and environment configuration
//! - [`observability`]: Tracing subscriber setup for binaries

pub mod config;
pub mod observability;
pub mod task;
