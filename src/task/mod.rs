//! Task tracking with per-type status workflows.
//!
//! Tasks advance through the numbered statuses of their type, one step at a
//! time, gathering the custom fields each status requires. A task at its
//! final status can be closed, after which it is frozen. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the status transition rule in [`domain`]
//! - Per-type requirements and field normalization in [`handlers`]
//! - The immutable task type lookup in [`registry`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
mod tests;
