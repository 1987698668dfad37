//! Adapter implementations of the task ports.
//!
//! - [`memory`]: thread-safe in-memory stores for tests and tooling
//! - [`postgres`]: Diesel-backed `PostgreSQL` stores

pub mod memory;
pub mod postgres;
