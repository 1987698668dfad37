//! Step definitions for task workflow BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
