//! # fieldvim-testing
//!
//! Testing utilities for the fieldvim engine: a scripted in-memory host
//! implementing every capability trait, and a scenario builder for driving
//! a manager through key presses and host signals.
//!
//! The end-to-end scenario tests for the engine live in this crate's
//! `tests/` directory.

mod host;
mod scenario;

pub use host::ScriptedHost;
pub use scenario::{Scenario, ScenarioBuilder};
