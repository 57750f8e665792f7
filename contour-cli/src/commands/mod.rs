//! Command implementations.
//!
//! Each command module provides a `run` function that executes the command
//! logic.

pub mod diff;
pub mod graph;
pub mod snapshot;
