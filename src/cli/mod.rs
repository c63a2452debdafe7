//! Command-line interface for crate-digger.
//!
//! This module provides the commands for searching the catalog, browsing
//! collection folders, and managing the stored configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
