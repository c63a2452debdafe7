//! Crate Digger - a Discogs catalog client for the command line.
//!
//! Searches the Discogs database for master releases, prints human-readable
//! summaries, optionally downloads cover images, and browses a user's
//! collection folders.

pub mod cli;
pub mod config;
pub mod discogs;

#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("crate_digger=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
