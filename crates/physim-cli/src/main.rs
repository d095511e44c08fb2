// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! physim CLI entrypoint.
//!
//! Developer commands for scene buffers: write a demo scene, inspect a
//! buffer's layout, check that decode then encode is byte-identical, and run
//! ticks over a stored scene.
//!
//! # Usage
//! ```text
//! physim [--config-dir DIR] [--verbose] <command> [options]
//! ```
//!
//! Exits with code `0` on success and non-zero on any error, including a
//! roundtrip that does not reproduce its input.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(spec) if !spec.is_empty() => EnvFilter::try_new(spec)?,
        _ => EnvFilter::try_new(default)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    commands::run(cli)
}
