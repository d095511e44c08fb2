// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "physim", version)]
#[command(about = "Inspect, check, and drive physim scene buffers")]
pub struct Cli {
    /// Directory holding scene.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a buffer holding N single-triangle objects
    Demo {
        /// Output path
        #[arg(long)]
        out: PathBuf,
        /// Number of objects
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Summarize a buffer's objects and offsets
    Inspect {
        /// Buffer file
        file: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decode then re-encode; fail unless the bytes are identical
    Roundtrip {
        /// Buffer file
        file: PathBuf,
    },
    /// Decode, tick every object, and re-encode
    Tick {
        /// Buffer file
        file: PathBuf,
        /// Time step in seconds
        #[arg(long, allow_hyphen_values = true)]
        delta: f64,
        /// Number of ticks
        #[arg(long, default_value_t = 1)]
        steps: u32,
        /// Where to write the ticked scene
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
