//! Drowsewatch CLI
//!
//! Command-line interface for the drowsewatch driver-drowsiness monitoring
//! system.
//!
//! # Features
//!
//! - **run**: start the channel workers and the remote command API
//! - **version**: display version information
//!
//! # Usage
//!
//! ```bash
//! # Monitor heart-rate and cabin streams, serve the command API
//! drowsewatch run \
//!     --heart-rate-input /dev/ttyACM0 \
//!     --cabin-input /dev/ttyUSB0 \
//!     --listen 127.0.0.1:8090
//!
//! # Pre-register the alert recipient
//! drowsewatch run --heart-rate-input pulse.log --recipient 01012345678
//!
//! # Use the batch heart-rate detector instead of per-sample deviation
//! drowsewatch run --heart-rate-input pulse.log --heart-rate-mode batch
//! ```

use clap::{Parser, Subcommand};

pub mod run;

/// Drowsewatch Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "drowsewatch")]
#[command(author, version, about = "Driver drowsiness monitoring and alerting")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitoring workers and command API
    Run(run::RunArgs),

    /// Display version information
    Version,
}
