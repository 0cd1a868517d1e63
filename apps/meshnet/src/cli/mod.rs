//! # Meshnet CLI Module
//!
//! The clap surface of the console binary.
//!
//! ## Available Commands
//!
//! - `run` - Execute a command script against a fresh topology
//!
//! With no subcommand, `run` on stdin/stdout is implied, so
//! `meshnet < commands.txt` just works.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Meshnet - Resistance Network Console
///
/// Feeds a line-oriented command script to the deterministic topology
/// engine and logs one response per command.
#[derive(Parser, Debug)]
#[command(name = "meshnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output replies as JSON lines (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a command script against a fresh topology
    Run {
        /// Path to the command script; stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path for the response log; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> std::io::Result<()> {
    let json = cli.json;

    match cli.command {
        Some(Commands::Run { file, output }) => {
            cmd_run(file.as_deref(), output.as_deref(), json)
        }
        // No subcommand - interpret stdin by default.
        None => cmd_run(None, None, json),
    }
}
