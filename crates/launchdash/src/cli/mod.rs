//! Command-line interface for launchdash.
//!
//! This module provides the CLI structure for the `launchdash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, OutputFormat, PieCommand, ScatterCommand, ServeCommand, SummaryCommand,
};

/// launchdash - Interactive launch records dashboard
///
/// Loads a CSV of launch records and serves a dashboard with a launch site
/// selector, a payload range selector, a success proportion chart, and a
/// payload/outcome scatter chart. The same charts can be printed directly.
#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the launch records CSV (overrides config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve(ServeCommand),

    /// Print the launch success proportion chart
    Pie(PieCommand),

    /// Print the payload/outcome correlation chart
    Scatter(ScatterCommand),

    /// Summarize the dataset
    Summary(SummaryCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
