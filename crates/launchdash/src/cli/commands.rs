//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::controls::{parse_bound, PayloadRange, SiteSelection};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Open the dashboard in a browser once listening
    #[arg(long)]
    pub open: bool,
}

/// Pie command arguments.
#[derive(Debug, Args)]
pub struct PieCommand {
    /// Launch site, or "All Sites"
    #[arg(short, long, default_value = "All Sites")]
    pub site: SiteSelection,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Scatter command arguments.
#[derive(Debug, Args)]
pub struct ScatterCommand {
    /// Launch site, or "All Sites"
    #[arg(short, long, default_value = "All Sites")]
    pub site: SiteSelection,

    /// Lower payload bound in kg (defaults to the observed minimum)
    #[arg(long, value_parser = parse_bound, allow_hyphen_values = true)]
    pub low: Option<f64>,

    /// Upper payload bound in kg (defaults to the observed maximum)
    #[arg(long, value_parser = parse_bound, allow_hyphen_values = true)]
    pub high: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl ScatterCommand {
    /// Resolve the payload range, filling missing bounds from `defaults`.
    #[must_use]
    pub fn payload_range(&self, defaults: PayloadRange) -> PayloadRange {
        PayloadRange::new(
            self.low.unwrap_or(defaults.low),
            self.high.unwrap_or(defaults.high),
        )
    }
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for chart commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text table
    #[default]
    Plain,
    /// Chart specification as JSON
    Json,
    /// Plotly figure as JSON
    Figure,
}
