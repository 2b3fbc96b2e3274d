//! `launchdash` - An interactive dashboard over launch records
//!
//! This library loads a CSV of launch records into an immutable [`Dataset`],
//! answers the dashboard's two queries (success proportions per site, and
//! payload versus outcome), and wires them to the dashboard's controls.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod chart;
pub mod cli;
pub mod config;
pub mod controls;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod query;
pub mod server;

pub use chart::{Chart, PieChart, ScatterChart};
pub use config::Config;
pub use controls::{ControlId, ControlState, PayloadRange, SiteSelection};
pub use dashboard::{ChartId, Dashboard};
pub use dataset::{Dataset, LaunchRecord, Outcome};
pub use error::{Error, Result};
pub use logging::init_logging;
