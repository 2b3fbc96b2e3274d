//! The launch records dataset.
//!
//! A [`Dataset`] is built once at startup, either from records directly or
//! from a CSV file, and is immutable afterwards. Consumers share it through
//! `Arc<Dataset>`; nothing in the crate mutates it after construction.

mod loader;
mod record;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::controls::PayloadRange;

pub use record::{LaunchRecord, Outcome};

/// Immutable collection of launch records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Observed payload bounds; `None` when there are no records.
    payload_bounds: Option<PayloadRange>,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    #[must_use]
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.iter().any(|s| s == &record.launch_site) {
                sites.push(record.launch_site.clone());
            }
        }

        let payload_bounds = records.iter().map(|r| r.payload_mass_kg).fold(
            None,
            |bounds: Option<PayloadRange>, mass| match bounds {
                None => Some(PayloadRange::new(mass, mass)),
                Some(range) => Some(PayloadRange::new(range.low.min(mass), range.high.max(mass))),
            },
        );

        Self {
            records,
            sites,
            payload_bounds,
        }
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites, in order of first appearance.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// The observed `[min, max]` payload mass, or `None` for an empty dataset.
    #[must_use]
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.payload_bounds
    }

    /// Records launched from `site`.
    pub fn records_at<'a>(&'a self, site: &'a str) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        self.records.iter().filter(move |r| r.launch_site == site)
    }

    /// Summarize the dataset.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        let mut per_site: BTreeMap<String, SiteSummary> = BTreeMap::new();
        for record in &self.records {
            let entry = per_site.entry(record.launch_site.clone()).or_default();
            entry.launches += 1;
            if record.outcome.is_success() {
                entry.successes += 1;
            }
        }

        DatasetSummary {
            records: self.records.len(),
            successes: self.records.iter().filter(|r| r.outcome.is_success()).count(),
            payload_bounds: self.payload_bounds,
            sites: per_site,
        }
    }
}

/// Launch and success counts for one site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    /// Total launches from the site.
    pub launches: usize,
    /// Successful launches from the site.
    pub successes: usize,
}

/// Aggregate statistics over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Total number of records.
    pub records: usize,
    /// Number of successful launches.
    pub successes: usize,
    /// Observed payload bounds.
    pub payload_bounds: Option<PayloadRange>,
    /// Per-site counts, keyed by site identifier.
    pub sites: BTreeMap<String, SiteSummary>,
}
