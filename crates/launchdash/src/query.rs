//! Queries over the launch dataset.
//!
//! Both functions are pure: they read the dataset and the current control
//! values and return a chart specification. Neither can fail; a filter that
//! matches nothing produces an empty chart.

use std::collections::BTreeMap;

use tracing::trace;

use crate::chart::{PieChart, ScatterChart, ScatterPoint};
use crate::controls::{PayloadRange, SiteSelection};
use crate::dataset::{Dataset, Outcome};

/// Site Success Aggregator.
///
/// With [`SiteSelection::All`], sums the outcome class per launch site
/// (sites ordered by identifier; all-failure sites appear with 0). With a
/// single site, counts each outcome at that site; outcomes that never occur
/// are left out, and the rest are ordered by count, most frequent first.
#[must_use]
pub fn site_success(dataset: &Dataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for record in dataset.records() {
                *per_site.entry(&record.launch_site).or_default() += u64::from(record.class());
            }

            let mut pie = PieChart::empty("Total successful launches by site");
            for (site, successes) in per_site {
                pie.push(site, successes);
            }
            pie
        }
        SiteSelection::Site(id) => {
            let (mut successes, mut failures) = (0u64, 0u64);
            for record in dataset.records_at(id) {
                match record.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }
            trace!(site = %id, successes, failures, "Counted outcomes");

            let mut counts = [(Outcome::Success, successes), (Outcome::Failure, failures)];
            // Stable sort keeps Success ahead of Failure on a tie.
            counts.sort_by(|a, b| b.1.cmp(&a.1));

            let mut pie = PieChart::empty(format!("Total successful launches for site {id}"));
            for (outcome, count) in counts {
                if count > 0 {
                    pie.push(outcome.label(), count);
                }
            }
            pie
        }
    }
}

/// Payload/Outcome Correlator.
///
/// Keeps records whose payload lies in `payload` (inclusive) and, for a
/// single-site selection, that flew from that site. Points are grouped into
/// one series per booster version category.
#[must_use]
pub fn payload_outcome(
    dataset: &Dataset,
    site: &SiteSelection,
    payload: PayloadRange,
) -> ScatterChart {
    let title = match site {
        SiteSelection::All => "Correlation between payload and success for all sites".to_string(),
        SiteSelection::Site(id) => format!("Correlation between payload and success for site {id}"),
    };

    let mut scatter = ScatterChart::empty(title);
    for record in dataset
        .records()
        .iter()
        .filter(|r| payload.contains(r.payload_mass_kg) && site.matches(&r.launch_site))
    {
        scatter.push(
            &record.booster_version_category,
            ScatterPoint {
                payload_mass_kg: record.payload_mass_kg,
                outcome: record.outcome,
                launch_site: record.launch_site.clone(),
            },
        );
    }
    trace!(
        site = %site,
        low = payload.low,
        high = payload.high,
        points = scatter.point_count(),
        "Filtered payload range"
    );
    scatter
}
