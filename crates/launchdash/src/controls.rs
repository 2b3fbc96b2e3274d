//! Dashboard controls: the site selector and the payload range selector.
//!
//! This module holds both the *values* the controls produce
//! ([`SiteSelection`], [`PayloadRange`], [`ControlState`]) and the
//! *descriptions* the page needs to draw them ([`SiteDropdown`],
//! [`PayloadSlider`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;
use crate::dataset::Dataset;
use crate::error::Error;

/// Label and value of the "all sites" entry in the site selector.
pub const ALL_SITES: &str = "All Sites";

/// Value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    /// Every launch site.
    #[default]
    All,
    /// A single launch site, by identifier.
    Site(String),
}

impl SiteSelection {
    /// Select a single site.
    #[must_use]
    pub fn site(id: impl Into<String>) -> Self {
        Self::Site(id.into())
    }

    /// Check whether a record from `site` passes this selection.
    #[must_use]
    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(id) => id == site,
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(ALL_SITES) || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Site(trimmed.to_string())
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        selection.to_string()
    }
}

impl FromStr for SiteSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SITES),
            Self::Site(id) => f.write_str(id),
        }
    }
}

/// Inclusive payload mass range in kilograms.
///
/// A range with `low > high` is valid and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl PayloadRange {
    /// Create a new range.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check if `mass` lies within `[low, high]`.
    #[must_use]
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    /// Check if no value can satisfy the range.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }
}

/// Parse one payload bound from text.
///
/// # Errors
///
/// Returns an error if the text is not a finite number.
pub fn parse_bound(text: &str) -> Result<f64, Error> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::invalid_selection(format!("'{}' is not a number", text.trim())))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_selection(format!(
            "payload bound must be finite, got {value}"
        )))
    }
}

/// Current values of every dashboard control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Selected launch site.
    pub site: SiteSelection,
    /// Selected payload range.
    pub payload: PayloadRange,
}

impl ControlState {
    /// Create a control state.
    #[must_use]
    pub fn new(site: SiteSelection, payload: PayloadRange) -> Self {
        Self { site, payload }
    }

    /// The initial state: all sites and the slider's default range.
    #[must_use]
    pub fn initial(slider: &PayloadSlider) -> Self {
        Self {
            site: SiteSelection::All,
            payload: slider.value,
        }
    }
}

/// One option of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Text shown to the user.
    pub label: String,
    /// Value sent back on selection.
    pub value: String,
}

impl DropdownOption {
    fn same(text: &str) -> Self {
        Self {
            label: text.to_string(),
            value: text.to_string(),
        }
    }
}

/// Description of the site selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDropdown {
    /// Stable control id.
    pub id: &'static str,
    /// "All Sites" followed by every site in the dataset.
    pub options: Vec<DropdownOption>,
    /// Initially selected value.
    pub value: SiteSelection,
    /// Placeholder text when nothing is selected.
    pub placeholder: &'static str,
    /// Whether the user can type to filter options.
    pub searchable: bool,
}

impl SiteDropdown {
    /// Build the selector for `dataset`.
    #[must_use]
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let options = std::iter::once(DropdownOption::same(ALL_SITES))
            .chain(dataset.sites().iter().map(|s| DropdownOption::same(s)))
            .collect();
        Self {
            id: ControlId::SiteDropdown.as_str(),
            options,
            value: SiteSelection::All,
            placeholder: "Select a Launch Site here",
            searchable: true,
        }
    }
}

/// A labelled tick on the payload slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    /// Position of the mark.
    pub value: f64,
    /// Text shown at the mark.
    pub label: String,
}

/// Description of the payload range selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSlider {
    /// Stable control id.
    pub id: &'static str,
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Step between selectable values.
    pub step: f64,
    /// Labelled ticks, one per step.
    pub marks: Vec<SliderMark>,
    /// Initially selected range.
    pub value: PayloadRange,
}

impl PayloadSlider {
    /// Build the slider from configuration and the dataset's payload bounds.
    ///
    /// The initial range is the observed `[min, max]`; for an empty dataset it
    /// falls back to the slider's own bounds.
    #[must_use]
    pub fn new(config: &SliderConfig, dataset: &Dataset) -> Self {
        let marks = mark_values(config.min, config.max, config.step)
            .map(|value| SliderMark {
                value: f64::from(value),
                label: format!("{value} (Kg)"),
            })
            .collect();

        let value = dataset
            .payload_bounds()
            .unwrap_or_else(|| PayloadRange::new(f64::from(config.min), f64::from(config.max)));

        Self {
            id: ControlId::PayloadSlider.as_str(),
            min: f64::from(config.min),
            max: f64::from(config.max),
            step: f64::from(config.step),
            marks,
            value,
        }
    }
}

fn mark_values(min: u32, max: u32, step: u32) -> impl Iterator<Item = u32> {
    let step = usize::try_from(step.max(1)).unwrap_or(usize::MAX);
    (min..=max).step_by(step)
}

/// Identifier of an input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlId {
    /// The launch site selector.
    #[serde(rename = "site-dropdown")]
    SiteDropdown,
    /// The payload range selector.
    #[serde(rename = "payload-slider")]
    PayloadSlider,
}

impl ControlId {
    /// Stable string id used by the page.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SiteDropdown => "site-dropdown",
            Self::PayloadSlider => "payload-slider",
        }
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    #[test]
    fn test_site_selection_parse() {
        assert_eq!(SiteSelection::from("All Sites"), SiteSelection::All);
        assert_eq!(SiteSelection::from("all"), SiteSelection::All);
        assert_eq!(SiteSelection::from("  ALL SITES "), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("KSC LC-39A"),
            SiteSelection::site("KSC LC-39A")
        );
        assert_eq!(
            "VAFB SLC-4E".parse::<SiteSelection>().unwrap(),
            SiteSelection::site("VAFB SLC-4E")
        );
    }

    #[test]
    fn test_site_selection_display_round_trips_sentinel() {
        assert_eq!(SiteSelection::All.to_string(), ALL_SITES);
        assert_eq!(SiteSelection::site("KSC LC-39A").to_string(), "KSC LC-39A");
    }

    #[test]
    fn test_site_selection_serde_as_string() {
        let json = serde_json::to_string(&SiteSelection::All).unwrap();
        assert_eq!(json, "\"All Sites\"");
        let site: SiteSelection = serde_json::from_str("\"CCAFS LC-40\"").unwrap();
        assert_eq!(site, SiteSelection::site("CCAFS LC-40"));
    }

    #[test]
    fn test_site_selection_matches() {
        assert!(SiteSelection::All.matches("anything"));
        let ksc = SiteSelection::site("KSC LC-39A");
        assert!(ksc.matches("KSC LC-39A"));
        assert!(!ksc.matches("CCAFS LC-40"));
    }

    #[test]
    fn test_payload_range_contains_is_inclusive() {
        let range = PayloadRange::new(0.0, 500.0);
        assert!(range.contains(0.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(600.0));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_payload_range_inverted_is_empty() {
        let range = PayloadRange::new(5000.0, 1000.0);
        assert!(range.is_empty());
        assert!(!range.contains(3000.0));
    }

    #[test]
    fn test_parse_bound_rejects_non_finite() {
        assert!(parse_bound("inf").is_err());
        assert!(parse_bound("NaN").is_err());
        assert!((parse_bound(" 42 ").unwrap() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_site_dropdown_options() {
        let dropdown = SiteDropdown::for_dataset(&fixtures::sample());
        let values: Vec<&str> = dropdown.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            [
                ALL_SITES,
                "CCAFS LC-40",
                "VAFB SLC-4E",
                "KSC LC-39A",
                "CCAFS SLC-40"
            ]
        );
        assert_eq!(dropdown.value, SiteSelection::All);
        assert_eq!(dropdown.id, "site-dropdown");
    }

    #[test]
    fn test_payload_slider_defaults() {
        let slider = PayloadSlider::new(&SliderConfig::default(), &fixtures::sample());
        assert!((slider.min - 0.0).abs() < f64::EPSILON);
        assert!((slider.max - 10_000.0).abs() < f64::EPSILON);
        assert!((slider.step - 1000.0).abs() < f64::EPSILON);
        assert_eq!(slider.marks.len(), 11);
        assert_eq!(slider.marks[3].label, "3000 (Kg)");
        assert_eq!(slider.value, PayloadRange::new(0.0, 9600.0));
    }

    #[test]
    fn test_payload_slider_empty_dataset_falls_back_to_bounds() {
        let slider = PayloadSlider::new(&SliderConfig::default(), &Dataset::default());
        assert_eq!(slider.value, PayloadRange::new(0.0, 10_000.0));
    }

    #[test]
    fn test_control_state_initial() {
        let slider = PayloadSlider::new(&SliderConfig::default(), &fixtures::sample());
        let state = ControlState::initial(&slider);
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, slider.value);
    }

    #[test]
    fn test_control_id_serde() {
        assert_eq!(
            serde_json::to_string(&ControlId::PayloadSlider).unwrap(),
            "\"payload-slider\""
        );
        let id: ControlId = serde_json::from_str("\"site-dropdown\"").unwrap();
        assert_eq!(id, ControlId::SiteDropdown);
        assert_eq!(ControlId::SiteDropdown.to_string(), "site-dropdown");
    }
}
