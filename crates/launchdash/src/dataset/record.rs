//! Launch record types.

use serde::{Deserialize, Serialize};

/// Outcome of a launch attempt.
///
/// Stored in the CSV as the integer column `class`; only `0` and `1` are
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Outcome {
    /// The launch failed (`class = 0`).
    Failure,
    /// The launch succeeded (`class = 1`).
    Success,
}

impl Outcome {
    /// The numeric class value (0 or 1).
    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Human-readable label used in charts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Failure => "Failure",
            Self::Success => "Success",
        }
    }

    /// Check if this outcome is a success.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the dataset: a single launch attempt.
///
/// Field names on the wire match the CSV headers. Columns not listed here
/// (the index column, `Flight Number`, `Booster Version`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Identifier of the launch site, e.g. `KSC LC-39A`.
    #[serde(rename = "Launch Site")]
    pub launch_site: String,

    /// Payload mass in kilograms.
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,

    /// Whether the launch succeeded.
    #[serde(rename = "class")]
    pub outcome: Outcome,

    /// Booster version category, e.g. `FT` or `B5`.
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Create a new launch record.
    #[must_use]
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        }
    }

    /// The outcome as its numeric class value.
    #[must_use]
    pub fn class(&self) -> u8 {
        self.outcome.class()
    }

    /// Check the record's own invariants.
    ///
    /// Returns a description of the first violation found.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.launch_site.trim().is_empty() {
            return Err("launch site must not be empty".to_string());
        }
        if !self.payload_mass_kg.is_finite() {
            return Err(format!(
                "payload mass must be a finite number, got {}",
                self.payload_mass_kg
            ));
        }
        if self.payload_mass_kg < 0.0 {
            return Err(format!(
                "payload mass must not be negative, got {}",
                self.payload_mass_kg
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_class_values() {
        assert_eq!(Outcome::Failure.class(), 0);
        assert_eq!(Outcome::Success.class(), 1);
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::Failure.is_success());
    }

    #[test]
    fn test_outcome_try_from() {
        assert_eq!(Outcome::try_from(0).unwrap(), Outcome::Failure);
        assert_eq!(Outcome::try_from(1).unwrap(), Outcome::Success);
        let err = Outcome::try_from(2).unwrap_err();
        assert!(err.contains("got 2"));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "Success");
        assert_eq!(Outcome::Failure.to_string(), "Failure");
    }

    #[test]
    fn test_outcome_serializes_as_class() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "1");
        let outcome: Outcome = serde_json::from_str("0").unwrap();
        assert_eq!(outcome, Outcome::Failure);
        assert!(serde_json::from_str::<Outcome>("3").is_err());
    }

    #[test]
    fn test_record_check_accepts_valid() {
        let record = LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0");
        assert!(record.check().is_ok());
        assert_eq!(record.class(), 0);
    }

    #[test]
    fn test_record_check_rejects_negative_payload() {
        let record = LaunchRecord::new("CCAFS LC-40", -1.0, Outcome::Success, "FT");
        let err = record.check().unwrap_err();
        assert!(err.contains("negative"));
    }

    #[test]
    fn test_record_check_rejects_nan_payload() {
        let record = LaunchRecord::new("CCAFS LC-40", f64::NAN, Outcome::Success, "FT");
        assert!(record.check().unwrap_err().contains("finite"));
    }

    #[test]
    fn test_record_check_rejects_blank_site() {
        let record = LaunchRecord::new("  ", 100.0, Outcome::Success, "FT");
        assert!(record.check().unwrap_err().contains("launch site"));
    }
}
