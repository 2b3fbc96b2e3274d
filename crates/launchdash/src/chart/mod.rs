//! Chart specifications.
//!
//! The query functions produce these plain data types; the rendering
//! boundary in [`figure`] turns them into Plotly figures, and
//! [`Chart::render_text`] turns them into text for the terminal.

mod figure;

use std::fmt::Write as _;

use serde::Serialize;

use crate::dataset::Outcome;

/// Input for a proportion (pie) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    /// Chart title.
    pub title: String,
    /// Category labels, parallel to `values`.
    pub labels: Vec<String>,
    /// Category magnitudes, parallel to `labels`.
    pub values: Vec<u64>,
}

impl PieChart {
    /// Create an empty pie chart with the given title.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append a category.
    pub fn push(&mut self, label: impl Into<String>, value: u64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Check if the chart has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all category values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Value for the category named `label`, if present.
    #[must_use]
    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    /// Iterate over `(label, value)` pairs.
    pub fn slices(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// One point of the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass (x axis).
    pub payload_mass_kg: f64,
    /// Launch outcome (y axis).
    pub outcome: Outcome,
    /// Site the launch flew from.
    pub launch_site: String,
}

/// Points sharing one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// Booster version category; used as the series color key.
    pub name: String,
    /// Points in dataset order.
    pub points: Vec<ScatterPoint>,
}

/// Input for the payload/outcome correlation chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    /// Chart title.
    pub title: String,
    /// X axis title.
    pub x_title: &'static str,
    /// Y axis title.
    pub y_title: &'static str,
    /// One series per booster version category, in first-appearance order.
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    /// Create an empty scatter chart with the given title.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_title: "Payload Mass (kg)",
            y_title: "class",
            series: Vec::new(),
        }
    }

    /// Add a point to the series named `category`, creating it if needed.
    pub fn push(&mut self, category: &str, point: ScatterPoint) {
        if let Some(series) = self.series.iter_mut().find(|s| s.name == category) {
            series.points.push(point);
        } else {
            self.series.push(ScatterSeries {
                name: category.to_string(),
                points: vec![point],
            });
        }
    }

    /// Check if the chart has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Total number of points across all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Iterate over every point, regardless of series.
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

/// A chart specification of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    /// Proportion chart.
    Pie(PieChart),
    /// Correlation scatter chart.
    Scatter(ScatterChart),
}

impl Chart {
    /// The chart's title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Pie(pie) => &pie.title,
            Self::Scatter(scatter) => &scatter.title,
        }
    }

    /// Check if the chart has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Pie(pie) => pie.is_empty(),
            Self::Scatter(scatter) => scatter.is_empty(),
        }
    }

    /// Render the chart as plain text for terminal output.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        let _ = writeln!(out, "{}", "=".repeat(self.title().len()));

        if self.is_empty() {
            let _ = writeln!(out, "(no matching launches)");
            return out;
        }

        match self {
            Self::Pie(pie) => {
                let total = pie.total();
                let width = pie.labels.iter().map(String::len).max().unwrap_or(0);
                for (label, value) in pie.slices() {
                    let _ = writeln!(
                        out,
                        "  {label:<width$}  {value:>5}  {:>5.1}%",
                        percent(value, total)
                    );
                }
            }
            Self::Scatter(scatter) => {
                for series in &scatter.series {
                    let _ = writeln!(out, "[{}] {} point(s)", series.name, series.points.len());
                    for point in &series.points {
                        let _ = writeln!(
                            out,
                            "  {:>8.1} kg  {}  {}",
                            point.payload_mass_kg,
                            point.outcome.class(),
                            point.launch_site
                        );
                    }
                }
            }
        }
        out
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 * 100.0 / total as f64
    }
}

impl From<PieChart> for Chart {
    fn from(pie: PieChart) -> Self {
        Self::Pie(pie)
    }
}

impl From<ScatterChart> for Chart {
    fn from(scatter: ScatterChart) -> Self {
        Self::Scatter(scatter)
    }
}
