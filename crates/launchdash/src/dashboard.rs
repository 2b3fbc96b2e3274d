//! Dashboard wiring: which chart depends on which control.
//!
//! Each chart output is registered as a [`Callback`]: the controls it reads
//! and a pure function from the current [`ControlState`] to a [`Chart`].
//! The hosting layer (HTTP handlers, CLI) reports which control changed and
//! the dashboard re-renders exactly the outputs that depend on it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::Chart;
use crate::config::Config;
use crate::controls::{ControlId, ControlState, PayloadSlider, SiteDropdown};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::query;

/// Identifier of a chart output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartId {
    /// The site success proportion chart.
    #[serde(rename = "success-pie-chart")]
    SuccessPie,
    /// The payload/outcome scatter chart.
    #[serde(rename = "success-payload-scatter-chart")]
    SuccessPayloadScatter,
}

impl ChartId {
    /// Stable string id used by the page.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuccessPie => "success-pie-chart",
            Self::SuccessPayloadScatter => "success-payload-scatter-chart",
        }
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature of a chart render function.
pub type RenderFn = fn(&Dataset, &ControlState) -> Chart;

/// A registered chart output and the controls it depends on.
#[derive(Debug, Clone, Copy)]
pub struct Callback {
    /// The chart this callback renders.
    pub output: ChartId,
    /// Controls whose changes trigger this callback.
    pub inputs: &'static [ControlId],
    /// Pure render function.
    pub render: RenderFn,
}

impl Callback {
    /// Check if a change to `control` should trigger this callback.
    #[must_use]
    pub fn listens_to(&self, control: ControlId) -> bool {
        self.inputs.contains(&control)
    }
}

fn render_success_pie(dataset: &Dataset, state: &ControlState) -> Chart {
    query::site_success(dataset, &state.site).into()
}

fn render_payload_scatter(dataset: &Dataset, state: &ControlState) -> Chart {
    query::payload_outcome(dataset, &state.site, state.payload).into()
}

/// The two standard callbacks.
pub const STANDARD_CALLBACKS: [Callback; 2] = [
    Callback {
        output: ChartId::SuccessPie,
        inputs: &[ControlId::SiteDropdown],
        render: render_success_pie,
    },
    Callback {
        output: ChartId::SuccessPayloadScatter,
        inputs: &[ControlId::SiteDropdown, ControlId::PayloadSlider],
        render: render_payload_scatter,
    },
];

/// A rendered chart together with the output it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    /// Which output to redraw.
    pub output: ChartId,
    /// The new chart.
    pub chart: Chart,
}

/// Serializable description of the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    /// Page heading.
    pub title: String,
    /// The site selector.
    pub site_dropdown: SiteDropdown,
    /// The payload range selector.
    pub payload_slider: PayloadSlider,
    /// Chart outputs, in page order.
    pub charts: Vec<ChartId>,
}

/// The dataset plus the registered callbacks.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    callbacks: Vec<Callback>,
    layout: DashboardLayout,
}

impl Dashboard {
    /// Create a dashboard with no callbacks registered.
    #[must_use]
    pub fn empty(dataset: Arc<Dataset>, config: &Config) -> Self {
        let layout = DashboardLayout {
            title: config.dashboard.title.clone(),
            site_dropdown: SiteDropdown::for_dataset(&dataset),
            payload_slider: PayloadSlider::new(&config.slider, &dataset),
            charts: Vec::new(),
        };
        Self {
            dataset,
            callbacks: Vec::new(),
            layout,
        }
    }

    /// Create a dashboard with the standard pie and scatter callbacks.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, config: &Config) -> Self {
        let mut dashboard = Self::empty(dataset, config);
        for callback in STANDARD_CALLBACKS {
            dashboard.callbacks.push(callback);
            dashboard.layout.charts.push(callback.output);
        }
        dashboard
    }

    /// Register a callback.
    ///
    /// # Errors
    ///
    /// Returns an error if a callback for the same output is already registered.
    pub fn register(&mut self, callback: Callback) -> Result<()> {
        if self.callbacks.iter().any(|c| c.output == callback.output) {
            return Err(Error::DuplicateCallback {
                output: callback.output.as_str(),
            });
        }
        debug!(output = %callback.output, inputs = ?callback.inputs, "Registered callback");
        self.callbacks.push(callback);
        self.layout.charts.push(callback.output);
        Ok(())
    }

    /// The dataset the dashboard reads.
    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Registered callbacks, in registration order.
    #[must_use]
    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// The page description.
    #[must_use]
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    /// The control state the page starts with.
    #[must_use]
    pub fn default_state(&self) -> ControlState {
        ControlState::initial(&self.layout.payload_slider)
    }

    /// Render a single output.
    ///
    /// Returns `None` if no callback is registered for `output`.
    #[must_use]
    pub fn render(&self, output: ChartId, state: &ControlState) -> Option<Chart> {
        self.callbacks
            .iter()
            .find(|c| c.output == output)
            .map(|c| (c.render)(&self.dataset, state))
    }

    /// Re-render every output that depends on `changed`.
    #[must_use]
    pub fn dispatch(&self, changed: ControlId, state: &ControlState) -> Vec<ChartUpdate> {
        let updates: Vec<ChartUpdate> = self
            .callbacks
            .iter()
            .filter(|c| c.listens_to(changed))
            .map(|c| self.run(c, state))
            .collect();
        debug!(
            control = %changed,
            site = %state.site,
            outputs = updates.len(),
            "Dispatched control change"
        );
        updates
    }

    /// Render every output, as on first page load.
    #[must_use]
    pub fn render_all(&self, state: &ControlState) -> Vec<ChartUpdate> {
        self.callbacks.iter().map(|c| self.run(c, state)).collect()
    }

    fn run(&self, callback: &Callback, state: &ControlState) -> ChartUpdate {
        ChartUpdate {
            output: callback.output,
            chart: (callback.render)(&self.dataset, state),
        }
    }
}
