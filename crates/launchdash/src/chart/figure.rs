//! Plotly figure rendering.
//!
//! Turns chart specifications into the `{ "data": [...], "layout": {...} }`
//! objects that Plotly.js draws in the browser.

use serde_json::{json, Value};

use super::{Chart, PieChart, ScatterChart};

/// Legend title for the scatter chart's color key.
const COLOR_LEGEND_TITLE: &str = "Booster Version Category";

impl Chart {
    /// Render the chart as a Plotly figure.
    #[must_use]
    pub fn to_figure(&self) -> Value {
        match self {
            Self::Pie(pie) => pie_figure(pie),
            Self::Scatter(scatter) => scatter_figure(scatter),
        }
    }
}

fn pie_figure(pie: &PieChart) -> Value {
    json!({
        "data": [{
            "type": "pie",
            "labels": pie.labels,
            "values": pie.values,
            "sort": false,
            "textinfo": "percent",
            "hovertemplate": "%{label}<br>%{value}<extra></extra>",
        }],
        "layout": {
            "title": { "text": pie.title },
            "legend": { "tracegroupgap": 0 },
        },
    })
}

fn scatter_figure(scatter: &ScatterChart) -> Value {
    let traces: Vec<Value> = scatter
        .series
        .iter()
        .map(|series| {
            let x: Vec<f64> = series.points.iter().map(|p| p.payload_mass_kg).collect();
            let y: Vec<u8> = series.points.iter().map(|p| p.outcome.class()).collect();
            let sites: Vec<&str> = series
                .points
                .iter()
                .map(|p| p.launch_site.as_str())
                .collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": series.name,
                "legendgroup": series.name,
                "x": x,
                "y": y,
                "customdata": sites,
                "hovertemplate": format!(
                    "{}={}<br>{}=%{{x}}<br>{}=%{{y}}<br>site=%{{customdata}}<extra></extra>",
                    COLOR_LEGEND_TITLE, series.name, scatter.x_title, scatter.y_title
                ),
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": scatter.title },
            "xaxis": { "title": { "text": scatter.x_title } },
            "yaxis": {
                "title": { "text": scatter.y_title },
                "tickvals": [0, 1],
                "range": [-0.25, 1.25],
            },
            "legend": { "title": { "text": COLOR_LEGEND_TITLE } },
        },
    })
}
