//! HTTP surface for the dashboard.
//!
//! Serves one static page that loads Plotly.js, plus JSON endpoints the page
//! calls whenever a control changes. All handlers share one immutable
//! [`Dashboard`] through `Arc`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controls::{parse_bound, ControlId, ControlState, PayloadRange, SiteSelection};
use crate::dashboard::{ChartId, ChartUpdate, Dashboard, DashboardLayout};
use crate::error::{Error, Result};

const INDEX_HTML: &str = include_str!("index.html");

/// Query parameters for the pie chart endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PieQuery {
    /// Selected site; defaults to all sites.
    pub site: Option<String>,
}

/// Query parameters for the scatter chart endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ScatterQuery {
    /// Selected site; defaults to all sites.
    pub site: Option<String>,
    /// Lower payload bound; defaults to the observed minimum.
    pub low: Option<String>,
    /// Upper payload bound; defaults to the observed maximum.
    pub high: Option<String>,
}

impl ScatterQuery {
    /// Resolve the requested payload range, filling missing bounds from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is present but not a finite number.
    pub fn payload_range(&self, defaults: PayloadRange) -> Result<PayloadRange> {
        let low = self.low.as_deref().map(parse_bound).transpose()?;
        let high = self.high.as_deref().map(parse_bound).transpose()?;
        Ok(PayloadRange::new(
            low.unwrap_or(defaults.low),
            high.unwrap_or(defaults.high),
        ))
    }
}

/// Body of a callback request: which control changed, and every control's value.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    /// The control the user just changed.
    pub changed: ControlId,
    /// Current values of all controls.
    pub state: ControlState,
}

/// One redrawn output in a callback response.
#[derive(Debug, Serialize)]
pub struct FigureUpdate {
    /// Which output to redraw.
    pub output: ChartId,
    /// Plotly figure for the output.
    pub figure: Value,
}

impl From<ChartUpdate> for FigureUpdate {
    fn from(update: ChartUpdate) -> Self {
        Self {
            output: update.output,
            figure: update.chart.to_figure(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidSelection { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the router.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/layout", get(layout_handler))
        .route("/api/charts/success-pie-chart", get(pie_handler))
        .route(
            "/api/charts/success-payload-scatter-chart",
            get(scatter_handler),
        )
        .route("/api/figures", get(figures_handler))
        .route("/api/callbacks", post(callbacks_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// Bind `addr` and serve the dashboard until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("failed to bind {addr}: {e}")))?;
    let local = listener.local_addr()?;
    info!(
        records = dashboard.dataset().len(),
        "Dashboard listening on http://{local}"
    );

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "records": dashboard.dataset().len(),
    }))
}

async fn layout_handler(State(dashboard): State<Arc<Dashboard>>) -> Json<DashboardLayout> {
    Json(dashboard.layout().clone())
}

async fn pie_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<PieQuery>,
) -> Json<Value> {
    let mut state = dashboard.default_state();
    if let Some(site) = query.site {
        state.site = SiteSelection::from(site);
    }
    Json(render_figure(&dashboard, ChartId::SuccessPie, &state))
}

async fn scatter_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<Value>> {
    let payload = query.payload_range(dashboard.default_state().payload)?;
    let state = ControlState::new(
        query.site.map(SiteSelection::from).unwrap_or_default(),
        payload,
    );
    Ok(Json(render_figure(
        &dashboard,
        ChartId::SuccessPayloadScatter,
        &state,
    )))
}

async fn figures_handler(State(dashboard): State<Arc<Dashboard>>) -> Json<Vec<FigureUpdate>> {
    let updates = dashboard
        .render_all(&dashboard.default_state())
        .into_iter()
        .map(FigureUpdate::from)
        .collect();
    Json(updates)
}

async fn callbacks_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Json(request): Json<CallbackRequest>,
) -> Json<Vec<FigureUpdate>> {
    let updates = dashboard
        .dispatch(request.changed, &request.state)
        .into_iter()
        .map(FigureUpdate::from)
        .collect();
    Json(updates)
}

fn render_figure(dashboard: &Dashboard, output: ChartId, state: &ControlState) -> Value {
    dashboard
        .render(output, state)
        .map_or_else(|| json!({ "data": [], "layout": {} }), |chart| chart.to_figure())
}
