//! HTTP surface of the service.
//!
//! A single route, `GET /`, takes the viewport as query parameters and
//! answers with the serialized clustering result. All request validation
//! lives here: the engine behind it assumes a complete, well-formed
//! viewport and is never handed anything else.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use geocluster_core::{cluster, ClusterParams, GpsBounds, PointStore};

/// Shared per-process state: the frozen point store plus the operator-fixed
/// clustering knobs. Read-only after startup, so a plain `Arc` suffices.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: PointStore,
    pub grid_width: u8,
    pub grid_height: u8,
    pub excluded: (f64, f64),
}

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(cluster_handler)).with_state(state)
}

/// A validated viewport query.
#[derive(Debug, PartialEq)]
struct ViewportQuery {
    bounds: GpsBounds,
    clusterize: bool,
}

/// Strict query-string validation: all four bounds required, `cluster`
/// optional, anything else rejected.
fn parse_viewport(params: &HashMap<String, String>) -> Result<ViewportQuery, String> {
    let mut north = None;
    let mut south = None;
    let mut east = None;
    let mut west = None;
    let mut clusterize = true;

    for (key, value) in params {
        match key.as_str() {
            "north" => north = Some(parse_bound("north", value)?),
            "south" => south = Some(parse_bound("south", value)?),
            "east" => east = Some(parse_bound("east", value)?),
            "west" => west = Some(parse_bound("west", value)?),
            "cluster" => clusterize = value != "false",
            other => return Err(format!("Unknown parameter: {other}")),
        }
    }

    match (north, south, east, west) {
        (Some(north), Some(south), Some(east), Some(west)) => Ok(ViewportQuery {
            bounds: GpsBounds { north, south, east, west },
            clusterize,
        }),
        _ => Err("Missing parameters".to_string()),
    }
}

fn parse_bound(name: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid value for {name}: {value}"))
}

async fn cluster_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = match parse_viewport(&params) {
        Ok(query) => query,
        Err(message) => {
            error!("Bad request: {message}");
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };

    let started = Instant::now();
    let response = cluster(
        &state.store,
        &ClusterParams {
            bounds: query.bounds,
            excluded: state.excluded,
            width: state.grid_width,
            height: state.grid_height,
            clusterize: query.clusterize,
        },
    );
    info!(
        "Computation done in {:.2} ms",
        started.elapsed().as_secs_f64() * 1000.0
    );

    Json(response).into_response()
}
