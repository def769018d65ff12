//! Point-set ingestion.
//!
//! The clustering engine works over a set loaded once at startup and never
//! mutated afterwards. The upstream system of record (a SQL database in the
//! original deployment) stays outside this service; what crosses the
//! boundary is a JSON document of point records, one object per point.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use geocluster_core::{Point, PointStore};

/// Errors produced while loading the point set.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read points file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse points file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One record of the ingestion document.
///
/// `disappeared` is the raw status flag; its grid mapping is fixed in
/// `geocluster-core` (`true` feeds the `cleaned` side of the response).
#[derive(Debug, Deserialize)]
pub struct PointRecord {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub disappeared: bool,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Loads and freezes the point store from a JSON document.
///
/// Record order in the document becomes store order, which in turn is the
/// engine's assignment order. Empty descriptions are treated as absent so
/// they are never echoed on the wire.
pub async fn load_points(path: &Path) -> Result<PointStore, SourceError> {
    let content = tokio::fs::read_to_string(path).await?;
    let records: Vec<PointRecord> = serde_json::from_str(&content)?;

    let points = records
        .into_iter()
        .map(|record| {
            let desc = record.desc.filter(|d| !d.is_empty());
            Point::from_gps(record.id, record.lat, record.lng, record.disappeared, desc)
        })
        .collect::<Vec<_>>();

    info!("Loaded {} points from {}", points.len(), path.display());
    Ok(PointStore::new(points))
}
