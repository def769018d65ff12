//! The clustering computation: cell assignment and per-cell aggregation.
//!
//! One call to [`cluster`] is the whole request-scoped pipeline: build two
//! fresh status grids over the viewport, assign every point of the store to
//! the first containing cell of its status grid, aggregate each cell, and
//! render the response. Everything built here is owned by the call and
//! dropped when the response goes out; no state survives between requests.

use tracing::debug;

use crate::coords::NormalizedPos;
use crate::grid::{BoundingBox, Cell, Grid};
use crate::point::{PointStatus, PointStore};
use crate::wire::{CellGrid, CellSummary, ClusterResponse};

/// Grid dimension used when the caller asks for the unclustered detail view
/// (`clusterize == false`): cells become small enough that almost every one
/// holds at most a single point.
pub const MAX_GRID_SIZE: u8 = 100;

/// Viewport bounds in geographic degrees, exactly as received from the
/// caller-facing layer. Validated non-degenerate before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Everything one clustering request needs besides the point store.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    /// Viewport bounds in degrees.
    pub bounds: GpsBounds,
    /// Caller-designated excluded coordinate, in degrees. A point whose
    /// normalized position equals this pair exactly is omitted from every
    /// cell of both grids.
    pub excluded: (f64, f64),
    /// Configured grid width, used when `clusterize` is set.
    pub width: u8,
    /// Configured grid height, used when `clusterize` is set.
    pub height: u8,
    /// When false, forces a [`MAX_GRID_SIZE`]×[`MAX_GRID_SIZE`] grid.
    pub clusterize: bool,
}

/// Runs the full clustering pipeline for one request.
pub fn cluster(store: &PointStore, params: &ClusterParams) -> ClusterResponse {
    let (width, height) = if params.clusterize {
        (params.width, params.height)
    } else {
        (MAX_GRID_SIZE, MAX_GRID_SIZE)
    };
    debug!(width, height, clusterize = params.clusterize, "building status grids");

    let bounds = BoundingBox::from_gps(
        params.bounds.north,
        params.bounds.south,
        params.bounds.east,
        params.bounds.west,
    );

    let mut cleaned = Grid::build(&bounds, width, height);
    let mut uncleaned = Grid::build(&bounds, width, height);

    let (ex_lat, ex_lng) = params.excluded;
    assign(store, &mut cleaned, &mut uncleaned, NormalizedPos::from_gps(ex_lat, ex_lng));

    ClusterResponse {
        uncleaned: render(store, &uncleaned),
        cleaned: render(store, &cleaned),
    }
}

/// Scans the store once, in load order, placing each point into the first
/// containing cell (row-major) of the grid matching its status.
///
/// First-match is the tie-break for points sitting exactly on a shared cell
/// boundary: containment is closed on all four edges, so such a point
/// matches several cells, and scan order alone decides which one keeps it.
fn assign(store: &PointStore, cleaned: &mut Grid, uncleaned: &mut Grid, excluded: NormalizedPos) {
    for (index, point) in store.iter().enumerate() {
        // Exact floating equality, no epsilon. The excluded point is a
        // specific known record, not a neighborhood.
        if point.pos.lat == excluded.lat && point.pos.lng == excluded.lng {
            continue;
        }

        let grid = match point.status {
            PointStatus::Cleaned => &mut *cleaned,
            PointStatus::Uncleaned => &mut *uncleaned,
        };

        match grid.cells_mut().find(|cell| cell.bounds.contains(point.pos)) {
            Some(cell) => cell.points.push(index),
            // Outside the viewport. Dropping silently is the contract:
            // callers pre-filter, and out-of-range ingest values simply
            // never land anywhere.
            None => debug!(id = point.id, "point outside viewport, dropped"),
        }
    }
}

/// Aggregates one cell into its wire form.
///
/// Empty cells produce the no-data marker. A lone point passes its
/// attributes through, echoing `id`/`desc` only when a description exists.
/// Multiple points collapse to their barycenter and a count, never an
/// identity.
fn summarize(store: &PointStore, cell: &Cell) -> Option<CellSummary> {
    match cell.points.as_slice() {
        [] => None,
        [index] => {
            let point = store.get(*index)?;
            let (lat, lng) = point.pos.to_gps();
            Some(CellSummary {
                count: 1,
                lat,
                lng,
                id: point.desc.as_ref().map(|_| point.id),
                desc: point.desc.clone(),
            })
        }
        members => {
            // Barycenter in normalized space, denormalized once at the end.
            let mut sum_lat = 0.0;
            let mut sum_lng = 0.0;
            for index in members {
                if let Some(point) = store.get(*index) {
                    sum_lat += point.pos.lat;
                    sum_lng += point.pos.lng;
                }
            }
            let n = members.len() as f64;
            let (lat, lng) = NormalizedPos { lat: sum_lat / n, lng: sum_lng / n }.to_gps();
            Some(CellSummary { count: members.len(), lat, lng, id: None, desc: None })
        }
    }
}

/// Renders a grid as rows-outer, columns-inner, in build order. Consumers
/// address cells positionally, so this order is part of the wire contract.
fn render(store: &PointStore, grid: &Grid) -> CellGrid {
    grid.rows()
        .map(|row| row.iter().map(|cell| summarize(store, cell)).collect())
        .collect()
}
