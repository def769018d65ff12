//! Spatial grid-clustering engine for map-viewport queries.
//!
//! Given an immutable set of geotagged points and a viewport bounding box,
//! the engine subdivides the box into a width×height grid, assigns every
//! point to the cell that contains it (split into two parallel grids by the
//! point's status flag), and reports per cell either the single resident
//! point's identity or the barycenter of all residents.
//!
//! The engine is synchronous, stateless across requests, and free of ambient
//! global state: all inputs (point store, bounds, grid size, excluded
//! coordinate) arrive as explicit parameters. The hosting service owns the
//! point store behind an `Arc` and may run any number of computations
//! concurrently, since nothing here mutates shared data.

pub mod coords;
pub mod engine;
pub mod grid;
pub mod point;
pub mod wire;

pub use coords::NormalizedPos;
pub use engine::{cluster, ClusterParams, GpsBounds, MAX_GRID_SIZE};
pub use point::{Point, PointStatus, PointStore};
pub use wire::{CellGrid, CellSummary, ClusterResponse};
