//! The immutable point set the engine clusters over.

use crate::coords::NormalizedPos;

/// Two-valued status flag splitting points across the two output grids.
///
/// The ingest contract carries a raw boolean named `disappeared`. Its wire
/// mapping is fixed and deliberately pinned by tests: `disappeared == true`
/// means the reported issue was resolved, so the point belongs to the
/// `cleaned` grid of the response; `false` lands in `uncleaned`. Do not
/// re-derive this mapping from the field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStatus {
    /// Serialized under the `cleaned` response key.
    Cleaned,
    /// Serialized under the `uncleaned` response key.
    Uncleaned,
}

impl PointStatus {
    /// Maps the raw ingest flag onto a grid identity.
    pub fn from_disappeared(disappeared: bool) -> Self {
        if disappeared {
            PointStatus::Cleaned
        } else {
            PointStatus::Uncleaned
        }
    }
}

/// A single geotagged point. Immutable after creation; positions are stored
/// normalized so the engine never touches degrees internally.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Caller-assigned identity (database primary key or similar).
    pub id: u32,
    /// Position in normalized coordinate space.
    pub pos: NormalizedPos,
    /// Which status grid this point belongs to.
    pub status: PointStatus,
    /// Optional free-text description. Echoed on the wire only for cells
    /// holding exactly this one point.
    pub desc: Option<String>,
}

impl Point {
    /// Builds a point from geographic degrees and the raw ingest flag.
    pub fn from_gps(id: u32, lat: f64, lng: f64, disappeared: bool, desc: Option<String>) -> Self {
        Self {
            id,
            pos: NormalizedPos::from_gps(lat, lng),
            status: PointStatus::from_disappeared(disappeared),
            desc,
        }
    }
}

/// Ordered, immutable collection of points, loaded once at process start.
///
/// The store exposes only shared reads, so wrapping it in an `Arc` is enough
/// for unsynchronized concurrent requests; no locking is needed anywhere in
/// the engine.
#[derive(Debug, Default, Clone)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates points in load order. Assignment order (and therefore the
    /// first-match tie-break for boundary points) follows this order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }
}
