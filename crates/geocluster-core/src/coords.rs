//! Coordinate normalization between geographic degrees and the engine's
//! internal flat space.
//!
//! Every comparison the engine performs (cell containment, excluded-point
//! equality, barycenter sums) happens in normalized space; geographic degrees
//! exist only at the system boundary, on ingestion and in the serialized
//! output. The mapping is a per-axis affine shift chosen so that after
//! normalization the viewport ordering is plain numeric ordering:
//! `north <= south` and `west <= east`. That property is what the grid
//! builder's interpolation math assumes, so any replacement mapping must
//! preserve it (monotonic decreasing on latitude, increasing on longitude).

/// A position in the engine's internal coordinate space.
///
/// The `lat`/`lng` names are kept from the geographic side for readability,
/// but the values are shifted: latitude 90° maps to 0 and decreases
/// southward to 180, longitude -180° maps to 0 and increases eastward
/// to 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPos {
    pub lat: f64,
    pub lng: f64,
}

impl NormalizedPos {
    /// Converts a geographic coordinate (decimal degrees) into normalized
    /// space.
    pub fn from_gps(lat: f64, lng: f64) -> Self {
        Self {
            lat: 90.0 - lat,
            lng: 180.0 + lng,
        }
    }

    /// Converts back to geographic degrees. Inverse of [`from_gps`].
    ///
    /// [`from_gps`]: NormalizedPos::from_gps
    pub fn to_gps(self) -> (f64, f64) {
        (90.0 - self.lat, self.lng - 180.0)
    }
}
