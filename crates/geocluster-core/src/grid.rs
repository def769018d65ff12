//! Grid construction: subdividing a normalized bounding box into a
//! width×height arena of leaf cells.
//!
//! Cells live in one flat, contiguously owned `Vec` addressed row-major
//! (`row * width + col`); the grid owns every cell outright and nothing else
//! ever holds a reference into it. Sub-box bounds are produced by
//! accumulating the row/column step top-to-bottom, left-to-right, in that
//! exact order, so identical inputs always yield bit-identical boundaries.

use crate::coords::NormalizedPos;

/// A rectangular region in normalized coordinate space.
///
/// Invariant: `north <= south` and `west <= east` numerically, which the
/// normalizer guarantees for any geographically sane viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Builds a normalized box from viewport bounds in geographic degrees.
    pub fn from_gps(north: f64, south: f64, east: f64, west: f64) -> Self {
        let nw = NormalizedPos::from_gps(north, west);
        let se = NormalizedPos::from_gps(south, east);
        Self {
            north: nw.lat,
            south: se.lat,
            east: se.lng,
            west: nw.lng,
        }
    }

    /// Closed-interval containment on all four edges. A point exactly on a
    /// shared cell boundary therefore matches more than one cell; the
    /// assignment pass resolves that with its first-match scan order.
    pub fn contains(&self, pos: NormalizedPos) -> bool {
        pos.lat >= self.north && pos.lat <= self.south && pos.lng >= self.west && pos.lng <= self.east
    }
}

/// A leaf cell: its sub-box and the indices (into the point store) of the
/// points assigned to it. Append-only during the assignment pass, dropped
/// with the grid once the response is serialized.
#[derive(Debug, Clone)]
pub struct Cell {
    pub bounds: BoundingBox,
    pub points: Vec<usize>,
}

/// A width×height matrix of leaf cells spanning one bounding box.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Subdivides `bounds` into `width * height` empty cells.
    ///
    /// Row step is `(south - north) / height`, column step
    /// `(east - west) / width`, both non-negative in normalized space.
    pub fn build(bounds: &BoundingBox, width: u8, height: u8) -> Self {
        debug_assert!(width >= 1 && height >= 1);

        let row_step = (bounds.south - bounds.north) / f64::from(height);
        let col_step = (bounds.east - bounds.west) / f64::from(width);

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        let mut north = bounds.north;
        for _ in 0..height {
            let mut west = bounds.west;
            for _ in 0..width {
                cells.push(Cell {
                    bounds: BoundingBox {
                        north,
                        south: north + row_step,
                        east: west + col_step,
                        west,
                    },
                    points: Vec::new(),
                });
                west += col_step;
            }
            north += row_step;
        }

        Self { width, height, cells }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn cell(&self, row: u8, col: u8) -> &Cell {
        &self.cells[usize::from(row) * usize::from(self.width) + usize::from(col)]
    }

    /// All cells in row-major order, the scan order of the assignment pass
    /// and the serialization order of the response.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Rows-outer view used by the serializer.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> BoundingBox {
        BoundingBox::from_gps(10.0, 0.0, 10.0, 0.0)
    }

    #[test]
    fn builds_exactly_width_times_height_cells() {
        let grid = Grid::build(&viewport(), 4, 3);
        assert_eq!(grid.cells().count(), 12);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn cells_tile_the_parent_box() {
        let bounds = viewport();
        let grid = Grid::build(&bounds, 5, 7);

        // Sum of row heights down the first column equals the box height.
        let height_sum: f64 = (0..7).map(|r| {
            let cell = grid.cell(r, 0);
            cell.bounds.south - cell.bounds.north
        }).sum();
        assert!((height_sum - (bounds.south - bounds.north)).abs() < 1e-9);

        // Sum of column widths across the first row equals the box width.
        let width_sum: f64 = (0..5).map(|c| {
            let cell = grid.cell(0, c);
            cell.bounds.east - cell.bounds.west
        }).sum();
        assert!((width_sum - (bounds.east - bounds.west)).abs() < 1e-9);

        // Corner cells sit flush with the parent box.
        assert_eq!(grid.cell(0, 0).bounds.north, bounds.north);
        assert_eq!(grid.cell(0, 0).bounds.west, bounds.west);
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let bounds = viewport();
        let a = Grid::build(&bounds, 9, 9);
        let b = Grid::build(&bounds, 9, 9);

        for (ca, cb) in a.cells().zip(b.cells()) {
            // Bit-exact equality, not tolerance: same accumulation order
            // must give the same floats.
            assert_eq!(ca.bounds, cb.bounds);
        }
    }

    #[test]
    fn adjacent_cells_share_edges() {
        let grid = Grid::build(&viewport(), 2, 2);
        assert_eq!(grid.cell(0, 0).bounds.east, grid.cell(0, 1).bounds.west);
        assert_eq!(grid.cell(0, 0).bounds.south, grid.cell(1, 0).bounds.north);
    }

    #[test]
    fn containment_is_closed_on_all_edges() {
        let grid = Grid::build(&viewport(), 2, 2);
        let cell = grid.cell(0, 0);

        let on_corner = NormalizedPos { lat: cell.bounds.north, lng: cell.bounds.west };
        let on_far_corner = NormalizedPos { lat: cell.bounds.south, lng: cell.bounds.east };
        assert!(cell.bounds.contains(on_corner));
        assert!(cell.bounds.contains(on_far_corner));
    }
}
