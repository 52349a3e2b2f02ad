//! Plan-view partition of a dish into printable tiles.
//!
//! Coordinates are dish-centred: x runs left to right, y runs front to
//! back. Column 0 is the leftmost tile, row 0 the rearmost (largest y).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GridError;

/// Zero-based `(column, row)` address of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileAddress {
    /// Column index, 0 = leftmost.
    pub column: u32,
    /// Row index, 0 = rearmost.
    pub row: u32,
}

impl TileAddress {
    /// Create an address.
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// One-based label used in file names, e.g. `C1R2`.
    pub fn label(&self) -> String {
        format!("C{}R{}", self.column + 1, self.row + 1)
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Axis-aligned rectangle in plan view (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanRect {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
    /// Front edge.
    pub y0: f64,
    /// Rear edge.
    pub y1: f64,
}

impl PlanRect {
    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Plan area.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if `(x, y)` lies inside or on the boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// `sections_x × sections_y` grid of equal tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    sections_x: u32,
    sections_y: u32,
}

impl TileGrid {
    /// Create a grid; both counts must be at least one.
    pub fn new(sections_x: u32, sections_y: u32) -> Result<Self, GridError> {
        if sections_x == 0 || sections_y == 0 {
            return Err(GridError::Empty {
                sections_x,
                sections_y,
            });
        }
        Ok(Self {
            sections_x,
            sections_y,
        })
    }

    /// A single tile covering the whole dish.
    pub fn single() -> Self {
        Self {
            sections_x: 1,
            sections_y: 1,
        }
    }

    /// Number of columns.
    pub fn sections_x(&self) -> u32 {
        self.sections_x
    }

    /// Number of rows.
    pub fn sections_y(&self) -> u32 {
        self.sections_y
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.sections_x as usize * self.sections_y as usize
    }

    /// Always false; a grid has at least one tile.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `tile` addresses a cell of this grid.
    pub fn contains(&self, tile: TileAddress) -> bool {
        tile.column < self.sections_x && tile.row < self.sections_y
    }

    /// Check an address, reporting out-of-range tiles.
    pub fn check(&self, tile: TileAddress) -> Result<(), GridError> {
        if self.contains(tile) {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                tile,
                sections_x: self.sections_x,
                sections_y: self.sections_y,
            })
        }
    }

    /// All addresses, row by row from the rear, left to right within a row.
    pub fn tiles(&self) -> impl Iterator<Item = TileAddress> {
        let (nx, ny) = (self.sections_x, self.sections_y);
        (0..ny).flat_map(move |row| (0..nx).map(move |column| TileAddress { column, row }))
    }

    /// Plan rectangle of `tile` on a `width × height` dish.
    ///
    /// Neighbouring tiles share bit-identical edges and the outer edges sit
    /// exactly on `±width/2`, `±height/2`.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is outside the grid.
    pub fn tile_rect(&self, width: f64, height: f64, tile: TileAddress) -> PlanRect {
        assert!(
            self.contains(tile),
            "tile {tile} outside {}x{} grid",
            self.sections_x,
            self.sections_y
        );
        PlanRect {
            x0: grid_line(width, self.sections_x, tile.column),
            x1: grid_line(width, self.sections_x, tile.column + 1),
            y0: -grid_line(height, self.sections_y, tile.row + 1),
            y1: -grid_line(height, self.sections_y, tile.row),
        }
    }
}

/// Position of the `k`-th of `count + 1` equally spaced lines across a
/// centred span of `extent`.
fn grid_line(extent: f64, count: u32, k: u32) -> f64 {
    let half = extent / 2.0;
    if k == 0 {
        -half
    } else if k >= count {
        half
    } else {
        -half + extent * f64::from(k) / f64::from(count)
    }
}
