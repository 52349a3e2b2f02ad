//! Error types for the dish facade.

use radius_dish_geom::{GridError, InvalidDish, TileAddress};
use radius_dish_stl::StlError;
use radius_dish_units::ParseDistanceError;
use thiserror::Error;

/// Errors from configuring, meshing or exporting a dish.
#[derive(Error, Debug)]
pub enum DishError {
    /// The radius text could not be parsed.
    #[error("cannot parse radius: {0}")]
    Radius(#[from] ParseDistanceError),

    /// The dimensions fail the validity gate.
    #[error("invalid dish: {0}")]
    Invalid(#[from] InvalidDish),

    /// The cap would reach through the base.
    #[error("dish is {sag:.2}mm deep but only {thickness}mm thick")]
    TooThin {
        /// Depth of the centre below the rim.
        sag: f64,
        /// Base to rim height.
        thickness: f64,
    },

    /// The tile grid is empty.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Tessellation density must be at least one.
    #[error("segments must be at least 1, got {0}")]
    Segments(u32),

    /// Requested tile is not part of the grid.
    #[error("tile {tile} is outside the {sections_x}x{sections_y} grid")]
    TileOutOfRange {
        /// Requested tile.
        tile: TileAddress,
        /// Grid columns.
        sections_x: u32,
        /// Grid rows.
        sections_y: u32,
    },

    /// The download gate refused the request.
    #[error("no downloads remaining")]
    QuotaExhausted,

    /// Writing STL output failed.
    #[error(transparent)]
    Stl(#[from] StlError),

    /// Parameter file is not valid TOML for [`DishParams`](crate::DishParams).
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, DishError>;
