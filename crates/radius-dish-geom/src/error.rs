//! Validity errors for dish configurations and tile grids.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::tiles::TileAddress;

/// A named input of a dish configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Plan width of the dish.
    DishWidth,
    /// Plan height (front-to-back) of the dish.
    DishHeight,
    /// Flat border width.
    RimWidth,
    /// Base-to-rim thickness.
    Thickness,
    /// Radius of the sphere the cap is cut from.
    SphereRadius,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::DishWidth => "dish width",
            Field::DishHeight => "dish height",
            Field::RimWidth => "rim width",
            Field::Thickness => "thickness",
            Field::SphereRadius => "sphere radius",
        })
    }
}

/// Why a dish configuration failed the validity gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidDish {
    /// An input is zero, negative or not finite.
    #[error("{field} must be a positive number, got {value}")]
    NonPositive {
        /// The offending input.
        field: Field,
        /// Its value.
        value: f64,
    },

    /// The rim leaves no room for a curved area.
    #[error("rim width {rim}mm must be less than {limit}mm (half the smaller dish side)")]
    RimTooWide {
        /// Requested rim width.
        rim: f64,
        /// Half of the smaller plan dimension.
        limit: f64,
    },

    /// The sphere cannot span the curved area.
    #[error("radius must be larger than {curve_radius:.0}mm for this dish size, got {sphere_radius}mm")]
    RadiusTooSmall {
        /// Requested sphere radius.
        sphere_radius: f64,
        /// Curve radius the sphere has to reach.
        curve_radius: f64,
    },
}

/// Errors in tile grid construction or addressing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A grid needs at least one section along each axis.
    #[error("tile grid needs at least one section per axis, got {sections_x}x{sections_y}")]
    Empty {
        /// Columns requested.
        sections_x: u32,
        /// Rows requested.
        sections_y: u32,
    },

    /// Address outside the grid.
    #[error("tile {tile} is outside the {sections_x}x{sections_y} grid")]
    OutOfRange {
        /// Requested tile.
        tile: TileAddress,
        /// Grid columns.
        sections_x: u32,
        /// Grid rows.
        sections_y: u32,
    },
}
