#![warn(missing_docs)]

//! Geometry of a spherical radius dish.
//!
//! A radius dish is a rectangular block whose top carries a shallow
//! spherical cap, ringed by a flat rim. This crate derives the cap's curve
//! radius and sag, gates invalid configurations, and lays the plan
//! rectangle out into tiles that fit a printer or CNC bed.
//!
//! # Example
//!
//! ```rust
//! use radius_dish_geom::{is_valid, DishConfig};
//!
//! assert!(is_valid(600.0, 600.0, 50.0, 50.0, 4267.2));
//! let dish = DishConfig::new(600.0, 600.0, 50.0, 50.0, 4267.2).unwrap();
//! let curve = dish.curve();
//! assert_eq!(curve.curve_radius, 250.0);
//! assert!((curve.sag - 7.33).abs() < 0.01);
//! ```

pub mod dish;
pub mod error;
pub mod tiles;

pub use dish::{check, curve_radius, is_valid, sag, CurveGeometry, DishConfig};
pub use error::{Field, GridError, InvalidDish};
pub use tiles::{PlanRect, TileAddress, TileGrid};
