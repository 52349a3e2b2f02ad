#![warn(missing_docs)]

//! Tile meshes for radius dishes.
//!
//! [`build_section`] turns one tile of a validated [`DishConfig`] into a
//! closed triangle soup: sampled dish surface on top, vertical walls, flat
//! base. [`audit`] checks closure and orientation of any such mesh.
//!
//! # Example
//!
//! ```rust
//! use radius_dish_geom::{DishConfig, TileAddress, TileGrid};
//! use radius_dish_mesh::{audit, build_section, expected_triangle_count};
//!
//! let dish = DishConfig::new(600.0, 600.0, 50.0, 50.0, 4267.2).unwrap();
//! let grid = TileGrid::new(2, 2).unwrap();
//! let mesh = build_section(&dish, grid, TileAddress::new(0, 1), 16);
//!
//! assert_eq!(mesh.len(), expected_triangle_count(16));
//! assert!(audit(&mesh).is_watertight());
//! ```
//!
//! [`DishConfig`]: radius_dish_geom::DishConfig

pub mod audit;
pub mod builder;
pub mod mesh;

pub use audit::{audit, MeshAudit};
pub use builder::{build_section, expected_triangle_count};
pub use mesh::{Triangle, TriangleMesh};
