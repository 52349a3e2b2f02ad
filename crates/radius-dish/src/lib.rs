#![warn(missing_docs)]

//! Radius dish generator.
//!
//! Turns a radius such as `14ft` and the dish dimensions into printable
//! tiles: each tile is a closed mesh of the dish surface over its share of
//! the plan, written as binary STL.
//!
//! # Example
//!
//! ```rust
//! use radius_dish::{Dish, DishParams, TileAddress};
//!
//! let params = DishParams {
//!     segments: 8,
//!     ..Default::default()
//! };
//! let dish = Dish::from_params(&params).unwrap();
//! let summary = dish.summary();
//! assert_eq!(summary.tile_count, 4);
//!
//! let stl = dish.tile_stl(TileAddress::new(0, 0)).unwrap();
//! assert_eq!(stl.len(), 84 + 50 * summary.triangles_per_tile);
//! ```

pub mod dish;
pub mod error;
pub mod params;
pub mod presets;
pub mod quota;

pub use dish::{tile_file_name, Dish, DishSummary, Quality, StlFormat};
pub use error::{DishError, Result};
pub use params::DishParams;
pub use presets::{sections_for_bed, BedPreset, RadiusPreset};
pub use quota::{FreeUses, QuotaGate, Unlimited, DEFAULT_FREE_USES};

pub use radius_dish_geom::{DishConfig, TileAddress, TileGrid};
pub use radius_dish_mesh::TriangleMesh;
