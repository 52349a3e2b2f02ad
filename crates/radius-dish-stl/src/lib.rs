#![warn(missing_docs)]

//! STL encoding for radius dish tiles.
//!
//! Binary STL is the exchange format slicers and CAM tools expect; the
//! encoder writes it byte-exact with no deduplication or validation.
//! [`read_stl`] decodes it again and [`to_ascii_stl`] renders a text form.
//!
//! # Example
//!
//! ```rust
//! use radius_dish_geom::{DishConfig, TileAddress, TileGrid};
//! use radius_dish_mesh::build_section;
//! use radius_dish_stl::{encoded_len, to_stl_bytes};
//!
//! let dish = DishConfig::new(600.0, 600.0, 50.0, 50.0, 4267.2).unwrap();
//! let mesh = build_section(&dish, TileGrid::single(), TileAddress::new(0, 0), 8);
//! let bytes = to_stl_bytes(&mesh);
//! assert_eq!(bytes.len(), encoded_len(mesh.len()));
//! ```

pub mod ascii;
pub mod binary;
pub mod error;

pub use ascii::to_ascii_stl;
pub use binary::{
    encoded_len, read_stl, to_stl_bytes, to_stl_bytes_with_header, write_stl, DEFAULT_HEADER,
    HEADER_LEN, TRIANGLE_LEN,
};
pub use error::{Result, StlError};
