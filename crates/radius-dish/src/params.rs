//! User-facing dish parameters, as typed in or read from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Raw dish inputs. Lengths in millimetres except `radius`, which is free
/// text such as `14ft`, `4.267m` or `14' 2"`.
///
/// Missing TOML keys fall back to [`DishParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DishParams {
    /// Sphere radius, with unit.
    pub radius: String,
    /// Plan width (x).
    pub dish_width: f64,
    /// Plan height (y).
    pub dish_height: f64,
    /// Flat border width.
    pub rim_width: f64,
    /// Base to rim height.
    pub thickness: f64,
    /// Tile columns.
    pub sections_x: u32,
    /// Tile rows.
    pub sections_y: u32,
    /// Grid cells per tile side.
    pub segments: u32,
}

impl Default for DishParams {
    fn default() -> Self {
        Self {
            radius: "14ft".into(),
            dish_width: 600.0,
            dish_height: 600.0,
            rim_width: 50.0,
            thickness: 50.0,
            sections_x: 2,
            sections_y: 2,
            segments: 48,
        }
    }
}

impl DishParams {
    /// Parse parameters from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
