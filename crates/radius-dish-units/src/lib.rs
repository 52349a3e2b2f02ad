#![warn(missing_docs)]

//! Length units for the radius dish generator.
//!
//! Every downstream computation works in millimetres. Text such as `14ft`,
//! `4267mm` or `14'6"` is converted once, here, into a [`Distance`].
//!
//! # Example
//!
//! ```rust
//! use radius_dish_units::{Distance, LengthUnit};
//!
//! let radius: Distance = "14ft".parse().unwrap();
//! assert_eq!(radius.mm(), 4267.2);
//! assert!((radius.in_unit(LengthUnit::Foot) - 14.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod error;
mod lexer;
mod parse;

pub use error::{ParseDistanceError, Result};
pub use parse::parse_distance;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;
/// Millimetres per foot.
pub const MM_PER_FOOT: f64 = 304.8;
/// Millimetres per metre.
pub const MM_PER_METRE: f64 = 1000.0;

/// A supported length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres (`mm`, or no suffix).
    Millimetre,
    /// Metres (`m`).
    Metre,
    /// Inches (`in` or `"`).
    Inch,
    /// Feet (`ft` or `'`).
    Foot,
}

impl LengthUnit {
    /// Conversion factor into millimetres.
    pub fn mm_per_unit(self) -> f64 {
        match self {
            LengthUnit::Millimetre => 1.0,
            LengthUnit::Metre => MM_PER_METRE,
            LengthUnit::Inch => MM_PER_INCH,
            LengthUnit::Foot => MM_PER_FOOT,
        }
    }

    /// Canonical written suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Metre => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }

    /// Look up a lower-case unit word.
    pub fn from_suffix(word: &str) -> Option<Self> {
        match word {
            "mm" => Some(LengthUnit::Millimetre),
            "m" => Some(LengthUnit::Metre),
            "in" => Some(LengthUnit::Inch),
            "ft" => Some(LengthUnit::Foot),
            _ => None,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A non-negative length in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Wrap a millimetre value. Returns `None` for negative or non-finite input.
    pub fn new(mm: f64) -> Option<Self> {
        (mm >= 0.0 && mm.is_finite()).then_some(Self(mm))
    }

    /// Convert `value` expressed in `unit` into a distance.
    pub fn from_unit(value: f64, unit: LengthUnit) -> Option<Self> {
        Self::new(value * unit.mm_per_unit())
    }

    /// Length in millimetres.
    pub fn mm(self) -> f64 {
        self.0
    }

    /// Length expressed in `unit`.
    pub fn in_unit(self, unit: LengthUnit) -> f64 {
        self.0 / unit.mm_per_unit()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} mm", p, self.0),
            None => write!(f, "{} mm", self.0),
        }
    }
}

impl FromStr for Distance {
    type Err = ParseDistanceError;

    fn from_str(s: &str) -> Result<Self> {
        parse_distance(s)
    }
}
