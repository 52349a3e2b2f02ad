//! Common printer beds and sphere radii.

use serde::Serialize;

/// A machine bed to fit tiles on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BedPreset {
    /// Display name.
    pub name: &'static str,
    /// Usable X extent (mm).
    pub width: f64,
    /// Usable Y extent (mm).
    pub height: f64,
}

impl BedPreset {
    /// Creality Ender 3 class.
    pub const ENDER_3: Self = Self::new("Ender 3 / small", 220.0, 220.0);
    /// Prusa MK4.
    pub const PRUSA_MK4: Self = Self::new("Prusa MK4", 250.0, 210.0);
    /// Bambu Lab P1 and X1 series.
    pub const BAMBU: Self = Self::new("Bambu P1/X1", 256.0, 256.0);
    /// Voron 2.4, 300 mm.
    pub const VORON_300: Self = Self::new("Voron 2.4 300", 300.0, 300.0);
    /// Large format.
    pub const LARGE_600: Self = Self::new("Custom 600x600", 600.0, 600.0);
    /// CNC router bed.
    pub const CNC: Self = Self::new("CNC bed 1200x600", 1200.0, 600.0);

    const fn new(name: &'static str, width: f64, height: f64) -> Self {
        Self {
            name,
            width,
            height,
        }
    }

    /// All built-in beds, smallest first.
    pub fn all() -> &'static [BedPreset] {
        &[
            Self::ENDER_3,
            Self::PRUSA_MK4,
            Self::BAMBU,
            Self::VORON_300,
            Self::LARGE_600,
            Self::CNC,
        ]
    }

    /// True if a `width` by `height` tile fits without rotation.
    pub fn fits(&self, width: f64, height: f64) -> bool {
        width <= self.width && height <= self.height
    }
}

/// A named sphere radius used in instrument making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadiusPreset {
    /// Display name.
    pub name: &'static str,
    /// Radius text, parseable by `parse_distance`.
    pub radius: &'static str,
}

impl RadiusPreset {
    /// All built-in radii.
    pub fn all() -> &'static [RadiusPreset] {
        &[
            RadiusPreset {
                name: "14 ft guitar top",
                radius: "14ft",
            },
            RadiusPreset {
                name: "25 ft guitar back",
                radius: "25ft",
            },
            RadiusPreset {
                name: "15 ft mandolin top",
                radius: "15ft",
            },
            RadiusPreset {
                name: "28 ft violin plate",
                radius: "28ft",
            },
            RadiusPreset {
                name: "1000 mm",
                radius: "1000mm",
            },
        ]
    }
}

/// Fewest sections per axis so each tile of a `width` by `height` dish fits
/// on `bed`. Tiles are not rotated.
pub fn sections_for_bed(width: f64, height: f64, bed: &BedPreset) -> (u32, u32) {
    let split = |extent: f64, limit: f64| (extent / limit).ceil().max(1.0) as u32;
    (split(width, bed.width), split(height, bed.height))
}
