//! A configured dish: summary figures, tile meshes and STL export.

use radius_dish_geom::{CurveGeometry, DishConfig, TileAddress, TileGrid};
use radius_dish_mesh::{build_section, expected_triangle_count, TriangleMesh};
use radius_dish_stl::{to_ascii_stl, to_stl_bytes, write_stl, StlError};
use radius_dish_units::{parse_distance, LengthUnit};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DishError, Result};
use crate::params::DishParams;
use crate::quota::QuotaGate;

/// Tessellation quality band for a segment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Quality {
    /// Fewer than 40 segments.
    Draft,
    /// 40 to 63 segments.
    Standard,
    /// 64 to 79 segments.
    Fine,
    /// 80 segments or more.
    Ultra,
}

impl Quality {
    /// Band for `segments` cells per tile side.
    pub fn from_segments(segments: u32) -> Self {
        match segments {
            0..=39 => Quality::Draft,
            40..=63 => Quality::Standard,
            64..=79 => Quality::Fine,
            _ => Quality::Ultra,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quality::Draft => "Draft",
            Quality::Standard => "Standard",
            Quality::Fine => "Fine",
            Quality::Ultra => "Ultra",
        })
    }
}

/// Encoding of exported tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlFormat {
    /// Binary STL, what slicers and CAM tools expect.
    #[default]
    Binary,
    /// ASCII STL, one solid per file named after the file stem.
    Ascii,
}

/// Derived figures for display. Lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishSummary {
    /// Radius as entered.
    pub radius_text: String,
    /// Parsed sphere radius.
    pub sphere_radius: f64,
    /// Sphere radius in feet.
    pub sphere_radius_ft: f64,
    /// Plan radius of the curved area.
    pub curve_radius: f64,
    /// Plan diameter of the curved area.
    pub curved_diameter: f64,
    /// Depth of the centre below the rim.
    pub sag: f64,
    /// Material under the deepest point.
    pub center_clearance: f64,
    /// Width of one tile.
    pub tile_width: f64,
    /// Height of one tile.
    pub tile_height: f64,
    /// Tile columns.
    pub sections_x: u32,
    /// Tile rows.
    pub sections_y: u32,
    /// Total tiles.
    pub tile_count: usize,
    /// Grid cells per tile side.
    pub segments: u32,
    /// Facets in every tile's STL.
    pub triangles_per_tile: usize,
    /// Quality band of `segments`.
    pub quality: Quality,
}

/// STL file name for `tile` of a dish whose radius was entered as
/// `radius_text`. Each whitespace run becomes one underscore.
pub fn tile_file_name(radius_text: &str, tile: TileAddress) -> String {
    let mut name = String::with_capacity(radius_text.len() + 24);
    name.push_str("radius_dish_");
    let mut in_space = false;
    for c in radius_text.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    name.push('_');
    name.push_str(&tile.label());
    name.push_str(".stl");
    name
}

/// A validated dish with its tiling and mesh density.
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    radius_text: String,
    config: DishConfig,
    grid: TileGrid,
    segments: u32,
    format: StlFormat,
}

impl Dish {
    /// Parse and validate `params`.
    pub fn from_params(params: &DishParams) -> Result<Self> {
        let radius = parse_distance(&params.radius)?;
        let config = DishConfig::new(
            params.dish_width,
            params.dish_height,
            params.rim_width,
            params.thickness,
            radius.mm(),
        )?;
        let grid = TileGrid::new(params.sections_x, params.sections_y)?;
        if params.segments == 0 {
            return Err(DishError::Segments(params.segments));
        }

        if config.center_clearance() <= 0.0 {
            let sag = config.curve().sag;
            log::warn!("cap depth {sag:.2}mm reaches the {}mm base", config.thickness());
            return Err(DishError::TooThin {
                sag,
                thickness: config.thickness(),
            });
        }

        Ok(Self {
            radius_text: params.radius.clone(),
            config,
            grid,
            segments: params.segments,
            format: StlFormat::Binary,
        })
    }

    /// Export tiles in `format` instead of binary STL.
    pub fn with_format(mut self, format: StlFormat) -> Self {
        self.format = format;
        self
    }

    /// Encoding used by the export functions.
    pub fn format(&self) -> StlFormat {
        self.format
    }

    /// Geometry in millimetres.
    pub fn config(&self) -> &DishConfig {
        &self.config
    }

    /// Tile layout.
    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    /// Grid cells per tile side.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Radius as entered.
    pub fn radius_text(&self) -> &str {
        &self.radius_text
    }

    /// Derived figures for display.
    pub fn summary(&self) -> DishSummary {
        let CurveGeometry { curve_radius, sag } = self.config.curve();
        let sphere_radius = self.config.sphere_radius();
        DishSummary {
            radius_text: self.radius_text.clone(),
            sphere_radius,
            sphere_radius_ft: sphere_radius / LengthUnit::Foot.mm_per_unit(),
            curve_radius,
            curved_diameter: 2.0 * curve_radius,
            sag,
            center_clearance: self.config.center_clearance(),
            tile_width: self.config.dish_width() / self.grid.sections_x() as f64,
            tile_height: self.config.dish_height() / self.grid.sections_y() as f64,
            sections_x: self.grid.sections_x(),
            sections_y: self.grid.sections_y(),
            tile_count: self.grid.len(),
            segments: self.segments,
            triangles_per_tile: expected_triangle_count(self.segments),
            quality: Quality::from_segments(self.segments),
        }
    }

    /// Every tile address, rear row first, left to right.
    pub fn tiles(&self) -> impl Iterator<Item = TileAddress> {
        self.grid.tiles()
    }

    /// Watertight mesh of one tile.
    pub fn tile_mesh(&self, tile: TileAddress) -> Result<TriangleMesh> {
        self.check_tile(tile)?;
        Ok(build_section(&self.config, self.grid, tile, self.segments))
    }

    /// Binary STL of one tile.
    pub fn tile_stl(&self, tile: TileAddress) -> Result<Vec<u8>> {
        Ok(to_stl_bytes(&self.tile_mesh(tile)?))
    }

    /// Stream one tile to `out` in this dish's [`StlFormat`].
    pub fn write_tile_stl<W: Write>(&self, tile: TileAddress, mut out: W) -> Result<()> {
        let mesh = self.tile_mesh(tile)?;
        match self.format {
            StlFormat::Binary => write_stl(&mesh, out)?,
            StlFormat::Ascii => {
                let file_name = self.file_name(tile);
                let name = file_name.trim_end_matches(".stl");
                out.write_all(to_ascii_stl(&mesh, name).as_bytes())
                    .map_err(StlError::from)?;
                out.flush().map_err(StlError::from)?;
            }
        }
        Ok(())
    }

    /// File name for one tile.
    pub fn file_name(&self, tile: TileAddress) -> String {
        tile_file_name(&self.radius_text, tile)
    }

    /// Write one tile into `dir`, consuming one use from `quota`.
    pub fn export_tile<Q>(&self, dir: &Path, tile: TileAddress, quota: &mut Q) -> Result<PathBuf>
    where
        Q: QuotaGate + ?Sized,
    {
        self.check_tile(tile)?;
        if !quota.check_and_consume() {
            return Err(DishError::QuotaExhausted);
        }
        fs::create_dir_all(dir)?;
        self.write_tile(dir, tile)
    }

    /// Write every tile into `dir`, consuming a single use from `quota`.
    pub fn export_all<Q>(&self, dir: &Path, quota: &mut Q) -> Result<Vec<PathBuf>>
    where
        Q: QuotaGate + ?Sized,
    {
        if !quota.check_and_consume() {
            return Err(DishError::QuotaExhausted);
        }
        fs::create_dir_all(dir)?;
        let paths = self
            .tiles()
            .map(|tile| self.write_tile(dir, tile))
            .collect::<Result<Vec<_>>>()?;
        log::info!("wrote all {} sections to {}", paths.len(), dir.display());
        Ok(paths)
    }

    fn write_tile(&self, dir: &Path, tile: TileAddress) -> Result<PathBuf> {
        let path = dir.join(self.file_name(tile));
        let file = File::create(&path)?;
        self.write_tile_stl(tile, BufWriter::new(file))?;
        log::info!("section {tile} written to {}", path.display());
        Ok(path)
    }

    fn check_tile(&self, tile: TileAddress) -> Result<()> {
        if self.grid.contains(tile) {
            Ok(())
        } else {
            Err(DishError::TileOutOfRange {
                tile,
                sections_x: self.grid.sections_x(),
                sections_y: self.grid.sections_y(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::{FreeUses, Unlimited};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use radius_dish_geom::InvalidDish;
    use radius_dish_mesh::audit;
    use radius_dish_stl::read_stl;
    use radius_dish_units::ParseDistanceError;

    fn reference() -> Dish {
        Dish::from_params(&DishParams::default()).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "radius-dish-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_reference_summary() {
        let summary = reference().summary();
        assert_eq!(summary.sphere_radius, 4267.2);
        assert_relative_eq!(summary.sphere_radius_ft, 14.0, max_relative = 1e-12);
        assert_eq!(summary.curve_radius, 250.0);
        assert_eq!(summary.curved_diameter, 500.0);
        assert_abs_diff_eq!(summary.sag, 7.34, epsilon = 0.02);
        assert_abs_diff_eq!(summary.center_clearance, 50.0 - summary.sag);
        assert_eq!(summary.tile_width, 300.0);
        assert_eq!(summary.tile_height, 300.0);
        assert_eq!(summary.tile_count, 4);
        assert_eq!(summary.triangles_per_tile, 2 * 48 * 48 + 8 * 48 + 2);
        assert_eq!(summary.quality, Quality::Standard);
    }

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_value(reference().summary()).unwrap();
        assert_eq!(json["curve_radius"], 250.0);
        assert_eq!(json["quality"], "Standard");
        assert_eq!(json["radius_text"], "14ft");
    }

    #[test]
    fn test_quality_bands() {
        assert_eq!(Quality::from_segments(1), Quality::Draft);
        assert_eq!(Quality::from_segments(39), Quality::Draft);
        assert_eq!(Quality::from_segments(40), Quality::Standard);
        assert_eq!(Quality::from_segments(63), Quality::Standard);
        assert_eq!(Quality::from_segments(64), Quality::Fine);
        assert_eq!(Quality::from_segments(80), Quality::Ultra);
        assert_eq!(Quality::Fine.to_string(), "Fine");
    }

    #[test]
    fn test_from_params_errors() {
        let mut params = DishParams {
            radius: "abc".into(),
            ..Default::default()
        };
        assert!(matches!(
            Dish::from_params(&params),
            Err(DishError::Radius(ParseDistanceError::MissingNumber(_)))
        ));

        params.radius = "200mm".into();
        assert!(matches!(
            Dish::from_params(&params),
            Err(DishError::Invalid(InvalidDish::RadiusTooSmall { .. }))
        ));

        params.radius = "14ft".into();
        params.rim_width = 300.0;
        assert!(matches!(
            Dish::from_params(&params),
            Err(DishError::Invalid(InvalidDish::RimTooWide { .. }))
        ));

        params.rim_width = 50.0;
        params.sections_y = 0;
        assert!(matches!(Dish::from_params(&params), Err(DishError::Grid(_))));

        params.sections_y = 2;
        params.segments = 0;
        assert!(matches!(
            Dish::from_params(&params),
            Err(DishError::Segments(0))
        ));
    }

    #[test]
    fn test_cap_through_base_is_refused() {
        // 5mm passes the validity gate but the cap is about 7.33mm deep.
        let params = DishParams {
            thickness: 5.0,
            ..Default::default()
        };
        match Dish::from_params(&params) {
            Err(DishError::TooThin { sag, thickness }) => {
                assert_eq!(thickness, 5.0);
                assert_abs_diff_eq!(sag, 7.33, epsilon = 0.01);
            }
            other => panic!("expected TooThin, got {other:?}"),
        }

        let params = DishParams {
            thickness: 7.5,
            ..Default::default()
        };
        assert!(Dish::from_params(&params).is_ok());
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_stl_error() {
        let dish = reference();
        for format in [StlFormat::Binary, StlFormat::Ascii] {
            let dish = dish.clone().with_format(format);
            let err = dish
                .write_tile_stl(TileAddress::new(0, 0), FullDisk)
                .unwrap_err();
            assert!(matches!(err, DishError::Stl(StlError::Io(_))), "{err:?}");
        }
    }

    #[test]
    fn test_write_tile_stl_matches_bytes() {
        let dish = reference();
        let tile = TileAddress::new(1, 0);
        let mut out = Vec::new();
        dish.write_tile_stl(tile, &mut out).unwrap();
        assert_eq!(out, dish.tile_stl(tile).unwrap());
    }

    #[test]
    fn test_export_ascii() {
        let dir = scratch_dir("ascii");
        let dish = Dish::from_params(&DishParams {
            segments: 6,
            ..Default::default()
        })
        .unwrap()
        .with_format(StlFormat::Ascii);
        assert_eq!(dish.format(), StlFormat::Ascii);

        let path = dish
            .export_tile(&dir, TileAddress::new(0, 1), &mut Unlimited)
            .unwrap();
        assert!(path.ends_with("radius_dish_14ft_C1R2.stl"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("solid radius_dish_14ft_C1R2\n"));
        assert!(text.ends_with("endsolid radius_dish_14ft_C1R2\n"));
        assert_eq!(
            text.matches("facet normal").count(),
            dish.summary().triangles_per_tile
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_tile_file_name() {
        let tile = TileAddress::new(0, 1);
        assert_eq!(tile_file_name("14ft", tile), "radius_dish_14ft_C1R2.stl");
        assert_eq!(
            tile_file_name("14 ft", TileAddress::new(2, 0)),
            "radius_dish_14_ft_C3R1.stl"
        );
        assert_eq!(
            tile_file_name("14' \t 2\"", tile),
            "radius_dish_14'_2\"_C1R2.stl"
        );
    }

    #[test]
    fn test_tile_stl() {
        let dish = reference();
        let n = dish.summary().triangles_per_tile;
        for tile in dish.tiles() {
            let stl = dish.tile_stl(tile).unwrap();
            assert_eq!(stl.len(), 84 + 50 * n);
            let mesh = read_stl(&stl).unwrap();
            assert_eq!(mesh.len(), n);
            assert!(audit(&mesh).is_watertight());
        }
    }

    #[test]
    fn test_tile_out_of_range() {
        let dish = reference();
        let err = dish.tile_mesh(TileAddress::new(2, 0)).unwrap_err();
        assert!(matches!(
            err,
            DishError::TileOutOfRange {
                sections_x: 2,
                sections_y: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_export_all() {
        let dir = scratch_dir("all");
        let dish = reference();
        let paths = dish.export_all(&dir, &mut Unlimited).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "radius_dish_14ft_C1R1.stl",
                "radius_dish_14ft_C2R1.stl",
                "radius_dish_14ft_C1R2.stl",
                "radius_dish_14ft_C2R2.stl",
            ]
        );
        for path in &paths {
            let bytes = fs::read(path).unwrap();
            assert_eq!(bytes.len(), 84 + 50 * dish.summary().triangles_per_tile);
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_consumes_quota_per_action() {
        let dir = scratch_dir("quota");
        let dish = Dish::from_params(&DishParams {
            segments: 4,
            ..Default::default()
        })
        .unwrap();
        let mut gate = FreeUses::new(2);

        dish.export_all(&dir, &mut gate).unwrap();
        assert_eq!(gate.remaining(), 1);

        // A bad address is refused before the gate is asked.
        assert!(matches!(
            dish.export_tile(&dir, TileAddress::new(5, 5), &mut gate),
            Err(DishError::TileOutOfRange { .. })
        ));
        assert_eq!(gate.remaining(), 1);

        let path = dish
            .export_tile(&dir, TileAddress::new(1, 1), &mut gate)
            .unwrap();
        assert!(path.ends_with("radius_dish_14ft_C2R2.stl"));
        assert!(matches!(
            dish.export_tile(&dir, TileAddress::new(0, 0), &mut gate),
            Err(DishError::QuotaExhausted)
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
