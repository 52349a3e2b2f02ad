//! radius-dish CLI - generate printable radius dish tiles
//!
//! Computes dish figures and writes one binary STL per tile.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use radius_dish::{
    sections_for_bed, BedPreset, Dish, DishParams, RadiusPreset, StlFormat, TileAddress,
    Unlimited,
};
use radius_dish_mesh::audit;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "radius-dish")]
#[command(about = "Spherical radius dish generator for luthiers", long_about = None)]
struct Cli {
    #[command(flatten)]
    dish: DishArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Dish parameters. Flags override values read from `--config`.
#[derive(Args)]
struct DishArgs {
    /// TOML file with dish parameters
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Sphere radius, e.g. 14ft, 4267mm, 4.267m, 168in, 14'2"
    #[arg(short, long, global = true)]
    radius: Option<String>,
    /// Dish width (mm)
    #[arg(long, global = true)]
    width: Option<f64>,
    /// Dish height, front to back (mm)
    #[arg(long, global = true)]
    height: Option<f64>,
    /// Flat rim width (mm)
    #[arg(long, global = true)]
    rim: Option<f64>,
    /// Total thickness (mm)
    #[arg(long, global = true)]
    thickness: Option<f64>,
    /// Tile columns
    #[arg(long, global = true)]
    sections_x: Option<u32>,
    /// Tile rows
    #[arg(long, global = true)]
    sections_y: Option<u32>,
    /// Grid cells per tile side
    #[arg(long, global = true)]
    segments: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print curve radius, sag and tiling figures
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write one tile as STL
    Tile {
        /// Column, 1 = leftmost
        #[arg(long)]
        col: u32,
        /// Row, 1 = rearmost
        #[arg(long)]
        row: u32,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Write ASCII STL instead of binary
        #[arg(long)]
        ascii: bool,
    },
    /// Write every tile as STL
    All {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Write ASCII STL instead of binary
        #[arg(long)]
        ascii: bool,
    },
    /// Check that every tile mesh is closed
    Check,
    /// List printer bed and radius presets
    Presets,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { json } => {
            let dish = load_dish(&cli.dish)?;
            show_info(&dish, json)?;
        }
        Commands::Tile {
            col,
            row,
            out,
            ascii,
        } => {
            if col == 0 || row == 0 {
                anyhow::bail!("columns and rows are numbered from 1");
            }
            let dish = load_dish(&cli.dish)?.with_format(stl_format(ascii));
            let tile = TileAddress::new(col - 1, row - 1);
            let path = dish.export_tile(&out, tile, &mut Unlimited)?;
            println!("Exported {}", path.display());
        }
        Commands::All { out, ascii } => {
            let dish = load_dish(&cli.dish)?.with_format(stl_format(ascii));
            let paths = dish.export_all(&out, &mut Unlimited)?;
            println!("Exported {} sections to {}", paths.len(), out.display());
        }
        Commands::Check => {
            let dish = load_dish(&cli.dish)?;
            check_tiles(&dish)?;
        }
        Commands::Presets => show_presets(&cli.dish)?,
    }

    Ok(())
}

fn load_params(args: &DishArgs) -> Result<DishParams> {
    let mut params = match &args.config {
        Some(path) => DishParams::load(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DishParams::default(),
    };

    if let Some(radius) = &args.radius {
        params.radius = radius.clone();
    }
    if let Some(v) = args.width {
        params.dish_width = v;
    }
    if let Some(v) = args.height {
        params.dish_height = v;
    }
    if let Some(v) = args.rim {
        params.rim_width = v;
    }
    if let Some(v) = args.thickness {
        params.thickness = v;
    }
    if let Some(v) = args.sections_x {
        params.sections_x = v;
    }
    if let Some(v) = args.sections_y {
        params.sections_y = v;
    }
    if let Some(v) = args.segments {
        params.segments = v;
    }
    Ok(params)
}

fn load_dish(args: &DishArgs) -> Result<Dish> {
    Ok(Dish::from_params(&load_params(args)?)?)
}

fn stl_format(ascii: bool) -> StlFormat {
    if ascii {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    }
}

fn show_info(dish: &Dish, json: bool) -> Result<()> {
    let s = dish.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&s)?);
        return Ok(());
    }

    println!(
        "Radius:          {} ({:.1} mm, {:.3} ft)",
        s.radius_text, s.sphere_radius, s.sphere_radius_ft
    );
    println!("Curved diameter: {:.1} mm", s.curved_diameter);
    println!("Sag:             {:.2} mm", s.sag);
    println!("Centre material: {:.2} mm", s.center_clearance);
    println!(
        "Sections:        {} x {} = {} tiles of {:.1} x {:.1} mm",
        s.sections_x, s.sections_y, s.tile_count, s.tile_width, s.tile_height
    );
    println!(
        "Mesh:            {} segments ({}), {} triangles per tile",
        s.segments, s.quality, s.triangles_per_tile
    );
    Ok(())
}

fn check_tiles(dish: &Dish) -> Result<()> {
    log::info!(
        "checking {} tiles at {} segments",
        dish.grid().len(),
        dish.segments()
    );
    let mut failed = 0;
    for tile in dish.tiles() {
        let report = audit(&dish.tile_mesh(tile)?);
        if report.is_consistent() {
            println!("{tile}: ok ({} triangles)", report.triangle_count);
        } else {
            failed += 1;
            log::debug!("{tile}: open edges {:?}", report.open_edges);
            println!(
                "{tile}: {} open edges, {} non-manifold, {} degenerate, {} flipped",
                report.open_edges.len(),
                report.non_manifold_edges.len(),
                report.degenerate_triangles,
                report.flipped_normals
            );
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} tiles failed the mesh check");
    }
    Ok(())
}

fn show_presets(args: &DishArgs) -> Result<()> {
    let params = load_params(args)?;

    println!("Radii:");
    for preset in RadiusPreset::all() {
        println!("  {:<8} {}", preset.radius, preset.name);
    }

    println!(
        "Beds (sections for {} x {} mm):",
        params.dish_width, params.dish_height
    );
    for bed in BedPreset::all() {
        let (nx, ny) = sections_for_bed(params.dish_width, params.dish_height, bed);
        println!(
            "  {:<18} {:>6} x {:<6} -> {nx} x {ny}",
            bed.name, bed.width, bed.height
        );
    }
    Ok(())
}
