//! Closed mesh for one tile of a radius dish.
//!
//! Each tile is a block: the dish surface on top (curved cap where the
//! tile reaches inside the curve radius, flat rim elsewhere), four vertical
//! walls, and a flat base at `z = -thickness`. Vertices stay in
//! dish-centred coordinates so printed tiles reassemble edge to edge.

use nalgebra::{Point3, Vector3};
use radius_dish_geom::{DishConfig, PlanRect, TileAddress, TileGrid};

use crate::mesh::{Triangle, TriangleMesh};

/// Triangles produced for `segments` subdivisions per tile edge:
/// `2N²` top, `8N` walls, `2` base.
pub fn expected_triangle_count(segments: u32) -> usize {
    let n = segments as usize;
    2 * n * n + 8 * n + 2
}

/// Build the watertight mesh of `tile`.
///
/// `segments` is the number of grid subdivisions along each tile edge.
///
/// # Panics
///
/// Panics if `tile` is outside `grid`, `segments` is zero, or the cap
/// reaches the base (`config.center_clearance() <= 0`), which would turn the
/// walls near the centre inside out.
pub fn build_section(
    config: &DishConfig,
    grid: TileGrid,
    tile: TileAddress,
    segments: u32,
) -> TriangleMesh {
    assert!(segments >= 1, "segment count must be at least 1");
    assert!(
        config.center_clearance() > 0.0,
        "cap depth {:.3} reaches the base at thickness {}",
        config.curve().sag,
        config.thickness()
    );
    assert!(
        grid.contains(tile),
        "tile {tile} outside {}x{} grid",
        grid.sections_x(),
        grid.sections_y()
    );

    let rect = grid.tile_rect(config.dish_width(), config.dish_height(), tile);
    let top = HeightField::sample(config, &rect, segments as usize);
    let base_z = config.base_z();

    let mut mesh = TriangleMesh::with_capacity(expected_triangle_count(segments));
    top.emit_surface(&mut mesh);
    top.emit_walls(base_z, &mut mesh);
    emit_base(&rect, base_z, &mut mesh);

    log::debug!(
        "tile {tile}: x {:.3}..{:.3}, y {:.3}..{:.3}, {} triangles",
        rect.x0,
        rect.x1,
        rect.y0,
        rect.y1,
        mesh.len()
    );
    mesh
}

/// `(n + 1) × (n + 1)` samples of the dish surface over one tile.
struct HeightField {
    n: usize,
    points: Vec<Point3<f64>>,
}

impl HeightField {
    fn sample(config: &DishConfig, rect: &PlanRect, n: usize) -> Self {
        let mut points = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            let y = lerp(rect.y0, rect.y1, j, n);
            for i in 0..=n {
                let x = lerp(rect.x0, rect.x1, i, n);
                let z = config.surface_z(x.hypot(y));
                points.push(Point3::new(x, y, z));
            }
        }
        Self { n, points }
    }

    /// Sample at column `i` (along x) and row `j` (along y).
    fn at(&self, i: usize, j: usize) -> &Point3<f64> {
        &self.points[j * (self.n + 1) + i]
    }

    /// Top surface, two counter-clockwise triangles per cell split on the
    /// same diagonal.
    fn emit_surface(&self, mesh: &mut TriangleMesh) {
        for j in 0..self.n {
            for i in 0..self.n {
                let a = self.at(i, j);
                let b = self.at(i + 1, j);
                let c = self.at(i + 1, j + 1);
                let d = self.at(i, j + 1);
                mesh.push(Triangle::from_winding(a, b, c));
                mesh.push(Triangle::from_winding(a, c, d));
            }
        }
    }

    /// Boundary samples walked counter-clockwise from above: front, right,
    /// back, left. Each corner appears once.
    fn boundary_ring(&self) -> Vec<&Point3<f64>> {
        let n = self.n;
        let mut ring = Vec::with_capacity(4 * n);
        ring.extend((0..n).map(|i| self.at(i, 0)));
        ring.extend((0..n).map(|j| self.at(n, j)));
        ring.extend((1..=n).rev().map(|i| self.at(i, n)));
        ring.extend((1..=n).rev().map(|j| self.at(0, j)));
        ring
    }

    /// One vertical quad per boundary segment, from the top edge down to
    /// `base_z`.
    fn emit_walls(&self, base_z: f64, mesh: &mut TriangleMesh) {
        let ring = self.boundary_ring();
        for (k, &t0) in ring.iter().enumerate() {
            let t1 = ring[(k + 1) % ring.len()];
            let b0 = Point3::new(t0.x, t0.y, base_z);
            let b1 = Point3::new(t1.x, t1.y, base_z);

            // Walking counter-clockwise, outward is the travel direction
            // turned a quarter to the right.
            let normal = Vector3::new(t1.y - t0.y, t0.x - t1.x, 0.0)
                .normalize()
                .cast::<f32>();
            mesh.push(Triangle::new(cast3([&b0, &b1, t1]), normal));
            mesh.push(Triangle::new(cast3([&b0, t1, t0]), normal));
        }
    }
}

/// Base rectangle, wound clockwise from above so it faces down.
fn emit_base(rect: &PlanRect, base_z: f64, mesh: &mut TriangleMesh) {
    let p00 = Point3::new(rect.x0, rect.y0, base_z);
    let p10 = Point3::new(rect.x1, rect.y0, base_z);
    let p11 = Point3::new(rect.x1, rect.y1, base_z);
    let p01 = Point3::new(rect.x0, rect.y1, base_z);
    let down = Vector3::new(0.0, 0.0, -1.0);
    mesh.push(Triangle::new(cast3([&p00, &p11, &p10]), down));
    mesh.push(Triangle::new(cast3([&p00, &p01, &p11]), down));
}

/// `k / n` of the way from `a` to `b`, landing exactly on `b` at `k == n`.
fn lerp(a: f64, b: f64, k: usize, n: usize) -> f64 {
    if k == n {
        b
    } else {
        a + (b - a) * (k as f64 / n as f64)
    }
}

fn cast3(points: [&Point3<f64>; 3]) -> [Point3<f32>; 3] {
    points.map(|p| p.cast::<f32>())
}
