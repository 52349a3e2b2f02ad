//! Closure and orientation checks for triangle soups.
//!
//! A mesh is closed when every directed edge is cancelled by the same edge
//! running the other way in a neighbouring triangle. Edges left over after
//! that pass are split at any other leftover vertex lying on them and
//! matched again, so a long base edge against a row of short wall edges
//! (a T-junction) still counts as closed. A directed edge used by more
//! than one triangle is reported separately as non-manifold.

use nalgebra::Point3;
use std::collections::{HashMap, HashSet};

use crate::mesh::TriangleMesh;

/// Positions are compared bit-for-bit.
type VertexKey = [u32; 3];
type EdgeKey = (VertexKey, VertexKey);

/// Lateral offset, relative to edge length, for a vertex to count as lying
/// on an edge.
const COLLINEAR_TOLERANCE: f64 = 1e-6;

/// Twice-area below which a triangle is degenerate (mm²).
const DEGENERATE_AREA: f64 = 1e-12;

/// Result of [`audit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAudit {
    /// Triangles inspected.
    pub triangle_count: usize,
    /// Directed edges with no opposite partner, as `[from, to]`.
    pub open_edges: Vec<[Point3<f32>; 2]>,
    /// Directed edges used by more than one triangle, once each.
    pub non_manifold_edges: Vec<[Point3<f32>; 2]>,
    /// Triangles with (near) zero area.
    pub degenerate_triangles: usize,
    /// Triangles whose stored normal points against their winding.
    pub flipped_normals: usize,
}

impl MeshAudit {
    /// No open edges and every edge shared by exactly two triangles.
    pub fn is_watertight(&self) -> bool {
        self.open_edges.is_empty() && self.non_manifold_edges.is_empty()
    }

    /// Watertight, with no degenerate faces and every normal agreeing with
    /// its winding.
    pub fn is_consistent(&self) -> bool {
        self.is_watertight() && self.degenerate_triangles == 0 && self.flipped_normals == 0
    }
}

/// Inspect `mesh` for open edges, degenerate faces and flipped normals.
pub fn audit(mesh: &TriangleMesh) -> MeshAudit {
    let mut report = MeshAudit {
        triangle_count: mesh.len(),
        ..Default::default()
    };
    let mut positions: HashMap<VertexKey, Point3<f32>> = HashMap::new();
    let mut edges: HashMap<EdgeKey, i64> = HashMap::new();

    for tri in mesh {
        let winding = tri.winding_vector();
        if winding.norm() <= DEGENERATE_AREA {
            report.degenerate_triangles += 1;
        } else if tri.normal.cast::<f64>().dot(&winding) <= 0.0 {
            report.flipped_normals += 1;
        }

        let keys = tri.vertices.map(|v| vertex_key(&v));
        for (key, v) in keys.iter().zip(&tri.vertices) {
            positions.entry(*key).or_insert(*v);
        }
        for k in 0..3 {
            *edges.entry((keys[k], keys[(k + 1) % 3])).or_insert(0) += 1;
        }
    }

    report.non_manifold_edges = edges
        .iter()
        .filter(|&(_, &count)| count > 1)
        .map(|(&(a, b), _)| [positions[&a], positions[&b]])
        .collect();

    let leftover = unmatched(&edges);
    let open = if leftover.is_empty() {
        leftover
    } else {
        split_at_junctions(&leftover, &positions)
    };

    report.open_edges = open
        .into_iter()
        .map(|(a, b)| [positions[&a], positions[&b]])
        .collect();
    report
}

fn vertex_key(p: &Point3<f32>) -> VertexKey {
    // Adding zero folds -0.0 into +0.0.
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

/// Directed edges, with multiplicity, not cancelled by a reverse edge.
fn unmatched(edges: &HashMap<EdgeKey, i64>) -> Vec<EdgeKey> {
    let mut open = Vec::new();
    for (&(a, b), &count) in edges {
        let reverse = edges.get(&(b, a)).copied().unwrap_or(0);
        for _ in 0..(count - reverse).max(0) {
            open.push((a, b));
        }
    }
    open
}

/// Split each leftover edge at leftover vertices lying on it, then cancel
/// again.
fn split_at_junctions(
    leftover: &[EdgeKey],
    positions: &HashMap<VertexKey, Point3<f32>>,
) -> Vec<EdgeKey> {
    let anchors: HashSet<VertexKey> = leftover.iter().flat_map(|&(a, b)| [a, b]).collect();
    let mut pieces: HashMap<EdgeKey, i64> = HashMap::new();

    for &(a, b) in leftover {
        let pa = positions[&a].cast::<f64>();
        let dir = positions[&b].cast::<f64>() - pa;
        let len2 = dir.norm_squared();

        let mut cuts: Vec<(f64, VertexKey)> = anchors
            .iter()
            .filter(|&&k| k != a && k != b && len2 > 0.0)
            .filter_map(|&k| {
                let rel = positions[&k].cast::<f64>() - pa;
                let t = rel.dot(&dir) / len2;
                if t <= 0.0 || t >= 1.0 {
                    return None;
                }
                let offset = rel - dir * t;
                (offset.norm_squared() <= COLLINEAR_TOLERANCE * COLLINEAR_TOLERANCE * len2)
                    .then_some((t, k))
            })
            .collect();
        cuts.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut from = a;
        for (_, to) in cuts {
            *pieces.entry((from, to)).or_insert(0) += 1;
            from = to;
        }
        *pieces.entry((from, b)).or_insert(0) += 1;
    }

    unmatched(&pieces)
}
