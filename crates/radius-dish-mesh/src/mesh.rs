//! Triangle soup with per-face normals.

use nalgebra::{Point3, Vector3};

/// One facet: three vertices and an outward unit normal.
///
/// Vertices are counter-clockwise when viewed from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Outward unit normal.
    pub normal: Vector3<f32>,
    /// Corner positions (mm).
    pub vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Triangle with an explicit normal.
    pub fn new(vertices: [Point3<f32>; 3], normal: Vector3<f32>) -> Self {
        Self { normal, vertices }
    }

    /// Triangle whose normal follows its winding. Degenerate input gets a
    /// zero normal.
    pub fn from_winding(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Self {
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        Self {
            normal: normal.cast::<f32>(),
            vertices: [a.cast::<f32>(), b.cast::<f32>(), c.cast::<f32>()],
        }
    }

    /// Unnormalized normal from the winding, computed in f64.
    pub fn winding_vector(&self) -> Vector3<f64> {
        let [a, b, c] = self.vertices.map(|v| v.cast::<f64>());
        (b - a).cross(&(c - a))
    }

    /// Facet area.
    pub fn area(&self) -> f64 {
        self.winding_vector().norm() / 2.0
    }
}

/// An unindexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Facets in emission order.
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `n` triangles.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(n),
        }
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append one triangle.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Iterate over the triangles.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *vertices.next()?;
        let (min, max) = vertices.fold((first, first), |(lo, hi), v| {
            (lo.inf(v), hi.sup(v))
        });
        Some((min, max))
    }

    /// Enclosed volume by the divergence theorem. Positive for a closed,
    /// outward-wound mesh.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices.map(|v| v.coords.cast::<f64>());
                a.dot(&b.cross(&c))
            })
            .sum::<f64>()
            / 6.0
    }
}

impl<'a> IntoIterator for &'a TriangleMesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
