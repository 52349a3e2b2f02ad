//! ASCII STL, for inspection and tools that only read text.

use radius_dish_mesh::TriangleMesh;
use std::fmt::Write;

/// Render `mesh` as an ASCII STL solid called `name`.
pub fn to_ascii_stl(mesh: &TriangleMesh, name: &str) -> String {
    let mut out = String::with_capacity(mesh.len() * 260 + 64);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {name}");
    for tri in mesh {
        let n = tri.normal;
        let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}
