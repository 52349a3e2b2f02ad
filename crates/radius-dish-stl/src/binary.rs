//! Binary STL.
//!
//! Layout, all little-endian:
//! - 80 bytes: header (free text, zero padded)
//! - 4 bytes: u32 triangle count
//! - Per triangle (50 bytes):
//!   - 12 bytes: normal (3 × f32)
//!   - 36 bytes: 3 vertices (3 × 3 × f32)
//!   - 2 bytes: attribute byte count, always 0

use nalgebra::{Point3, Vector3};
use radius_dish_mesh::{Triangle, TriangleMesh};
use std::io::Write;

use crate::error::{Result, StlError};

/// Header length in bytes.
pub const HEADER_LEN: usize = 80;
/// Bytes per triangle record.
pub const TRIANGLE_LEN: usize = 50;
/// Header text written by [`to_stl_bytes`].
pub const DEFAULT_HEADER: &str = "radius-dish binary STL";

/// Exact encoded size of `triangles` facets: `84 + 50 * triangles`.
pub fn encoded_len(triangles: usize) -> usize {
    HEADER_LEN + 4 + TRIANGLE_LEN * triangles
}

/// Encode `mesh` as binary STL with the default header.
pub fn to_stl_bytes(mesh: &TriangleMesh) -> Vec<u8> {
    to_stl_bytes_with_header(mesh, DEFAULT_HEADER)
}

/// Encode `mesh` as binary STL. `header` is truncated to 80 bytes.
///
/// Avoid headers starting with `solid`; some readers take those for ASCII.
pub fn to_stl_bytes_with_header(mesh: &TriangleMesh, header: &str) -> Vec<u8> {
    assert!(
        mesh.len() <= u32::MAX as usize,
        "binary STL holds at most {} triangles",
        u32::MAX
    );
    let mut buf = Vec::with_capacity(encoded_len(mesh.len()));

    let text = header.as_bytes();
    buf.extend_from_slice(&text[..text.len().min(HEADER_LEN)]);
    buf.resize(HEADER_LEN, 0u8);

    buf.extend_from_slice(&(mesh.len() as u32).to_le_bytes());

    for tri in mesh {
        for c in tri.normal.iter() {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in &tri.vertices {
            for c in v.coords.iter() {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

/// Write `mesh` as binary STL to `out`.
pub fn write_stl<W: Write>(mesh: &TriangleMesh, mut out: W) -> Result<()> {
    out.write_all(&to_stl_bytes(mesh))?;
    out.flush()?;
    Ok(())
}

/// Decode binary STL. Bytes past the last declared triangle are ignored.
pub fn read_stl(data: &[u8]) -> Result<TriangleMesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooShort { len: data.len() });
    }

    let triangles = read_u32(data, HEADER_LEN);
    let expected = encoded_len(triangles as usize);
    if data.len() < expected {
        return Err(StlError::Truncated {
            triangles,
            expected,
            actual: data.len(),
        });
    }

    let mut mesh = TriangleMesh::with_capacity(triangles as usize);
    let mut offset = HEADER_LEN + 4;
    for _ in 0..triangles {
        let normal = read_vec3(data, offset);
        let vertices = [
            Point3::from(read_vec3(data, offset + 12)),
            Point3::from(read_vec3(data, offset + 24)),
            Point3::from(read_vec3(data, offset + 36)),
        ];
        mesh.push(Triangle::new(vertices, normal));
        offset += TRIANGLE_LEN;
    }

    Ok(mesh)
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32(data, offset))
}

fn read_vec3(data: &[u8], offset: usize) -> Vector3<f32> {
    Vector3::new(
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}
