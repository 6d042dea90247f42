use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::KernelError;
use crate::geometry::{BoundingBox, Point3d, Vec3};

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for &idx in &other.indices {
            self.indices.push(idx + offset);
        }
    }

    pub fn position(&self, i: usize) -> Point3d {
        let p = &self.positions[i * 3..i * 3 + 3];
        Point3d::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
    }

    pub fn normal(&self, i: usize) -> Vec3 {
        let n = &self.normals[i * 3..i * 3 + 3];
        Vec3::new(f64::from(n[0]), f64::from(n[1]), f64::from(n[2]))
    }

    pub fn bounds(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for i in 0..self.vertex_count() {
            bb.expand_to_include(&self.position(i));
        }
        bb
    }

    /// Copy of the mesh moved by `offset`. Normals are unchanged.
    pub fn translated(&self, offset: Vec3) -> TriangleMesh {
        let mut out = self.clone();
        for p in out.positions.chunks_exact_mut(3) {
            p[0] += offset.x as f32;
            p[1] += offset.y as f32;
            p[2] += offset.z as f32;
        }
        out
    }

    /// Non-uniform scale about the origin. Normals follow the inverse
    /// transpose and are renormalised.
    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        for p in self.positions.chunks_exact_mut(3) {
            p[0] = (f64::from(p[0]) * sx) as f32;
            p[1] = (f64::from(p[1]) * sy) as f32;
            p[2] = (f64::from(p[2]) * sz) as f32;
        }
        for n in self.normals.chunks_exact_mut(3) {
            let v = Vec3::new(
                f64::from(n[0]) / sx,
                f64::from(n[1]) / sy,
                f64::from(n[2]) / sz,
            );
            let v = v.normalized().unwrap_or(Vec3::Y);
            n[0] = v.x as f32;
            n[1] = v.y as f32;
            n[2] = v.z as f32;
        }
    }

    /// Replace normals with area-weighted averages of the adjacent face
    /// normals. Vertices that are not shared between faces keep a flat normal.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertex_count()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = self.position(a);
            let face = (self.position(b) - pa).cross(&(self.position(c) - pa));
            accum[a] = accum[a] + face;
            accum[b] = accum[b] + face;
            accum[c] = accum[c] + face;
        }
        for (n, sum) in self.normals.chunks_exact_mut(3).zip(accum) {
            let v = sum.normalized().unwrap_or(Vec3::Y);
            n[0] = v.x as f32;
            n[1] = v.y as f32;
            n[2] = v.z as f32;
        }
    }

    /// Structural sanity check: buffer lengths agree, indices are in range,
    /// coordinates are finite and normals are unit length.
    pub fn validate(&self) -> Result<(), KernelError> {
        let malformed = |reason: String| Err(KernelError::MalformedMesh { reason });
        if self.positions.len() % 3 != 0 || self.indices.len() % 3 != 0 {
            return malformed("buffer length is not a multiple of 3".to_string());
        }
        if self.normals.len() != self.positions.len() {
            return malformed(format!(
                "{} normal components for {} position components",
                self.normals.len(),
                self.positions.len()
            ));
        }
        let count = self.vertex_count() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= count) {
            return malformed(format!("index {bad} out of range for {count} vertices"));
        }
        if self.positions.iter().any(|c| !c.is_finite()) {
            return malformed("non-finite vertex position".to_string());
        }
        for i in 0..self.vertex_count() {
            let len = self.normal(i).length();
            if (len - 1.0).abs() > 1e-3 {
                return malformed(format!("normal {i} has length {len}"));
            }
        }
        Ok(())
    }
}

/// Serialise a mesh as Wavefront OBJ text (positions, normals, faces).
pub fn mesh_to_obj(mesh: &TriangleMesh) -> String {
    let mut out = String::new();
    for p in mesh.positions.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    for t in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (t[0] + 1, t[1] + 1, t[2] + 1);
        let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
    }
    out
}

/// Convert a mesh to binary STL.
///
/// Layout: 80-byte header, u32 LE triangle count, then per triangle a face
/// normal, three vertices (all f32 LE) and a zero u16 attribute count.
pub fn mesh_to_stl(mesh: &TriangleMesh) -> Vec<u8> {
    let tri_count = mesh.triangle_count();
    let mut buf = Vec::with_capacity(84 + tri_count * 50);

    let header = b"Fitting Room STL Export";
    buf.extend_from_slice(header);
    buf.extend_from_slice(&[0u8; 80 - 23]);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let [p0, p1, p2] = [
            mesh.position(tri[0] as usize),
            mesh.position(tri[1] as usize),
            mesh.position(tri[2] as usize),
        ];
        let normal = (p1 - p0)
            .cross(&(p2 - p0))
            .normalized()
            .unwrap_or(Vec3::ZERO);
        for c in [normal.x, normal.y, normal.z] {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for p in [p0, p1, p2] {
            for c in p.to_array() {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let a = mesh.add_vertex(Point3d::new(0.0, 0.0, 0.0), Vec3::Z);
        let b = mesh.add_vertex(Point3d::new(1.0, 0.0, 0.0), Vec3::Z);
        let c = mesh.add_vertex(Point3d::new(0.0, 1.0, 0.0), Vec3::Z);
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = unit_triangle();
        mesh.merge(&unit_triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(&mesh.indices[3..], &[3, 4, 5]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_translated_moves_bounds() {
        let mesh = unit_triangle().translated(Vec3::new(1.0, 2.0, 3.0));
        let bb = mesh.bounds();
        assert_eq!(bb.min, Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(bb.max, Point3d::new(2.0, 3.0, 3.0));
    }

    #[test]
    fn test_recompute_normals_follows_winding() {
        let mut mesh = unit_triangle();
        mesh.normals.iter_mut().for_each(|c| *c = 0.0);
        mesh.recompute_normals();
        for i in 0..3 {
            assert_eq!(mesh.normal(i), Vec3::Z);
        }
    }

    #[test]
    fn test_scale_renormalises_normals() {
        let mut mesh = unit_triangle();
        mesh.scale(2.0, 1.0, 0.5);
        assert_eq!(mesh.position(1), Point3d::new(2.0, 0.0, 0.0));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut mesh = unit_triangle();
        mesh.add_triangle(0, 1, 7);
        assert!(matches!(
            mesh.validate(),
            Err(KernelError::MalformedMesh { .. })
        ));
    }

    #[test]
    fn test_stl_layout() {
        let stl = mesh_to_stl(&unit_triangle());
        assert_eq!(stl.len(), 84 + 50);
        assert_eq!(u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]), 1);
        // Face normal z component.
        let nz = f32::from_le_bytes([stl[92], stl[93], stl[94], stl[95]]);
        assert_eq!(nz, 1.0);
    }

    #[test]
    fn test_obj_is_one_based() {
        let obj = mesh_to_obj(&unit_triangle());
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 3);
        assert!(obj.contains("f 1//1 2//2 3//3"));
    }
}
