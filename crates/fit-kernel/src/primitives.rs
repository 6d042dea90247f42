use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{require_positive, require_segments, KernelError};
use crate::geometry::{Point3d, Vec3};
use crate::lathe::revolve_profile;
use crate::mesh::TriangleMesh;
use crate::profile::{Profile, ProfileSample};

/// UV sphere centred on the origin.
///
/// `width_segments` runs around the Y axis, `height_segments` from pole to
/// pole. Pole rows emit a single triangle per quad.
#[instrument]
pub fn uv_sphere(
    radius: f64,
    width_segments: usize,
    height_segments: usize,
) -> Result<TriangleMesh, KernelError> {
    require_positive("sphere radius", radius)?;
    require_segments(3, width_segments)?;
    require_segments(2, height_segments)?;

    let mut mesh = TriangleMesh::new();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments + 1);

    for iy in 0..=height_segments {
        let v = iy as f64 / height_segments as f64;
        let theta = v * PI;
        let row = (0..=width_segments)
            .map(|ix| {
                let phi = TAU * ix as f64 / width_segments as f64;
                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                mesh.add_vertex(Point3d::ORIGIN + normal * radius, normal)
            })
            .collect();
        grid.push(row);
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    Ok(mesh)
}

/// Capped cylinder centred on the origin, possibly tapered.
///
/// Built as a two-sample profile swept by the lathe so it shares normals and
/// winding with every other revolved part.
#[instrument]
pub fn tapered_cylinder(
    top_radius: f64,
    bottom_radius: f64,
    height: f64,
    radial_segments: usize,
) -> Result<TriangleMesh, KernelError> {
    require_positive("cylinder top radius", top_radius)?;
    require_positive("cylinder bottom radius", bottom_radius)?;
    require_positive("cylinder height", height)?;
    let profile = Profile::from_samples(
        "cylinder",
        vec![
            ProfileSample {
                radius: bottom_radius,
                y: -height / 2.0,
            },
            ProfileSample {
                radius: top_radius,
                y: height / 2.0,
            },
        ],
    )?;
    revolve_profile(&profile, radial_segments)
}

/// Subdivided axis-aligned box centred on the origin.
///
/// Faces do not share vertices, so each face keeps a flat normal until the
/// mesh is deformed and normals are recomputed.
#[instrument]
pub fn segmented_box(
    width: f64,
    height: f64,
    depth: f64,
    width_segments: usize,
    height_segments: usize,
    depth_segments: usize,
) -> Result<TriangleMesh, KernelError> {
    require_positive("box width", width)?;
    require_positive("box height", height)?;
    require_positive("box depth", depth)?;
    for segments in [width_segments, height_segments, depth_segments] {
        require_segments(1, segments)?;
    }

    let (w, h, d) = (width, height, depth);
    // (face centre, u span, v span, segments along u, segments along v).
    // u × v points along the outward normal.
    let faces = [
        (Vec3::X * (w / 2.0), -Vec3::Z * d, Vec3::Y * h, depth_segments, height_segments),
        (-Vec3::X * (w / 2.0), Vec3::Z * d, Vec3::Y * h, depth_segments, height_segments),
        (Vec3::Y * (h / 2.0), Vec3::X * w, -Vec3::Z * d, width_segments, depth_segments),
        (-Vec3::Y * (h / 2.0), Vec3::X * w, Vec3::Z * d, width_segments, depth_segments),
        (Vec3::Z * (d / 2.0), Vec3::X * w, Vec3::Y * h, width_segments, height_segments),
        (-Vec3::Z * (d / 2.0), -Vec3::X * w, Vec3::Y * h, width_segments, height_segments),
    ];

    let mut mesh = TriangleMesh::new();
    for (center, u, v, su, sv) in faces {
        let normal = u.cross(&v).normalized().unwrap_or(Vec3::Y);
        let base = mesh.vertex_count() as u32;
        for iv in 0..=sv {
            for iu in 0..=su {
                let fu = iu as f64 / su as f64 - 0.5;
                let fv = iv as f64 / sv as f64 - 0.5;
                mesh.add_vertex(Point3d::ORIGIN + center + u * fu + v * fv, normal);
            }
        }
        let stride = su as u32 + 1;
        for iv in 0..sv as u32 {
            for iu in 0..su as u32 {
                let a = base + iv * stride + iu;
                let b = a + 1;
                let c = a + stride + 1;
                let d = a + stride;
                mesh.add_triangle(a, b, c);
                mesh.add_triangle(a, c, d);
            }
        }
    }

    debug!(vertices = mesh.vertex_count(), "built segmented box");
    Ok(mesh)
}

/// Toe/heel rounding for box-shaped feet: every vertex farther than
/// `z_threshold` from the box centre along Z has its X pulled in by
/// `x_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToeRounding {
    pub z_threshold: f64,
    pub x_factor: f64,
}

/// Apply a [`ToeRounding`] in place and recompute smooth normals.
/// Returns the number of displaced vertices.
pub fn round_toe(mesh: &mut TriangleMesh, rule: ToeRounding) -> usize {
    let mut moved = 0;
    for p in mesh.positions.chunks_exact_mut(3) {
        if f64::from(p[2]).abs() > rule.z_threshold {
            p[0] = (f64::from(p[0]) * rule.x_factor) as f32;
            moved += 1;
        }
    }
    mesh.recompute_normals();
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = uv_sphere(0.13, 32, 32).unwrap();
        assert_eq!(mesh.vertex_count(), 33 * 33);
        // Two pole rows of single triangles, the rest full quads.
        assert_eq!(mesh.triangle_count(), 32 * 2 * 32 - 2 * 32);
        for i in 0..mesh.vertex_count() {
            assert_relative_eq!(mesh.position(i).to_vec3().length(), 0.13, epsilon = 1e-6);
        }
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sphere_rejects_bad_input() {
        assert!(matches!(
            uv_sphere(0.0, 8, 8),
            Err(KernelError::InvalidDimension { .. })
        ));
        assert!(matches!(
            uv_sphere(1.0, 2, 8),
            Err(KernelError::InsufficientSegments { .. })
        ));
    }

    #[test]
    fn test_tapered_cylinder_extent() {
        let mesh = tapered_cylinder(0.055, 0.065, 0.12, 32).unwrap();
        let bb = mesh.bounds();
        assert_relative_eq!(bb.min.y, -0.06, epsilon = 1e-6);
        assert_relative_eq!(bb.max.y, 0.06, epsilon = 1e-6);
        assert_relative_eq!(bb.max.z, 0.065, epsilon = 1e-6);
    }

    #[test]
    fn test_box_counts_and_extent() {
        let mesh = segmented_box(0.075, 0.055, 0.17, 8, 4, 8).unwrap();
        let expected_vertices = 2 * (9 * 5) + 2 * (9 * 9) + 2 * (9 * 5);
        assert_eq!(mesh.vertex_count(), expected_vertices);
        assert_eq!(mesh.triangle_count(), 2 * 2 * (8 * 4 + 8 * 8 + 8 * 4));
        assert_eq!(mesh.bounds().size().map(|s| (s * 1e4).round()), [750.0, 550.0, 1700.0]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_box_normals_face_outward() {
        let mesh = segmented_box(1.0, 1.0, 1.0, 1, 1, 1).unwrap();
        for tri in mesh.indices.chunks_exact(3) {
            let a = mesh.position(tri[0] as usize);
            let b = mesh.position(tri[1] as usize);
            let c = mesh.position(tri[2] as usize);
            let face = (b - a).cross(&(c - a));
            let centroid = Vec3::new(a.x + b.x + c.x, a.y + b.y + c.y, a.z + b.z + c.z) / 3.0;
            assert!(face.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_round_toe_only_moves_far_vertices() {
        let mut mesh = segmented_box(0.075, 0.055, 0.17, 8, 4, 8).unwrap();
        let before = mesh.clone();
        let rule = ToeRounding {
            z_threshold: 0.06,
            x_factor: 0.85,
        };
        let moved = round_toe(&mut mesh, rule);
        assert!(moved > 0);
        for i in 0..mesh.vertex_count() {
            let (old, new) = (before.position(i), mesh.position(i));
            if old.z.abs() > 0.06 {
                assert_relative_eq!(new.x, old.x * 0.85, epsilon = 1e-6);
            } else {
                assert_eq!(new, old);
            }
        }
        assert!(mesh.bounds().size()[0] <= before.bounds().size()[0]);
        assert!(mesh.validate().is_ok());
    }
}
