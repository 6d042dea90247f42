use std::f64::consts::TAU;

use tracing::{debug, instrument};

use crate::error::{require_segments, KernelError};
use crate::geometry::{Point3d, Vec3};
use crate::mesh::TriangleMesh;
use crate::profile::Profile;

/// Outward normal of the profile curve at sample `i`, in the (radius, y)
/// half-plane. Uses a central difference away from the ends.
fn profile_normal(profile: &Profile, i: usize) -> (f64, f64) {
    let s = profile.samples();
    let prev = s[i.saturating_sub(1)];
    let next = s[(i + 1).min(s.len() - 1)];
    let dr = next.radius - prev.radius;
    let dy = next.y - prev.y;
    let len = (dr * dr + dy * dy).sqrt();
    if len < 1e-15 {
        (1.0, 0.0)
    } else {
        (dy / len, -dr / len)
    }
}

/// Sweep a radius profile a full turn around the +Y axis.
///
/// Ring `j` sits at angle `θ = 2π·j / segments` and maps sample `(r, y)` to
/// `(r·sinθ, y, r·cosθ)`. The seam ring is duplicated. Normals are smooth,
/// taken from the swept profile tangent. An end with non-zero radius gets a
/// flat cap; an end on the axis already closes the solid.
#[instrument(skip(profile), fields(label = profile.label(), samples = profile.len()))]
pub fn revolve_profile(profile: &Profile, segments: usize) -> Result<TriangleMesh, KernelError> {
    let n = profile.len();
    if n < 2 {
        return Err(KernelError::InvalidProfile {
            label: profile.label().to_string(),
            reason: format!("profile has {n} samples, need at least 2"),
        });
    }
    require_segments(3, segments)?;

    let samples = profile.samples();
    let normals2d: Vec<(f64, f64)> = (0..n).map(|i| profile_normal(profile, i)).collect();
    let mut mesh = TriangleMesh::new();

    for j in 0..=segments {
        let theta = TAU * j as f64 / segments as f64;
        let (sin, cos) = theta.sin_cos();
        for (sample, &(nr, ny)) in samples.iter().zip(&normals2d) {
            mesh.add_vertex(
                Point3d::new(sample.radius * sin, sample.y, sample.radius * cos),
                Vec3::new(nr * sin, ny, nr * cos),
            );
        }
    }

    let ring = n as u32;
    for j in 0..segments as u32 {
        for i in 0..ring - 1 {
            let a = j * ring + i;
            let b = (j + 1) * ring + i;
            let c = (j + 1) * ring + i + 1;
            let d = j * ring + i + 1;
            // Triangles touching the axis collapse; skip them.
            if samples[i as usize].radius > 0.0 {
                mesh.add_triangle(a, b, d);
            }
            if samples[i as usize + 1].radius > 0.0 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    let first = samples[0];
    let last = samples[n - 1];
    if first.radius > 0.0 {
        add_cap(&mut mesh, first.radius, first.y, segments, false);
    }
    if last.radius > 0.0 {
        add_cap(&mut mesh, last.radius, last.y, segments, true);
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "revolved profile"
    );
    Ok(mesh)
}

/// Flat disc at height `y`. The top cap faces +Y, the bottom cap -Y.
fn add_cap(mesh: &mut TriangleMesh, radius: f64, y: f64, segments: usize, top: bool) {
    let normal = if top { Vec3::Y } else { -Vec3::Y };
    let center = mesh.add_vertex(Point3d::new(0.0, y, 0.0), normal);
    let rim: Vec<u32> = (0..=segments)
        .map(|j| {
            let (sin, cos) = (TAU * j as f64 / segments as f64).sin_cos();
            mesh.add_vertex(Point3d::new(radius * sin, y, radius * cos), normal)
        })
        .collect();
    for w in rim.windows(2) {
        if top {
            mesh.add_triangle(center, w[0], w[1]);
        } else {
            mesh.add_triangle(center, w[1], w[0]);
        }
    }
}
