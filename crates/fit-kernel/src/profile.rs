use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{require_positive, KernelError};

/// A fixed `(t, radius)` control point of a radius profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Normalised position along the profile, `0` at the bottom, `1` at the top.
    pub t: f64,
    pub radius: f64,
}

impl Breakpoint {
    pub const fn new(t: f64, radius: f64) -> Self {
        Self { t, radius }
    }
}

/// A validated, ordered breakpoint table.
///
/// The table starts at `t = 0`, ends at `t = 1` and never decreases in `t`.
/// Two consecutive entries with the same `t` form a step: the later radius
/// applies from that `t` onward.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    points: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new(label: &str, points: impl Into<Vec<Breakpoint>>) -> Result<Self, KernelError> {
        let points = points.into();
        let invalid = |reason: String| Err(KernelError::invalid_profile(label, reason));

        if points.len() < 2 {
            return invalid(format!("{} breakpoints, need at least 2", points.len()));
        }
        for (i, bp) in points.iter().enumerate() {
            if !(0.0..=1.0).contains(&bp.t) {
                return invalid(format!("breakpoint {i} has t = {} outside [0, 1]", bp.t));
            }
            if !(bp.radius.is_finite() && bp.radius >= 0.0) {
                return invalid(format!("breakpoint {i} has radius {}", bp.radius));
            }
        }
        if let Some(i) = points.windows(2).position(|w| w[1].t < w[0].t) {
            return invalid(format!("breakpoint t decreases after index {i}"));
        }
        if points[0].t != 0.0 || points[points.len() - 1].t != 1.0 {
            return invalid("table must start at t = 0 and end at t = 1".to_string());
        }
        if points[1].t == 0.0 {
            return invalid("step at t = 0 would hide the first breakpoint".to_string());
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Radius at `t`, linearly interpolated between the bracketing
    /// breakpoints. `t` is clamped to `[0, 1]`; the ends return the first and
    /// last breakpoint radius exactly.
    pub fn radius_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let idx = self.points.iter().rposition(|bp| bp.t <= t).unwrap_or(0);
        let current = self.points[idx];
        match self.points.get(idx + 1) {
            Some(next) => {
                let u = (t - current.t) / (next.t - current.t);
                lerp(current.radius, next.radius, u)
            }
            None => current.radius,
        }
    }

    /// The bands `[start, end)` between consecutive breakpoints, skipping
    /// zero-width steps.
    pub fn bands(&self) -> impl Iterator<Item = (Breakpoint, Breakpoint)> + '_ {
        self.points
            .windows(2)
            .filter(|w| w[1].t > w[0].t)
            .map(|w| (w[0], w[1]))
    }
}

fn lerp(a: f64, b: f64, u: f64) -> f64 {
    a + (b - a) * u
}

/// One sample of a radius-vs-height profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub radius: f64,
    pub y: f64,
}

/// Ordered `(radius, y)` samples with strictly increasing `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    label: String,
    samples: Vec<ProfileSample>,
}

impl Profile {
    /// Wrap explicit samples, checking ordering and radii. Length is not
    /// checked here; consumers state their own minimum.
    pub fn from_samples(
        label: &str,
        samples: impl Into<Vec<ProfileSample>>,
    ) -> Result<Self, KernelError> {
        let samples = samples.into();
        if let Some(i) = samples
            .iter()
            .position(|s| !(s.radius.is_finite() && s.radius >= 0.0 && s.y.is_finite()))
        {
            return Err(KernelError::invalid_profile(
                label,
                format!("sample {i} is not a finite point with radius >= 0"),
            ));
        }
        if let Some(i) = samples.windows(2).position(|w| w[1].y <= w[0].y) {
            return Err(KernelError::invalid_profile(
                label,
                format!("y does not increase after sample {i}"),
            ));
        }
        Ok(Self {
            label: label.to_string(),
            samples,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_radius(&self) -> f64 {
        self.samples.iter().map(|s| s.radius).fold(0.0, f64::max)
    }

    /// Distance between the lowest and highest sample.
    pub fn height(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.y - first.y,
            _ => 0.0,
        }
    }
}

/// Sample a breakpoint table into a profile centred on its local origin.
///
/// Produces `samples + 1` points at `t = i / samples` with
/// `y = height * (t - 0.5)`.
#[instrument(skip(breakpoints), fields(breakpoints = breakpoints.len()))]
pub fn build_profile(
    label: &str,
    samples: usize,
    height: f64,
    breakpoints: &[Breakpoint],
) -> Result<Profile, KernelError> {
    if samples == 0 {
        return Err(KernelError::invalid_profile(label, "sample count must be at least 1"));
    }
    require_positive("profile height", height)?;
    let table = BreakpointTable::new(label, breakpoints)?;

    let points: Vec<ProfileSample> = (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            ProfileSample {
                radius: table.radius_at(t),
                y: height * (t - 0.5),
            }
        })
        .collect();

    debug!(samples = points.len(), "built profile");
    Ok(Profile {
        label: label.to_string(),
        samples: points,
    })
}
