//! Checks that a garment shell stays outside the body part it covers.
//!
//! Revolved pairs are compared radius against radius at equal `t` on the
//! union of both sample grids. Shoes are compared against bare feet by
//! half-width along the foot, after toe rounding. The waistband has no
//! same-`t` counterpart on the torso and is not checked.

use fit_kernel::BreakpointTable;
use fit_types::{Measurements, Slot};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::config::FitConfig;
use crate::error::FitError;
use crate::scale::ScaleFactors;
use crate::tables::{FootBox, Segment, BARE_FOOT, SHOE};

/// Which measurement of the two shapes a coverage sample compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Lathe radius at `t`.
    Radius,
    /// Box half-width at `t` along the foot.
    HalfWidth,
    /// Box half-length, toe to heel.
    HalfDepth,
    /// Box half-height.
    HalfHeight,
}

/// One sample where the garment lies inside the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageGap {
    pub garment: &'static str,
    pub body: &'static str,
    pub extent: Extent,
    /// Profile parameter of the sample; `None` for whole-box extents.
    pub t: Option<f64>,
    pub garment_extent: f64,
    pub body_extent: f64,
}

impl CoverageGap {
    pub fn depth(&self) -> f64 {
        self.body_extent - self.garment_extent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub slot: Slot,
    /// Number of sample points compared.
    pub checked: usize,
    pub gaps: Vec<CoverageGap>,
}

impl CoverageReport {
    pub fn is_covered(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn worst_gap(&self) -> Option<&CoverageGap> {
        self.gaps
            .iter()
            .max_by(|a, b| a.depth().total_cmp(&b.depth()))
    }
}

/// The (garment, body) segment pairs compared for a slot.
pub fn covered_segments(slot: Slot) -> &'static [(Segment, Segment)] {
    match slot {
        Slot::Top => &[
            (Segment::TopBody, Segment::Torso),
            (Segment::Sleeve, Segment::UpperArm),
        ],
        Slot::Bottom => &[(Segment::PantLeg, Segment::Leg)],
        Slot::Shoes => &[],
    }
}

#[instrument(skip(config))]
pub fn coverage_report(
    slot: Slot,
    m: &Measurements,
    config: &FitConfig,
) -> Result<CoverageReport, FitError> {
    let s = config.scale_resolver()?.resolve(m);
    let mut report = CoverageReport {
        slot,
        checked: 0,
        gaps: Vec::new(),
    };

    for &(garment, body) in covered_segments(slot) {
        compare_segments(garment, body, &s, config, &mut report)?;
    }
    if slot == Slot::Shoes {
        compare_feet(&SHOE, &BARE_FOOT, &mut report);
    }

    if let Some(gap) = report.worst_gap() {
        warn!(
            %slot,
            gaps = report.gaps.len(),
            garment = gap.garment,
            extent = ?gap.extent,
            t = ?gap.t,
            depth = gap.depth(),
            "garment dips inside the body"
        );
    }
    Ok(report)
}

fn compare_segments(
    garment: Segment,
    body: Segment,
    s: &ScaleFactors,
    config: &FitConfig,
    report: &mut CoverageReport,
) -> Result<(), FitError> {
    let outer = BreakpointTable::new(garment.label(), garment.breakpoints(s))?;
    let inner = BreakpointTable::new(body.label(), body.breakpoints(s))?;

    let mut ts: Vec<f64> = [garment, body]
        .iter()
        .flat_map(|seg| {
            let n = config.profile_samples(*seg);
            (0..=n).map(move |i| i as f64 / n as f64)
        })
        .collect();
    ts.sort_by(f64::total_cmp);
    ts.dedup();

    for t in ts {
        let (g, b) = (outer.radius_at(t), inner.radius_at(t));
        report.checked += 1;
        if g < b {
            report.gaps.push(CoverageGap {
                garment: garment.label(),
                body: body.label(),
                extent: Extent::Radius,
                t: Some(t),
                garment_extent: g,
                body_extent: b,
            });
        }
    }
    Ok(())
}

/// Half-width samples run `t` from the box centre (`0`) to the foot's
/// toe (`1`).
fn compare_feet(shoe: &FootBox, foot: &FootBox, report: &mut CoverageReport) {
    const STEPS: usize = 20;
    let mut push = |extent: Extent, t: Option<f64>, g: f64, b: f64| {
        report.checked += 1;
        if g < b {
            report.gaps.push(CoverageGap {
                garment: "shoe",
                body: "foot",
                extent,
                t,
                garment_extent: g,
                body_extent: b,
            });
        }
    };

    push(Extent::HalfDepth, None, shoe.depth / 2.0, foot.depth / 2.0);
    push(Extent::HalfHeight, None, shoe.height / 2.0, foot.height / 2.0);
    for i in 0..=STEPS {
        let t = i as f64 / STEPS as f64;
        let z = t * foot.depth / 2.0;
        push(
            Extent::HalfWidth,
            Some(t),
            shoe.half_width_at(z),
            foot.half_width_at(z),
        );
    }
}
