//! # Sweep Transforms
//!
//! Samples two curves into a sequence of position and orientation frames.
//!
//! ## Coordinate Mapping
//!
//! Both curves are read in their XY output. A sample's position is
//! `(a.x, a.y, b.y)`: the first curve draws the plan view and the *y* output of
//! the second curve is the height. The second curve's x and z outputs are
//! ignored. Control-triple entry points ([`BezierControls`]) build the second
//! curve from the z components, so for them the mapping reads naturally;
//! callers passing arbitrary curves should keep it in mind.
//!
//! ## Sampling
//!
//! For `n` slices the parameters are `(k + 0.01) / (n - 1)` for
//! `k = 0..n - 1`, then a final `0.99999`. Neither end of the curve is sampled
//! exactly.
//!
//! ## Orientation
//!
//! Each frame is oriented along the finite difference from the previous sample
//! (from the origin for the first one): `yaw` turns +X towards the tangent's
//! heading around Z, `pitch` then lifts it towards the tangent's rise.

use config::constants::{SWEEP_FINAL_PARAMETER, SWEEP_SAMPLE_OFFSET};
use csg_kernel::{CubicBezier, ParametricCurve, Transform};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult};

/// Position and heading of one sweep slice.
///
/// Angles are in degrees, counter-clockwise positive (right-hand rule).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepFrame {
    /// Where the slice's origin lands.
    pub position: DVec3,
    /// Heading in the XY plane, measured from +X towards +Y.
    pub yaw: f64,
    /// Elevation above the XY plane.
    pub pitch: f64,
}

impl SweepFrame {
    /// Frame oriented along the step from `previous` to `position`.
    pub fn between(previous: DVec3, position: DVec3) -> Self {
        let delta = position - previous;
        let run = (delta.x * delta.x + delta.y * delta.y).sqrt();

        Self {
            position,
            yaw: 90.0 - delta.x.atan2(delta.y).to_degrees(),
            pitch: delta.z.atan2(run).to_degrees(),
        }
    }

    /// Transform placing a slice built around the origin into this frame.
    ///
    /// The slice's +X axis ends up along the frame's tangent.
    pub fn to_transform(&self) -> Transform {
        Transform::new()
            .translate(self.position)
            .rot_z(self.yaw)
            .rot_y(-self.pitch)
    }

    /// Direction the slice's +X axis points in.
    pub fn tangent(&self) -> DVec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        DVec3::new(yaw_cos * pitch_cos, yaw_sin * pitch_cos, pitch_sin)
    }
}

/// Curve parameters sampled for `slice_count` slices.
///
/// ## Errors
///
/// `InvalidInput` for zero slices.
///
/// # Example
///
/// ```rust
/// use polygon_extrude::sweep::sample_parameters;
///
/// let t = sample_parameters(3).unwrap();
/// assert_eq!(t.len(), 3);
/// assert!((t[1] - 0.505).abs() < 1e-12);
/// assert_eq!(t[2], 0.99999);
/// ```
pub fn sample_parameters(slice_count: usize) -> ExtrudeResult<Vec<f64>> {
    if slice_count == 0 {
        return Err(ExtrudeError::invalid_input("slice count must be at least 1"));
    }

    let span = (slice_count - 1) as f64;
    let mut parameters: Vec<f64> = (0..slice_count - 1)
        .map(|k| (k as f64 + SWEEP_SAMPLE_OFFSET) / span)
        .collect();
    parameters.push(SWEEP_FINAL_PARAMETER);
    Ok(parameters)
}

/// Samples two curves into `slice_count` frames.
///
/// See the module docs for how the two curves combine into positions.
pub fn curves_to_frames<A, B>(
    curve_a: &A,
    curve_b: &B,
    slice_count: usize,
) -> ExtrudeResult<Vec<SweepFrame>>
where
    A: ParametricCurve + ?Sized,
    B: ParametricCurve + ?Sized,
{
    let parameters = sample_parameters(slice_count)?;

    let mut previous = DVec3::ZERO;
    let frames = parameters
        .into_iter()
        .map(|t| {
            let a = curve_a.evaluate(t);
            let b = curve_b.evaluate(t);
            let frame = SweepFrame::between(previous, DVec3::new(a.x, a.y, b.y));
            previous = frame.position;
            frame
        })
        .collect();

    Ok(frames)
}

/// Samples two curves into `slice_count` slice transforms.
///
/// # Example
///
/// ```rust
/// use csg_kernel::CubicBezier;
/// use glam::DVec3;
/// use polygon_extrude::sweep::curves_to_transforms;
///
/// let line = CubicBezier::line(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
/// let flat = CubicBezier::line(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0));
/// let transforms = curves_to_transforms(&line, &flat, 5).unwrap();
/// assert_eq!(transforms.len(), 5);
/// ```
pub fn curves_to_transforms<A, B>(
    curve_a: &A,
    curve_b: &B,
    slice_count: usize,
) -> ExtrudeResult<Vec<Transform>>
where
    A: ParametricCurve + ?Sized,
    B: ParametricCurve + ?Sized,
{
    Ok(curves_to_frames(curve_a, curve_b, slice_count)?
        .iter()
        .map(SweepFrame::to_transform)
        .collect())
}

/// A sweep path given as bezier controls, starting at the origin.
///
/// The plan-view curve is built from the x and y components and the height
/// curve from the x and z components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierControls {
    /// First control point.
    pub control_a: DVec3,
    /// Second control point.
    pub control_b: DVec3,
    /// End point.
    pub end: DVec3,
}

impl BezierControls {
    /// Controls from their three points.
    pub fn new(control_a: DVec3, control_b: DVec3, end: DVec3) -> Self {
        Self {
            control_a,
            control_b,
            end,
        }
    }

    /// Straight path to `end`: the first control sits at the origin, the
    /// second on the end point.
    pub fn linear(end: DVec3) -> Self {
        Self::new(DVec3::ZERO, end, end)
    }

    /// The plan-view and height curves.
    pub fn curves(&self) -> (CubicBezier, CubicBezier) {
        let plan = |p: DVec3| DVec3::new(p.x, p.y, 0.0);
        let height = |p: DVec3| DVec3::new(p.x, p.z, 0.0);

        (
            CubicBezier::new(
                DVec3::ZERO,
                plan(self.control_a),
                plan(self.control_b),
                plan(self.end),
            ),
            CubicBezier::new(
                DVec3::ZERO,
                height(self.control_a),
                height(self.control_b),
                height(self.end),
            ),
        )
    }
}

/// Samples bezier controls into `slice_count` slice transforms.
pub fn bezier_to_transforms(
    controls: &BezierControls,
    slice_count: usize,
) -> ExtrudeResult<Vec<Transform>> {
    let (plan, height) = controls.curves();
    curves_to_transforms(&plan, &height, slice_count)
}

/// Height curve for a single plan-view path: rises from the origin to the
/// path's end point, with both controls on the end point side.
pub fn height_curve_for<C: ParametricCurve + ?Sized>(path: &C) -> CubicBezier {
    let end = path.evaluate(1.0);
    let end = DVec3::new(end.x, end.y, 0.0);
    CubicBezier::new(DVec3::ZERO, DVec3::ZERO, end, end)
}
