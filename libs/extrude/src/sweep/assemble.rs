//! # Sweep Assembly
//!
//! Places copies of a cross-section along a path and stitches neighbours
//! together with convex hulls.
//!
//! ## Stitching
//!
//! For placed slices `s[0..n]`, slice `i < n - 1` becomes
//! `hull(union(s[i], s[i + 1]))` where `s[i + 1]` is the placed slice, not its
//! stitched replacement. The last slice stays as placed. The output therefore
//! has one solid per slice and the union of all of them is the swept body.
//!
//! Placement and stitching are independent per slice and run on the rayon
//! pool when the sweeper is parallel. The output order never depends on it.

use config::constants::{KernelConfig, FULL_REVOLUTION_DEGREES};
use csg_kernel::{BspEngine, MeshEngine, ParametricCurve, Solid, Transform};
use glam::DVec3;
use rayon::prelude::*;

use super::transforms::{
    bezier_to_transforms, curves_to_transforms, height_curve_for, BezierControls,
};
use crate::error::{ExtrudeError, ExtrudeResult};

/// Places and stitches sweep slices.
///
/// # Example
///
/// ```rust
/// use csg_kernel::Solid;
/// use glam::DVec3;
/// use polygon_extrude::sweep::Sweeper;
///
/// let slice = Solid::cuboid(DVec3::splat(-0.5), DVec3::splat(0.5)).unwrap();
/// let ring = Sweeper::default().revolve(&slice, 5.0, 8).unwrap();
/// assert_eq!(ring.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct Sweeper<E = BspEngine> {
    engine: E,
    parallel: bool,
}

impl<E> Sweeper<E> {
    /// Parallel sweeper over `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            parallel: true,
        }
    }

    /// Enables or disables the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns true if slices are processed on the rayon pool.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl Sweeper {
    /// Default engine, tuned by `config`.
    pub fn with_config(config: &KernelConfig) -> Self {
        Self::new(BspEngine::new(*config)).parallel(config.parallel_sweep)
    }
}

impl Default for Sweeper {
    fn default() -> Self {
        Self::with_config(&KernelConfig::default())
    }
}

impl<E: MeshEngine> Sweeper<E> {
    // =========================================================================
    // Placement
    // =========================================================================

    /// Applies transform `i` to copy `i`.
    ///
    /// The output has as many slices as the shorter of the two inputs.
    pub fn move_slices(
        &self,
        copies: &[Solid],
        transforms: &[Transform],
    ) -> ExtrudeResult<Vec<Solid>> {
        let place = |(copy, transform): (&Solid, &Transform)| -> ExtrudeResult<Solid> {
            Ok(copy.transformed(transform)?)
        };

        if self.parallel {
            copies.par_iter().zip(transforms.par_iter()).map(place).collect()
        } else {
            copies.iter().zip(transforms.iter()).map(place).collect()
        }
    }

    /// Places one copy of `slice` per transform.
    pub fn move_solid(&self, slice: &Solid, transforms: &[Transform]) -> ExtrudeResult<Vec<Solid>> {
        let copies = vec![slice.clone(); transforms.len()];
        self.move_slices(&copies, transforms)
    }

    /// Places `slice_count` copies of `slice` along bezier controls.
    pub fn move_bezier(
        &self,
        slice: &Solid,
        controls: &BezierControls,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.move_solid(slice, &bezier_to_transforms(controls, slice_count)?)
    }

    /// Places existing copies along bezier controls, one sample per copy.
    pub fn move_bezier_copies(
        &self,
        copies: &[Solid],
        controls: &BezierControls,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.move_slices(copies, &bezier_to_transforms(controls, copies.len())?)
    }

    /// Places `slice_count` copies of `slice` along a plan-view path.
    ///
    /// The height curve rises from the origin towards the path's end point,
    /// with both of its controls at the end.
    pub fn move_along_path<C>(
        &self,
        slice: &Solid,
        path: &C,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>>
    where
        C: ParametricCurve + ?Sized,
    {
        let height = height_curve_for(path);
        self.move_along_paths(slice, path, &height, slice_count)
    }

    /// Places `slice_count` copies of `slice` along a plan-view and a height
    /// curve.
    pub fn move_along_paths<A, B>(
        &self,
        slice: &Solid,
        path: &A,
        height: &B,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>>
    where
        A: ParametricCurve + ?Sized,
        B: ParametricCurve + ?Sized,
    {
        self.move_solid(slice, &curves_to_transforms(path, height, slice_count)?)
    }

    // =========================================================================
    // Stitching
    // =========================================================================

    /// Replaces every slice but the last with the hull of itself and its
    /// successor.
    pub fn stitch(&self, slices: Vec<Solid>) -> ExtrudeResult<Vec<Solid>> {
        let Some(last) = slices.last().cloned() else {
            return Ok(slices);
        };

        let bridge = |pair: &[Solid]| -> ExtrudeResult<Solid> {
            let joined = self.engine.union(&pair[0], &pair[1])?;
            Ok(self.engine.hull(&joined)?)
        };

        let mut stitched: Vec<Solid> = if self.parallel {
            slices.par_windows(2).map(bridge).collect::<ExtrudeResult<_>>()?
        } else {
            slices.windows(2).map(bridge).collect::<ExtrudeResult<_>>()?
        };
        stitched.push(last);

        tracing::debug!(slices = stitched.len(), "stitched sweep");
        Ok(stitched)
    }

    /// Places copies with transforms, then stitches them.
    pub fn sweep(&self, copies: &[Solid], transforms: &[Transform]) -> ExtrudeResult<Vec<Solid>> {
        self.stitch(self.move_slices(copies, transforms)?)
    }

    /// Stitched sweep of existing copies along bezier controls.
    pub fn sweep_bezier(
        &self,
        copies: &[Solid],
        controls: &BezierControls,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.stitch(self.move_bezier_copies(copies, controls)?)
    }

    /// Stitched sweep of `slice_count` copies of `slice` along bezier
    /// controls.
    pub fn sweep_bezier_solid(
        &self,
        slice: &Solid,
        controls: &BezierControls,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.stitch(self.move_bezier(slice, controls, slice_count)?)
    }

    /// Stitched sweep of existing copies along a straight path to `end`.
    pub fn sweep_linear(&self, copies: &[Solid], end: DVec3) -> ExtrudeResult<Vec<Solid>> {
        self.sweep_bezier(copies, &BezierControls::linear(end))
    }

    /// Stitched sweep of `slice_count` copies of `slice` along a straight
    /// path to `end`.
    pub fn sweep_linear_solid(
        &self,
        slice: &Solid,
        end: DVec3,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.sweep_bezier_solid(slice, &BezierControls::linear(end), slice_count)
    }

    // =========================================================================
    // Revolution
    // =========================================================================

    /// Full revolution of `slice` around Z at `radius`.
    pub fn revolve(
        &self,
        slice: &Solid,
        radius: f64,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>> {
        self.revolve_arc(slice, radius, FULL_REVOLUTION_DEGREES, slice_count)
    }

    /// Revolution of `slice` around Z over `arc_degrees`.
    ///
    /// The slice is moved out to `radius` along +Y and placed at
    /// `slice_count + 1` evenly spaced angles from 0 to `arc_degrees`
    /// inclusive, then stitched. Positive arcs turn clockwise seen from +Z.
    ///
    /// ## Errors
    ///
    /// `InvalidInput` for zero slices or a non-finite radius or arc.
    pub fn revolve_arc(
        &self,
        slice: &Solid,
        radius: f64,
        arc_degrees: f64,
        slice_count: usize,
    ) -> ExtrudeResult<Vec<Solid>> {
        if slice_count == 0 {
            return Err(ExtrudeError::invalid_input("slice count must be at least 1"));
        }
        if !radius.is_finite() || !arc_degrees.is_finite() {
            return Err(ExtrudeError::invalid_input(format!(
                "revolve radius and arc must be finite, got {radius} and {arc_degrees}"
            )));
        }

        let increment = arc_degrees / slice_count as f64;
        let transforms: Vec<Transform> = (0..=slice_count)
            .map(|k| {
                Transform::new()
                    .rot_z(-(k as f64) * increment)
                    .translate(DVec3::new(0.0, radius, 0.0))
            })
            .collect();

        self.sweep(&vec![slice.clone(); transforms.len()], &transforms)
    }
}
