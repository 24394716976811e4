//! # Sweeps
//!
//! Moving a cross-section along curves: [`transforms`] samples curves into
//! slice placements and [`assemble`] places and stitches the slices.

pub mod assemble;
pub mod transforms;


pub use assemble::Sweeper;
pub use transforms::{
    bezier_to_transforms, curves_to_frames, curves_to_transforms, height_curve_for,
    sample_parameters, BezierControls, SweepFrame,
};
