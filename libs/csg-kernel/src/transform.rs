//! # Transform
//!
//! Affine transforms built by chaining translations and rotations.
//!
//! Every builder call post-multiplies, so `Transform::new().translate(p).rot_z(a)`
//! rotates about the origin first and then moves the result to `p`.

use glam::{DMat4, DVec3};

/// An affine transform.
///
/// # Example
///
/// ```rust
/// use csg_kernel::Transform;
/// use glam::DVec3;
///
/// let t = Transform::new().translate(DVec3::new(1.0, 0.0, 0.0)).rot_z(90.0);
/// let p = t.transform_point(DVec3::new(1.0, 0.0, 0.0));
/// assert!((p - DVec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self {
            matrix: DMat4::IDENTITY,
        }
    }

    /// Wraps an existing matrix.
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// Appends a translation.
    pub fn translate(self, offset: DVec3) -> Self {
        self.then(DMat4::from_translation(offset))
    }

    /// Appends a rotation about the X axis, in degrees.
    pub fn rot_x(self, degrees: f64) -> Self {
        self.then(DMat4::from_rotation_x(degrees.to_radians()))
    }

    /// Appends a rotation about the Y axis, in degrees.
    pub fn rot_y(self, degrees: f64) -> Self {
        self.then(DMat4::from_rotation_y(degrees.to_radians()))
    }

    /// Appends a rotation about the Z axis, in degrees.
    pub fn rot_z(self, degrees: f64) -> Self {
        self.then(DMat4::from_rotation_z(degrees.to_radians()))
    }

    /// Appends an arbitrary matrix.
    pub fn then(self, matrix: DMat4) -> Self {
        Self {
            matrix: self.matrix * matrix,
        }
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    /// Applies the transform to a point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix.transform_point3(point)
    }

    /// Translation part of the transform.
    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }

    /// Returns true if the transform mirrors space.
    pub fn is_mirror(&self) -> bool {
        self.matrix.determinant() < 0.0
    }
}
