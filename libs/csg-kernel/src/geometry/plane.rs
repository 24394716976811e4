//! # Plane
//!
//! Plane representation with point classification for BSP operations.

use config::constants::PLANE_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Polygon has vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane defined by unit normal and distance from origin.
///
/// The plane equation is `dot(normal, p) = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Create plane from normal and distance. The normal is normalized.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            w,
        }
    }

    /// Create plane from three points in counter-clockwise order.
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length() < PLANE_EPSILON * PLANE_EPSILON {
            return None;
        }
        let normal = normal.normalize();
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Create the best-fit plane of a closed loop using Newell's method.
    ///
    /// Unlike [`Plane::from_points`] this is correct for concave loops whose
    /// first corner is reflex. Returns `None` when the loop has no area.
    pub fn from_loop(points: &[DVec3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let mut normal = DVec3::ZERO;
        let mut centroid = DVec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
            centroid += *current;
        }

        if !normal.is_finite() || normal.length() < PLANE_EPSILON * PLANE_EPSILON {
            return None;
        }
        let normal = normal.normalize();
        let centroid = centroid / points.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    /// Get the plane normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Get the plane distance.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Flip the plane (reverse normal).
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            Classification::Front
        } else if dist < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}
