//! # Vertex
//!
//! Polygon vertex: a position plus an interpolated normal attribute.

use glam::{DMat4, DVec3};

// =============================================================================
// VERTEX
// =============================================================================

/// A polygon vertex.
///
/// The normal is a per-vertex attribute. It is interpolated when BSP splits
/// create new vertices and negated when a polygon is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position.
    pub pos: DVec3,
    /// Normal attribute.
    pub normal: DVec3,
}

impl Vertex {
    /// Create new vertex.
    ///
    /// ## Parameters
    ///
    /// - `pos`: Position
    /// - `normal`: Normal attribute
    pub fn new(pos: DVec3, normal: DVec3) -> Self {
        Self { pos, normal }
    }

    /// Create a vertex with a zero normal attribute.
    pub fn at(pos: DVec3) -> Self {
        Self {
            pos,
            normal: DVec3::ZERO,
        }
    }

    /// Linear interpolation between two vertices.
    ///
    /// ## Parameters
    ///
    /// - `other`: Target vertex
    /// - `t`: Interpolation factor (0.0 = self, 1.0 = other)
    pub fn lerp(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            pos: self.pos.lerp(other.pos, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }

    /// Returns the vertex with its normal negated.
    pub fn flipped(&self) -> Vertex {
        Vertex {
            pos: self.pos,
            normal: -self.normal,
        }
    }

    /// Returns the vertex moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Vertex {
        Vertex {
            pos: self.pos + offset,
            normal: self.normal,
        }
    }

    /// Applies an affine matrix to the position and its inverse transpose to
    /// the normal.
    pub fn transformed(&self, matrix: &DMat4, normal_matrix: &DMat4) -> Vertex {
        Vertex {
            pos: matrix.transform_point3(self.pos),
            normal: normal_matrix.transform_vector3(self.normal).normalize_or_zero(),
        }
    }
}
