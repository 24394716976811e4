//! # Polygon
//!
//! Planar polygon with a cached plane, BSP splitting support and an opaque
//! storage payload that follows the polygon through every derived copy.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use glam::{DMat4, DVec3};

use super::plane::{Classification, Plane};
use super::vertex::Vertex;
use crate::error::{CsgError, CsgResult};

// =============================================================================
// STORAGE
// =============================================================================

/// Opaque, shared payload attached to a polygon.
///
/// The kernel never inspects the payload; it is cloned (by reference count)
/// into every polygon derived from the original: translated and flipped
/// copies, BSP fragments, tessellated pieces and extrusion walls.
///
/// # Example
///
/// ```rust
/// use csg_kernel::Storage;
///
/// let storage = Storage::new("bracket");
/// assert_eq!(storage.get::<&str>(), Some(&"bracket"));
/// assert!(Storage::default().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Storage(Option<Arc<dyn Any + Send + Sync>>);

impl Storage {
    /// Wraps a value as polygon storage.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Returns true if no payload is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Downcasts the payload.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns true if both handles point at the same payload.
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Storage(..)"),
            None => f.write_str("Storage(empty)"),
        }
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// A planar polygon, implicitly closed.
///
/// ## Invariants
///
/// - At least 3 vertices
/// - `plane` agrees with the vertex winding (counter-clockwise seen from the
///   front of the plane)
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    plane: Plane,
    storage: Storage,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Vertices with a zero normal attribute receive the plane normal.
    ///
    /// # Errors
    ///
    /// Fails when fewer than 3 vertices are given or the vertices enclose no
    /// area.
    pub fn new(vertices: Vec<Vertex>, storage: Storage) -> CsgResult<Self> {
        if vertices.len() < 3 {
            return Err(CsgError::invalid_polygon(format!(
                "only polygons with at least 3 vertices are supported, got {}",
                vertices.len()
            )));
        }

        let positions: Vec<DVec3> = vertices.iter().map(|v| v.pos).collect();
        let plane = Plane::from_loop(&positions)
            .ok_or_else(|| CsgError::invalid_polygon("vertices enclose no area"))?;

        let vertices = vertices
            .into_iter()
            .map(|v| {
                if v.normal == DVec3::ZERO {
                    Vertex::new(v.pos, plane.normal())
                } else {
                    v
                }
            })
            .collect();

        Ok(Self {
            vertices,
            plane,
            storage,
        })
    }

    /// Create polygon from positions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use csg_kernel::Polygon;
    /// use glam::DVec3;
    ///
    /// let triangle = Polygon::from_points(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
    /// assert_eq!(triangle.len(), 3);
    /// assert!(triangle.plane().normal().z > 0.0);
    /// ```
    pub fn from_points(points: &[DVec3]) -> CsgResult<Self> {
        Self::from_points_with_storage(points, Storage::default())
    }

    /// Create polygon from positions carrying the given storage.
    pub fn from_points_with_storage(points: &[DVec3], storage: Storage) -> CsgResult<Self> {
        Self::new(points.iter().copied().map(Vertex::at).collect(), storage)
    }

    /// Builds a polygon without recomputing the plane. Used by splitting,
    /// where fragments inherit the parent plane.
    fn with_plane(vertices: Vec<Vertex>, plane: Plane, storage: Storage) -> Self {
        Self {
            vertices,
            plane,
            storage,
        }
    }

    /// Get polygon vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex positions in order.
    pub fn positions(&self) -> Vec<DVec3> {
        self.vertices.iter().map(|v| v.pos).collect()
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false for a constructed polygon; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get polygon plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Get the storage payload.
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Polygon {
        let vertices = self.vertices.iter().map(|v| v.translated(offset)).collect();
        let plane = Plane::new(self.plane.normal(), self.plane.w() + self.plane.normal().dot(offset));
        Polygon::with_plane(vertices, plane, self.storage.clone())
    }

    /// Returns a copy with reversed winding and inverted normal.
    pub fn flipped(&self) -> Polygon {
        let mut copy = self.clone();
        copy.flip();
        copy
    }

    /// Reverses winding and normal in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            *v = v.flipped();
        }
        self.plane = self.plane.flipped();
    }

    /// Returns a copy with an affine matrix applied.
    ///
    /// Mirroring matrices (negative determinant) would turn the polygon
    /// inside out, so the winding is reversed to keep the normal outward.
    pub fn transformed(&self, matrix: &DMat4) -> CsgResult<Polygon> {
        let normal_matrix = matrix.inverse().transpose();
        let mut vertices: Vec<Vertex> = self
            .vertices
            .iter()
            .map(|v| v.transformed(matrix, &normal_matrix))
            .collect();
        if matrix.determinant() < 0.0 {
            vertices.reverse();
        }
        Polygon::new(vertices, self.storage.clone())
    }

    /// Returns true if every corner turns the same way as the plane normal.
    pub fn is_convex(&self, tolerance: f64) -> bool {
        let n = self.vertices.len();
        let normal = self.plane.normal();
        (0..n).all(|i| {
            let prev = self.vertices[(i + n - 1) % n].pos;
            let current = self.vertices[i].pos;
            let next = self.vertices[(i + 1) % n].pos;
            (current - prev).cross(next - current).dot(normal) >= -tolerance
        })
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;

        for v in &self.vertices {
            match plane.classify_point(v.pos) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }

        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Split polygon by a plane.
    ///
    /// ## Parameters
    ///
    /// - `plane`: Splitting plane
    /// - `coplanar_front`: Output for coplanar polygons facing same direction
    /// - `coplanar_back`: Output for coplanar polygons facing opposite direction
    /// - `front`: Output for polygons in front of plane
    /// - `back`: Output for polygons behind plane
    pub fn split(
        &self,
        plane: &Plane,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    coplanar_front.push(self.clone());
                } else {
                    coplanar_back.push(self.clone());
                }
            }
            Classification::Front => front.push(self.clone()),
            Classification::Back => back.push(self.clone()),
            Classification::Spanning => {
                let mut front_verts = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_verts = Vec::with_capacity(self.vertices.len() + 1);

                for i in 0..self.vertices.len() {
                    let j = (i + 1) % self.vertices.len();
                    let vi = &self.vertices[i];
                    let vj = &self.vertices[j];

                    let ti = plane.classify_point(vi.pos);
                    let tj = plane.classify_point(vj.pos);

                    if ti != Classification::Back {
                        front_verts.push(*vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(*vi);
                    }

                    // Edge crosses the plane: both halves get the intersection.
                    if (ti == Classification::Front && tj == Classification::Back)
                        || (ti == Classification::Back && tj == Classification::Front)
                    {
                        let di = plane.signed_distance(vi.pos);
                        let dj = plane.signed_distance(vj.pos);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if front_verts.len() >= 3 {
                    front.push(Polygon::with_plane(front_verts, self.plane, self.storage.clone()));
                }
                if back_verts.len() >= 3 {
                    back.push(Polygon::with_plane(back_verts, self.plane, self.storage.clone()));
                }
            }
        }
    }
}
