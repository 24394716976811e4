//! # Solid
//!
//! Boundary representation as a list of planar, outward-facing polygons.

use glam::DVec3;

use crate::error::CsgResult;
use crate::geometry::{Polygon, Storage, Vertex};
use crate::mesh::Mesh;
use crate::transform::Transform;

/// A solid bounded by planar polygons.
///
/// Solids are values: every operation returns a new solid.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    /// Solid with no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a solid from its boundary polygons.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Builds a solid from a triangle mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::from_mesh_with_storage(mesh, Storage::default())
    }

    /// Builds a solid from a triangle mesh, attaching `storage` to every face.
    ///
    /// Zero-area triangles are skipped.
    pub fn from_mesh_with_storage(mesh: &Mesh, storage: Storage) -> Self {
        let polygons = (0..mesh.triangle_count())
            .filter_map(|i| {
                Polygon::from_points_with_storage(&mesh.triangle_positions(i), storage.clone()).ok()
            })
            .collect();
        Self { polygons }
    }

    /// Axis-aligned box between two corners.
    pub fn cuboid(min: DVec3, max: DVec3) -> CsgResult<Self> {
        Self::cuboid_with_storage(min, max, Storage::default())
    }

    /// Axis-aligned box between two corners with storage on every face.
    pub fn cuboid_with_storage(min: DVec3, max: DVec3, storage: Storage) -> CsgResult<Self> {
        let corner = |i: usize| {
            DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        };
        // Corner indices per face, counter-clockwise seen from outside.
        const FACES: [[usize; 4]; 6] = [
            [0, 4, 6, 2],
            [1, 3, 7, 5],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 2, 3, 1],
            [4, 5, 7, 6],
        ];

        let polygons = FACES
            .iter()
            .map(|face| Polygon::from_points_with_storage(&face.map(corner), storage.clone()))
            .collect::<CsgResult<Vec<_>>>()?;
        Ok(Self { polygons })
    }

    /// Boundary polygons.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.polygons.len()
    }

    /// Returns true if the solid has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns true if every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.polygons
            .iter()
            .all(|polygon| polygon.vertices().iter().all(|v| v.pos.is_finite()))
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed solid with outward-facing polygons.
    pub fn volume(&self) -> f64 {
        let mut sum = 0.0;
        for polygon in &self.polygons {
            let vertices = polygon.vertices();
            let origin = vertices[0].pos;
            for pair in vertices[1..].windows(2) {
                sum += origin.dot(pair[0].pos.cross(pair[1].pos));
            }
        }
        sum / 6.0
    }

    /// Axis-aligned bounding box, `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut positions = self
            .polygons
            .iter()
            .flat_map(|polygon| polygon.vertices().iter().map(|v| v.pos));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Returns a transformed copy.
    ///
    /// # Errors
    ///
    /// Fails if the transform collapses a face to zero area.
    pub fn transformed(&self, transform: &Transform) -> CsgResult<Solid> {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| polygon.transformed(transform.matrix()))
            .collect::<CsgResult<Vec<_>>>()?;
        Ok(Self { polygons })
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Solid {
        Self {
            polygons: self.polygons.iter().map(|p| p.translated(offset)).collect(),
        }
    }

    /// Returns a copy turned inside out.
    pub fn inverted(&self) -> Solid {
        Self {
            polygons: self.polygons.iter().map(Polygon::flipped).collect(),
        }
    }

    /// Fan-triangulates every face into an indexed mesh with vertex normals.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_total: usize = self.polygons.iter().map(Polygon::len).sum();
        let triangle_total = vertex_total.saturating_sub(2 * self.polygons.len());
        let mut mesh = Mesh::with_capacity(vertex_total, triangle_total);

        for polygon in &self.polygons {
            let indices: Vec<u32> = polygon
                .vertices()
                .iter()
                .map(|Vertex { pos, .. }| mesh.add_vertex(*pos))
                .collect();
            for pair in indices[1..].windows(2) {
                mesh.add_triangle(indices[0], pair[0], pair[1]);
            }
        }

        mesh.compute_normals();
        mesh
    }
}
