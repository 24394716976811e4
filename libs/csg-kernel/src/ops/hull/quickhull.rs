//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points
//!
//! Ordered collections keep the output deterministic for identical input.

use std::collections::{BTreeMap, BTreeSet};

use config::constants::{EPSILON, HULL_MIN_POINTS, VERTEX_MERGE_EPSILON};
use glam::DVec3;

use crate::error::{CsgError, CsgResult};
use crate::mesh::Mesh;

/// Computes the convex hull of a set of 3D points.
///
/// ## Parameters
///
/// - `points`: Points to compute hull of (at least 4 non-coplanar)
///
/// ## Returns
///
/// A closed triangle mesh with outward-facing triangles.
///
/// # Example
///
/// ```rust
/// use csg_kernel::ops::hull::convex_hull;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = convex_hull(&points).unwrap();
/// assert_eq!(hull.triangle_count(), 4);
/// ```
pub fn convex_hull(points: &[DVec3]) -> CsgResult<Mesh> {
    convex_hull_with_tolerance(points, VERTEX_MERGE_EPSILON)
}

/// Computes the convex hull, merging points closer than `merge_tolerance`.
pub fn convex_hull_with_tolerance(points: &[DVec3], merge_tolerance: f64) -> CsgResult<Mesh> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(CsgError::degenerate("Convex hull input contains non-finite points"));
    }

    let unique_points = remove_duplicates(points, merge_tolerance);
    if unique_points.len() < HULL_MIN_POINTS {
        return Err(CsgError::degenerate(format!(
            "Convex hull requires at least {HULL_MIN_POINTS} unique points, got {}",
            unique_points.len()
        )));
    }

    let initial_faces = build_initial_simplex(&unique_points)?;
    let final_faces = quickhull_iterate(initial_faces, &unique_points);

    Ok(faces_to_mesh(&final_faces, &unique_points))
}

/// A triangular face of the hull under construction.
#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    /// Outward-pointing unit normal.
    normal: DVec3,
    distance: f64,
    /// Indices of points in front of this face.
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0).cross(points[v2] - p0).normalize_or_zero();

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn is_outside(&self, point: DVec3) -> bool {
        self.signed_distance(point) > EPSILON
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .copied()
            .max_by(|&a, &b| {
                self.signed_distance(points[a])
                    .total_cmp(&self.signed_distance(points[b]))
            })
    }
}

fn remove_duplicates(points: &[DVec3], merge_tolerance: f64) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| u.distance(*p) < merge_tolerance) {
            unique.push(*p);
        }
    }
    unique
}

/// Builds the initial tetrahedron from extreme points and assigns every other
/// point to the first face it lies outside of.
fn build_initial_simplex(points: &[DVec3]) -> CsgResult<Vec<HullFace>> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[axis * 2]][axis] {
                extremes[axis * 2] = i;
            }
            if p[axis] > points[extremes[axis * 2 + 1]][axis] {
                extremes[axis * 2 + 1] = i;
            }
        }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points)?;

    let centroid = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, centroid, points),
        create_face_outward(p0, p2, p3, centroid, points),
        create_face_outward(p0, p3, p1, centroid, points),
        create_face_outward(p1, p3, p2, centroid, points),
    ];

    let used: BTreeSet<usize> = [p0, p1, p2, p3].into_iter().collect();
    let remaining: Vec<usize> = (0..points.len()).filter(|i| !used.contains(i)).collect();
    assign_outside_points(&mut faces, &remaining, points);

    Ok(faces)
}

fn assign_outside_points(faces: &mut [HullFace], candidates: &[usize], points: &[DVec3]) {
    for &idx in candidates {
        let point = points[idx];
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point)) {
            face.outside_points.push(idx);
        }
    }
}

fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = 0.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

fn find_farthest_from_line(p0: usize, p1: usize, points: &[DVec3]) -> CsgResult<usize> {
    let line_dir = (points[p1] - points[p0]).normalize_or_zero();
    let mut max_dist = EPSILON;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| CsgError::degenerate("All hull points are collinear"))
}

fn find_farthest_from_plane(p0: usize, p1: usize, p2: usize, points: &[DVec3]) -> CsgResult<usize> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize_or_zero();

    let mut max_dist = EPSILON;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| CsgError::degenerate("All hull points are coplanar"))
}

/// Creates a face whose normal points away from `centroid`.
fn create_face_outward(v0: usize, v1: usize, v2: usize, centroid: DVec3, points: &[DVec3]) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    let face_center = (points[v0] + points[v1] + points[v2]) / 3.0;

    if face.normal.dot(centroid - face_center) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

fn quickhull_iterate(mut faces: Vec<HullFace>, points: &[DVec3]) -> Vec<HullFace> {
    let max_iterations = points.len() * 2;

    for _ in 0..max_iterations {
        let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) else {
            break;
        };
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex = points[farthest];

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex))
            .map(|(i, _)| i)
            .collect();

        let horizon = find_horizon_edges(&faces, &visible);

        let mut reassign: Vec<usize> = visible
            .iter()
            .flat_map(|&idx| faces[idx].outside_points.iter().copied())
            .collect();
        reassign.retain(|&p| p != farthest);

        // Descending order keeps the remaining indices valid for swap_remove.
        for &idx in visible.iter().rev() {
            faces.swap_remove(idx);
        }

        let centroid = compute_centroid(&faces, points);
        faces.extend(
            horizon
                .into_iter()
                .map(|(e0, e1)| create_face_outward(e0, e1, farthest, centroid, points)),
        );

        assign_outside_points(&mut faces, &reassign, points);
    }

    faces
}

/// Edges that belong to exactly one visible face.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    let edges_of = |idx: usize| {
        let v = faces[idx].vertices;
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
    };

    for &idx in visible {
        for (a, b) in edges_of(idx) {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    visible
        .iter()
        .flat_map(|&idx| edges_of(idx))
        .filter(|&(a, b)| edge_count.get(&(a.min(b), a.max(b))) == Some(&1))
        .collect()
}

fn compute_centroid(faces: &[HullFace], points: &[DVec3]) -> DVec3 {
    let seen: BTreeSet<usize> = faces.iter().flat_map(|f| f.vertices).collect();
    if seen.is_empty() {
        return DVec3::ZERO;
    }
    seen.iter().map(|&v| points[v]).sum::<DVec3>() / seen.len() as f64
}

fn faces_to_mesh(faces: &[HullFace], points: &[DVec3]) -> Mesh {
    let used_vertices: BTreeSet<usize> = faces.iter().flat_map(|f| f.vertices).collect();

    let mut vertex_map: BTreeMap<usize, u32> = BTreeMap::new();
    let mut mesh = Mesh::with_capacity(used_vertices.len(), faces.len());

    for &v in &used_vertices {
        vertex_map.insert(v, mesh.add_vertex(points[v]));
    }

    for face in faces {
        let [a, b, c] = face.vertices.map(|v| vertex_map[&v]);
        mesh.add_triangle(a, b, c);
    }

    mesh
}
