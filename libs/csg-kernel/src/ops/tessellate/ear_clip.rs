//! # Ear Clipping
//!
//! O(n²) ear clipping of a simple polygon. Vertices are projected into a 2D
//! basis of the polygon's plane chosen so that the polygon winds
//! counter-clockwise; ear tests use `robust::orient2d`.

use glam::{DVec2, DVec3};
use robust::{orient2d, Coord};

use crate::geometry::{Polygon, Vertex};

/// Triangulates a simple polygon by ear clipping.
///
/// Triangles keep the polygon's winding and storage. Triangles that collapse
/// to zero area (collinear runs) are skipped. If no ear can be found, which
/// only happens for self-intersecting or numerically degenerate input, the
/// remaining vertices are fanned.
pub fn ear_clip(polygon: &Polygon) -> Vec<Polygon> {
    let vertices = polygon.vertices();
    let projected = project_to_plane(polygon);

    let mut remaining: Vec<usize> = (0..vertices.len()).collect();
    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(vertices.len().saturating_sub(2));

    while remaining.len() > 3 {
        let count = remaining.len();
        let ear = (0..count).find(|&i| {
            let prev = remaining[(i + count - 1) % count];
            let current = remaining[i];
            let next = remaining[(i + 1) % count];
            is_ear(prev, current, next, &remaining, &projected)
        });

        match ear {
            Some(i) => {
                let prev = remaining[(i + count - 1) % count];
                let next = remaining[(i + 1) % count];
                triangles.push([prev, remaining[i], next]);
                remaining.remove(i);
            }
            None => {
                tracing::debug!(
                    remaining = count,
                    "no ear found; fanning the remaining vertices"
                );
                for i in 1..count - 1 {
                    triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
                }
                remaining.clear();
            }
        }
    }
    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }

    triangles
        .into_iter()
        .filter_map(|[a, b, c]| {
            let corners: Vec<Vertex> = vec![vertices[a], vertices[b], vertices[c]];
            Polygon::new(corners, polygon.storage().clone()).ok()
        })
        .collect()
}

/// Projects the vertices onto the polygon's plane using a right-handed basis
/// `(u, v, normal)`, so counter-clockwise around the normal stays
/// counter-clockwise in 2D.
fn project_to_plane(polygon: &Polygon) -> Vec<DVec2> {
    let normal = polygon.plane().normal();
    let u = normal.any_orthonormal_vector();
    let v = normal.cross(u);
    polygon
        .vertices()
        .iter()
        .map(|vertex| project(vertex.pos, u, v))
        .collect()
}

#[inline]
fn project(point: DVec3, u: DVec3, v: DVec3) -> DVec2 {
    DVec2::new(point.dot(u), point.dot(v))
}

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn is_ear(prev: usize, current: usize, next: usize, remaining: &[usize], points: &[DVec2]) -> bool {
    let (a, b, c) = (points[prev], points[current], points[next]);
    if orient2d(coord(a), coord(b), coord(c)) <= 0.0 {
        return false;
    }

    remaining
        .iter()
        .filter(|&&i| i != prev && i != current && i != next)
        .all(|&i| {
            let p = points[i];
            // Coincident points (touching boundaries) do not block an ear.
            p == a || p == b || p == c || !point_in_triangle(p, a, b, c)
        })
}

/// Closed point-in-triangle test for a counter-clockwise triangle.
fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient2d(coord(a), coord(b), coord(p)) >= 0.0
        && orient2d(coord(b), coord(c), coord(p)) >= 0.0
        && orient2d(coord(c), coord(a), coord(p)) >= 0.0
}
