//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Stack Safety
//!
//! Tree walks recurse through `stacker::maybe_grow`, so deep trees built from
//! long sweeps grow the stack on the heap instead of overflowing it. Dropping
//! is iterative.

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

use crate::geometry::{Plane, Polygon};

/// A node in the BSP tree.
#[derive(Debug, Default)]
pub struct BspNode {
    /// Dividing plane; `None` only for an empty tree.
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane.
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Inserts polygons into the tree, splitting them as needed.
    ///
    /// The first polygon of an empty node becomes its splitter.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let plane = *self.plane.get_or_insert_with(|| *polygons[0].plane());

            let estimated_size = polygons.len() / 2 + 1;
            let mut front = Vec::with_capacity(estimated_size);
            let mut back = Vec::with_capacity(estimated_size);
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();

            for polygon in &polygons {
                polygon.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            self.polygons.extend(coplanar_front);
            self.polygons.extend(coplanar_back);

            if !front.is_empty() {
                self.front.get_or_insert_with(Box::default).build(front);
            }
            if !back.is_empty() {
                self.back.get_or_insert_with(Box::default).build(back);
            }
        })
    }

    /// Converts solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            for polygon in &mut self.polygons {
                polygon.flip();
            }
            self.plane = self.plane.map(|plane| plane.flipped());
            if let Some(front) = self.front.as_mut() {
                front.invert();
            }
            if let Some(back) = self.back.as_mut() {
                back.invert();
            }
            std::mem::swap(&mut self.front, &mut self.back);
        })
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    ///
    /// Coplanar polygons go to the side their own normal faces.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };

        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let mut front = Vec::new();
            let mut back = Vec::new();
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            for polygon in &polygons {
                polygon.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            front.extend(coplanar_front);
            back.extend(coplanar_back);

            let mut front = match self.front.as_ref() {
                Some(node) => node.clip_polygons(front),
                None => front,
            };
            // Without a back subtree everything behind the plane is inside.
            let back = match self.back.as_ref() {
                Some(node) => node.clip_polygons(back),
                None => Vec::new(),
            };

            front.extend(back);
            front
        })
    }

    /// Removes all polygons in this tree that are inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
            if let Some(front) = self.front.as_mut() {
                front.clip_to(other);
            }
            if let Some(back) = self.back.as_mut() {
                back.clip_to(other);
            }
        })
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());

            if let Some(ref front) = node.front {
                stack.push(front.as_ref());
            }
            if let Some(ref back) = node.back {
                stack.push(back.as_ref());
            }
        }

        result
    }

    /// Returns the number of polygons in this tree.
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();

            if let Some(ref front) = node.front {
                stack.push(front.as_ref());
            }
            if let Some(ref back) = node.back {
                stack.push(back.as_ref());
            }
        }

        count
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop to avoid stack overflow
        let mut stack = Vec::new();

        if let Some(front) = self.front.take() {
            stack.push(front);
        }
        if let Some(back) = self.back.take() {
            stack.push(back);
        }

        while let Some(mut node) = stack.pop() {
            if let Some(front) = node.front.take() {
                stack.push(front);
            }
            if let Some(back) = node.back.take() {
                stack.push(back);
            }
        }
    }
}
