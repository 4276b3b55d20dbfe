//! Geometric predicates that partition lattice edges into boundary, clickable,
//! and deep-interior.
//!
//! User interaction is confined to clickable edges; everything strictly inside
//! is left to the external search. The encoder and the boundary codec both rely
//! on this split, so the predicates stay pure and trivially checkable.

use super::types::EdgeKind;
use crate::lattice::LatticePoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeClassifier {
    width: i32,
    height: i32,
}

impl EdgeClassifier {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    /// `0 <= x <= width` and `0 <= y <= height`.
    #[inline]
    pub fn contains(&self, p: LatticePoint) -> bool {
        (0..=self.width).contains(&p.x) && (0..=self.height).contains(&p.y)
    }

    #[inline]
    pub fn is_boundary_point(&self, p: LatticePoint) -> bool {
        p.x == 0 || p.x == self.width || p.y == 0 || p.y == self.height
    }

    #[inline]
    pub fn is_interior_point(&self, p: LatticePoint) -> bool {
        0 < p.x && p.x < self.width && 0 < p.y && p.y < self.height
    }

    /// Both endpoints on the outline and the segment axis-aligned.
    pub fn is_boundary_edge(&self, p1: LatticePoint, p2: LatticePoint) -> bool {
        self.is_boundary_point(p1)
            && self.is_boundary_point(p2)
            && (p1.x == p2.x || p1.y == p2.y)
    }

    /// At least one endpoint on the outline, and not itself a boundary edge.
    pub fn is_clickable(&self, p1: LatticePoint, p2: LatticePoint) -> bool {
        if !self.is_boundary_point(p1) && !self.is_boundary_point(p2) {
            return false;
        }
        !self.is_boundary_edge(p1, p2)
    }

    pub fn classify(&self, p1: LatticePoint, p2: LatticePoint) -> EdgeKind {
        if self.is_boundary_edge(p1, p2) {
            EdgeKind::Boundary
        } else if self.is_clickable(p1, p2) {
            EdgeKind::Clickable
        } else {
            EdgeKind::Interior
        }
    }
}
