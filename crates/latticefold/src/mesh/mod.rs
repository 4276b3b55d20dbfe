//! Crease-pattern mesh over an N×N square lattice.
//!
//! Purpose
//! - Own every candidate crease of the sheet (axis-aligned edges plus both
//!   diagonals of each unit cell) together with its classification and use.
//! - Provide O(1) lookup by unordered endpoint pair for the encoder, the
//!   boundary codec, and the stitcher.
//!
//! Invariants
//! - Exactly one `Edge` per unordered endpoint pair; construction only walks the
//!   four forward offsets, so no pair is generated twice.
//! - Topology and classification never change after construction; only uses do.
//! - Boundary edges stay `Used`: `set_edge_use` refuses them.
//!
//! Layout: `types.rs` (edge data), `classify.rs` (predicates), `tests.rs`.

mod classify;
mod types;

use std::collections::HashMap;

use crate::error::CpError;
use crate::lattice::{EdgeKey, LatticePoint, FORWARD_OFFSETS};

pub use classify::EdgeClassifier;
pub use types::{Edge, EdgeKind, EdgeUse};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMesh {
    width: usize,
    height: usize,
    classifier: EdgeClassifier,
    edges: Vec<Edge>,
    index: HashMap<EdgeKey, usize>,
}

impl GridMesh {
    /// Build the full classified edge set. Panics unless `width == height >= 1`.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 1 && width == height,
            "crease pattern mesh must be square with side >= 1 (got {width}x{height})"
        );
        let classifier = EdgeClassifier::new(width, height);
        let mut edges = Vec::new();
        let mut index = HashMap::new();
        for x in 0..=width as i32 {
            for y in 0..=height as i32 {
                let a = LatticePoint::new(x, y);
                for (dx, dy) in FORWARD_OFFSETS {
                    let b = a.offset(dx, dy);
                    if !classifier.contains(b) {
                        continue;
                    }
                    let kind = classifier.classify(a, b);
                    index.insert(EdgeKey::new(a, b), edges.len());
                    edges.push(Edge::new(a, b, kind));
                }
            }
        }
        Self {
            width,
            height,
            classifier,
            edges,
            index,
        }
    }

    #[inline]
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn classifier(&self) -> &EdgeClassifier {
        &self.classifier
    }
    /// All edges in generation order (x-major, then y, then forward offset).
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Interior vertices per row, `width - 1`.
    #[inline]
    pub fn interior_cols(&self) -> usize {
        self.width - 1
    }

    /// Number of interior vertices, `(width - 1) * (height - 1)`.
    #[inline]
    pub fn interior_count(&self) -> usize {
        (self.width - 1) * (self.height - 1)
    }

    /// Row-major index of a strictly interior point: `(x-1) + (y-1)*(width-1)`.
    pub fn interior_index(&self, p: LatticePoint) -> Option<usize> {
        if !self.classifier.is_interior_point(p) {
            return None;
        }
        Some((p.x - 1) as usize + (p.y - 1) as usize * self.interior_cols())
    }

    pub fn interior_point(&self, index: usize) -> Option<LatticePoint> {
        if index >= self.interior_count() {
            return None;
        }
        let cols = self.interior_cols();
        Some(LatticePoint::new(
            (index % cols) as i32 + 1,
            (index / cols) as i32 + 1,
        ))
    }

    /// Look up the edge joining `a` and `b` in either order.
    pub fn edge(&self, a: LatticePoint, b: LatticePoint) -> Option<&Edge> {
        self.edge_by_key(EdgeKey::new(a, b))
    }

    pub fn edge_by_key(&self, key: EdgeKey) -> Option<&Edge> {
        self.index.get(&key).map(|&i| &self.edges[i])
    }

    fn slot(&self, a: LatticePoint, b: LatticePoint) -> Result<usize, CpError> {
        self.index
            .get(&EdgeKey::new(a, b))
            .copied()
            .ok_or(CpError::EdgeNotFound { a, b })
    }

    /// Set the use of a clickable or interior edge; returns the previous use.
    pub fn set_edge_use(
        &mut self,
        a: LatticePoint,
        b: LatticePoint,
        usage: EdgeUse,
    ) -> Result<EdgeUse, CpError> {
        let i = self.slot(a, b)?;
        let edge = &mut self.edges[i];
        if edge.is_boundary() {
            return Err(CpError::BoundaryEdgeLocked { edge: edge.key() });
        }
        let prev = edge.usage();
        edge.set_usage(usage);
        Ok(prev)
    }

    /// Click semantics: flip a clickable edge, leave every other edge alone.
    /// Returns the edge's use after the click.
    pub fn toggle_edge(&mut self, a: LatticePoint, b: LatticePoint) -> Result<EdgeUse, CpError> {
        let i = self.slot(a, b)?;
        let edge = &mut self.edges[i];
        if edge.is_clickable() {
            edge.set_usage(edge.usage().toggled());
        }
        Ok(edge.usage())
    }

    /// Restore every edge to the default of its class.
    pub fn reset(&mut self) {
        for e in &mut self.edges {
            e.reset();
        }
    }

    /// Clickable edges whose endpoints both lie on the outline.
    pub fn corner_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                e.is_clickable()
                    && self.classifier.is_boundary_point(e.a())
                    && self.classifier.is_boundary_point(e.b())
            })
            .collect()
    }

    /// The four diagonals cutting off the sheet corners, ordered top-left,
    /// top-right, bottom-right, bottom-left. No interior vertex touches them,
    /// so stitching alone never decides them.
    pub fn corner_diagonals(&self) -> [EdgeKey; 4] {
        let w = self.width as i32;
        let h = self.height as i32;
        let p = LatticePoint::new;
        [
            EdgeKey::new(p(1, 0), p(0, 1)),
            EdgeKey::new(p(w, 1), p(w - 1, 0)),
            EdgeKey::new(p(w - 1, h), p(w, h - 1)),
            EdgeKey::new(p(0, h - 1), p(1, h)),
        ]
    }

    /// Flat hand-off for renderers: `[width, height, x1, y1, x2, y2, use, ...]`
    /// with `-1` for undecided edges.
    pub fn to_flat_list(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(2 + 5 * self.edges.len());
        out.push(self.width as i32);
        out.push(self.height as i32);
        for e in &self.edges {
            out.extend_from_slice(&[
                e.a().x,
                e.a().y,
                e.b().x,
                e.b().y,
                i32::from(e.usage().wire_value()),
            ]);
        }
        out
    }

    /// Count edges per use, `(not_used, used, unknown)`.
    pub fn use_counts(&self) -> (usize, usize, usize) {
        self.edges
            .iter()
            .fold((0, 0, 0), |(n, u, k), e| match e.usage() {
                EdgeUse::NotUsed => (n + 1, u, k),
                EdgeUse::Used => (n, u + 1, k),
                EdgeUse::Unknown => (n, u, k + 1),
            })
    }
}

#[cfg(test)]
mod tests;
