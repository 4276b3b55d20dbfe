//! Edge data: classification, tri-state use, and the per-edge record.

use crate::lattice::{EdgeKey, LatticePoint};

/// Fold state of one candidate crease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeUse {
    NotUsed,
    Used,
    /// Not decided yet; deep-interior edges stay here until stitched.
    Unknown,
}

impl EdgeUse {
    /// `0 → NotUsed`, anything else `→ Used`.
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Self::NotUsed
        } else {
            Self::Used
        }
    }

    #[inline]
    pub fn bit(self) -> Option<u8> {
        match self {
            Self::NotUsed => Some(0),
            Self::Used => Some(1),
            Self::Unknown => None,
        }
    }

    /// Integer used by the rendering hand-off (`-1` for unknown).
    #[inline]
    pub fn wire_value(self) -> i8 {
        match self {
            Self::NotUsed => 0,
            Self::Used => 1,
            Self::Unknown => -1,
        }
    }

    /// Click toggle. An undecided edge becomes `NotUsed`.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::NotUsed => Self::Used,
            Self::Used | Self::Unknown => Self::NotUsed,
        }
    }
}

/// Three-way edge partition. Exactly one holds for every edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Axis-aligned segment of the sheet's outline; always used.
    Boundary,
    /// Touches the outline without lying on it; user- and codec-editable.
    Clickable,
    /// Both endpoints strictly inside; resolved only by stitching.
    Interior,
}

impl EdgeKind {
    #[inline]
    pub fn default_use(self) -> EdgeUse {
        match self {
            Self::Boundary => EdgeUse::Used,
            Self::Clickable => EdgeUse::NotUsed,
            Self::Interior => EdgeUse::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::Clickable => "clickable",
            Self::Interior => "interior",
        }
    }
}

/// One candidate crease between two lattice neighbors.
///
/// Endpoints keep the orientation they were generated with (forward offset);
/// lookups go through `EdgeKey` so callers may use either order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    a: LatticePoint,
    b: LatticePoint,
    kind: EdgeKind,
    usage: EdgeUse,
}

impl Edge {
    pub(crate) fn new(a: LatticePoint, b: LatticePoint, kind: EdgeKind) -> Self {
        Self {
            a,
            b,
            kind,
            usage: kind.default_use(),
        }
    }

    #[inline]
    pub fn a(&self) -> LatticePoint {
        self.a
    }
    #[inline]
    pub fn b(&self) -> LatticePoint {
        self.b
    }
    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }
    #[inline]
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
    #[inline]
    pub fn usage(&self) -> EdgeUse {
        self.usage
    }
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.kind == EdgeKind::Boundary
    }
    #[inline]
    pub fn is_clickable(&self) -> bool {
        self.kind == EdgeKind::Clickable
    }

    pub(crate) fn set_usage(&mut self, usage: EdgeUse) {
        self.usage = usage;
    }

    pub(crate) fn reset(&mut self) {
        self.usage = self.kind.default_use();
    }
}
