//! Error type shared by mesh editing, decoding, stitching, and the search protocol.
//!
//! `EdgeNotFound`, `BoundaryEdgeLocked` and the length mismatches can only come
//! from malformed geometry passed in by code; treat them as bugs. `Protocol` and
//! `Backend` describe a misbehaving search collaborator and are expected to
//! surface to the user. "No solution" is not an error (see `SearchOutcome`).

use std::fmt;

use crate::lattice::{EdgeKey, LatticePoint};
use crate::mesh::EdgeUse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CpError {
    /// No edge joins the two points in this mesh.
    EdgeNotFound { a: LatticePoint, b: LatticePoint },
    /// Boundary edges are fixed at `Used` for the lifetime of the mesh.
    BoundaryEdgeLocked { edge: EdgeKey },
    /// Boundary fold number outside `0..=8`.
    InvalidFoldNumber { index: usize, value: i32 },
    /// A boundary walk needs exactly `4 * size` fold numbers.
    FoldCountMismatch { expected: usize, actual: usize },
    /// Tile id outside the catalog.
    UnknownTileId { id: u8 },
    /// One tile per interior vertex is required.
    TileSequenceLengthMismatch { expected: usize, actual: usize },
    /// Two neighboring tiles disagree on a shared edge (strict stitching only).
    StitchConflict {
        edge: EdgeKey,
        first: EdgeUse,
        second: EdgeUse,
    },
    /// The search collaborator answered with something we cannot parse.
    Protocol { reason: String },
    /// The search collaborator could not be run or exited with failure.
    Backend { reason: String },
}

impl CpError {
    pub(crate) fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }

    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }

    /// True for failures caused by the external search rather than by our own geometry.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Protocol { .. } | Self::Backend { .. })
    }
}

impl fmt::Display for CpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeNotFound { a, b } => write!(f, "no edge joins {a} and {b}"),
            Self::BoundaryEdgeLocked { edge } => {
                write!(f, "boundary edge {edge} is fixed and cannot be changed")
            }
            Self::InvalidFoldNumber { index, value } => write!(
                f,
                "fold number {value} at boundary vertex {index} is outside 0..=8"
            ),
            Self::FoldCountMismatch { expected, actual } => write!(
                f,
                "expected {expected} boundary fold numbers, got {actual}"
            ),
            Self::UnknownTileId { id } => write!(f, "tile id {id} is not in the catalog"),
            Self::TileSequenceLengthMismatch { expected, actual } => write!(
                f,
                "expected {expected} tile ids (one per interior vertex), got {actual}"
            ),
            Self::StitchConflict {
                edge,
                first,
                second,
            } => write!(
                f,
                "tiles disagree on edge {edge}: {first:?} then {second:?}"
            ),
            Self::Protocol { reason } => write!(f, "malformed search response: {reason}"),
            Self::Backend { reason } => write!(f, "search backend failed: {reason}"),
        }
    }
}

impl std::error::Error for CpError {}
