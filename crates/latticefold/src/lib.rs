//! Square-lattice crease patterns: mesh model, search encodings, tile stitching.
//!
//! The crate never decides flat-foldability itself. It prepares the payload an
//! external search program consumes, parses what that program answers, and
//! turns the answer back into one consistent crease pattern.
//!
//! Layout
//! - `lattice`: points, compass directions, canonical edge keys.
//! - `mesh`: the classified edge set of an N×N sheet (`GridMesh`).
//! - `encode`: the per-vertex 8-direction list sent to the search.
//! - `boundary`: boundary fold numbers → clickable edge uses.
//! - `tiles`, `stitch`: the 36 single-vertex tiles and their stitching.
//! - `paint`: painted 8×8 silhouettes, perimeter and the single-loop gate.
//! - `protocol`: text serialization and response parsing.
//! - `session`: the event handler that drives the interactive workflows.

pub mod boundary;
pub mod encode;
pub mod error;
pub mod lattice;
pub mod mesh;
pub mod paint;
pub mod protocol;
pub mod session;
pub mod stitch;
pub mod tiles;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::CpError;

/// Common exports for callers driving a full encode → search → stitch cycle.
pub mod prelude {
    pub use crate::boundary::{decode_boundary, decode_folds, NO_FOLDS};
    pub use crate::encode::{encode, RotationEncoding};
    pub use crate::error::CpError;
    pub use crate::lattice::{Direction, EdgeKey, LatticePoint};
    pub use crate::mesh::{Edge, EdgeKind, EdgeUse, GridMesh};
    pub use crate::paint::{is_single_loop, perimeter, PaintedGrid};
    pub use crate::protocol::{SearchOutcome, Tiling};
    pub use crate::session::{Event, LoopMode, Response, SearchBackend, Session, SessionCfg};
    pub use crate::stitch::{apply_corners, stitch, stitch_with, ConflictPolicy, StitchCfg};
    pub use crate::tiles::{tile_by_id, Tile, TILES};
}
