//! Stitch solved tiles back onto the mesh.
//!
//! The search answers with one tile id per interior vertex (row-major). Each
//! tile writes its 8 bits onto the 8 edges around its vertex; neighboring
//! vertices share edges, so a consistent answer writes every shared edge twice
//! with the same value. Edges without an interior endpoint are left alone:
//! the outline is fixed, and the four corner diagonals come from the separate
//! `CORNERS:` report (`apply_corners`).

use std::collections::HashMap;

use crate::error::CpError;
use crate::lattice::{Direction, EdgeKey, LatticePoint};
use crate::mesh::{EdgeUse, GridMesh};
use crate::tiles::{tile_by_id, Tile};

/// What to do when two tiles disagree on a shared edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the later write and log the disagreement.
    #[default]
    LastWriteWins,
    /// Fail on the first disagreement.
    Strict,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StitchCfg {
    pub on_conflict: ConflictPolicy,
}

/// Stitch with the default (last-write-wins) policy.
pub fn stitch(mesh: GridMesh, tile_ids: &[u8]) -> Result<GridMesh, CpError> {
    stitch_with(mesh, tile_ids, StitchCfg::default())
}

/// Write every tile onto `mesh` and return it.
///
/// Takes the mesh by value: pass a clone when the interactive mesh must survive
/// for another attempt. Length and ids are validated before the first write.
pub fn stitch_with(
    mut mesh: GridMesh,
    tile_ids: &[u8],
    cfg: StitchCfg,
) -> Result<GridMesh, CpError> {
    let expected = mesh.interior_count();
    if tile_ids.len() != expected {
        return Err(CpError::TileSequenceLengthMismatch {
            expected,
            actual: tile_ids.len(),
        });
    }
    let tiles = tile_ids
        .iter()
        .map(|&id| tile_by_id(id))
        .collect::<Result<Vec<&Tile>, _>>()?;

    let cols = mesh.interior_cols();
    let mut written: HashMap<EdgeKey, EdgeUse> = HashMap::with_capacity(4 * expected);
    let mut conflicts = 0usize;
    for (index, tile) in tiles.into_iter().enumerate() {
        let center = LatticePoint::new((index % cols) as i32 + 1, (index / cols) as i32 + 1);
        for dir in Direction::ALL {
            let neighbor = center.step(dir);
            let usage = tile.edge_use(dir);
            let key = EdgeKey::new(center, neighbor);
            if let Some(first) = written.insert(key, usage) {
                if first != usage {
                    match cfg.on_conflict {
                        ConflictPolicy::Strict => {
                            return Err(CpError::StitchConflict {
                                edge: key,
                                first,
                                second: usage,
                            })
                        }
                        ConflictPolicy::LastWriteWins => {
                            conflicts += 1;
                            tracing::warn!(edge = %key, ?first, second = ?usage, "tiles disagree on shared edge");
                        }
                    }
                }
            }
            mesh.set_edge_use(center, neighbor, usage)?;
        }
    }
    tracing::debug!(tiles = expected, conflicts, "stitched tile sequence");
    Ok(mesh)
}

/// Apply the four corner-diagonal bits (top-left, top-right, bottom-right,
/// bottom-left) reported alongside a tiling.
pub fn apply_corners(mesh: &mut GridMesh, corners: [u8; 4]) -> Result<(), CpError> {
    if let Some(bad) = corners.iter().find(|&&c| c > 1) {
        return Err(CpError::protocol(format!("corner value {bad} is not 0 or 1")));
    }
    for (key, bit) in mesh.corner_diagonals().into_iter().zip(corners) {
        mesh.set_edge_use(key.lo(), key.hi(), EdgeUse::from_bit(bit))?;
    }
    Ok(())
}
