//! Rotation system: the 8-direction edge state around every interior vertex.
//!
//! Slot `vertex * 8 + dir` holds `0`/`1` when a clickable edge leaves `vertex`
//! in direction `dir`, and `UNSET` otherwise. Only clickable edges contribute;
//! boundary edges never touch an interior vertex and deep-interior edges are
//! exactly what the search has to decide.

use std::fmt;

use crate::lattice::Direction;
use crate::mesh::GridMesh;

/// Sentinel for a direction the search is free to choose.
pub const UNSET: i8 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationEncoding {
    side: usize,
    slots: Vec<i8>,
}

impl RotationEncoding {
    /// Interior vertices per row (`width - 1`); the first argument of a tiling request.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn slots(&self) -> &[i8] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, vertex: usize, dir: Direction) -> Option<i8> {
        self.slots.get(vertex * 8 + dir.index()).copied()
    }

    /// The 8 slots of one vertex in compass order.
    pub fn vertex(&self, vertex: usize) -> Option<&[i8]> {
        self.slots.get(vertex * 8..vertex * 8 + 8)
    }

    /// Number of slots already fixed by clickable edges.
    pub fn fixed_count(&self) -> usize {
        self.slots.iter().filter(|&&s| s != UNSET).count()
    }
}

/// Whitespace-separated decimal integers, `-1` included.
impl fmt::Display for RotationEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for s in &self.slots {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{s}")?;
            first = false;
        }
        Ok(())
    }
}

/// Derive a fresh encoding from the current clickable edge uses.
pub fn encode(mesh: &GridMesh) -> RotationEncoding {
    let mut slots = vec![UNSET; 8 * mesh.interior_count()];
    for edge in mesh.edges().iter().filter(|e| e.is_clickable()) {
        let Some(bit) = edge.usage().bit() else {
            continue;
        };
        for (from, to) in [(edge.a(), edge.b()), (edge.b(), edge.a())] {
            let (Some(v), Some(d)) = (mesh.interior_index(from), Direction::between(from, to))
            else {
                continue;
            };
            slots[v * 8 + d.index()] = bit as i8;
        }
    }
    RotationEncoding {
        side: mesh.interior_cols(),
        slots,
    }
}
