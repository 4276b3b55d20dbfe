//! Boundary fold numbers → clickable edge uses.
//!
//! Input is one number per outline vertex, walked clockwise from the top-left
//! corner, `size` vertices per side. Each vertex owns the three clickable edges
//! pointing into the sheet (fixed order per side, see `Side::offsets`); the
//! fold number packs their uses as 3 bits, edge `i` taking bit `i`.
//! `NO_FOLDS` leaves the vertex's edges at their defaults.
//!
//! The four sheet corners carry no fold decisions. Their numbers are range
//! checked and skipped: their relative edges would leave the sheet or land on
//! the fixed outline.

use crate::error::CpError;
use crate::lattice::LatticePoint;
use crate::mesh::{EdgeUse, GridMesh};

/// Sentinel fold number: "leave this vertex's edges at their defaults".
pub const NO_FOLDS: i32 = 8;

/// Side length of the sheet the 32-number form describes.
pub const CANONICAL_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Side owning walk position `index`; each side starts at its corner.
    pub fn of_index(size: usize, index: usize) -> Self {
        match index / size {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// Offsets from the outline vertex to its three inward neighbors, edge 0..2.
    pub const fn offsets(self) -> [(i32, i32); 3] {
        match self {
            Self::Top => [(1, 1), (0, 1), (-1, 1)],
            Self::Right => [(-1, 1), (-1, 0), (-1, -1)],
            Self::Bottom => [(-1, -1), (0, -1), (1, -1)],
            Self::Left => [(1, -1), (1, 0), (1, 1)],
        }
    }
}

/// Outline vertex `index` of a `size`-sided sheet (clockwise from the top-left).
pub fn boundary_point(size: usize, index: usize) -> LatticePoint {
    let n = size as i32;
    let i = index as i32;
    if i < n {
        LatticePoint::new(i, 0)
    } else if i < 2 * n {
        LatticePoint::new(n, i - n)
    } else if i < 3 * n {
        LatticePoint::new(3 * n - i, n)
    } else {
        LatticePoint::new(0, 4 * n - i)
    }
}

/// `(n >> i) & 1` for edges 0..2; `None` for the sentinel.
pub fn fold_bits(n: i32) -> Option<[u8; 3]> {
    if n == NO_FOLDS {
        return None;
    }
    Some([0, 1, 2].map(|i| ((n >> i) & 1) as u8))
}

/// Decode the canonical 32-number form onto a fresh 8×8 mesh.
pub fn decode_boundary(folds: &[i32]) -> Result<GridMesh, CpError> {
    decode_folds(CANONICAL_SIZE, folds)
}

/// Decode `4 * size` fold numbers onto a fresh `size`×`size` mesh.
pub fn decode_folds(size: usize, folds: &[i32]) -> Result<GridMesh, CpError> {
    let expected = 4 * size;
    if folds.len() != expected {
        return Err(CpError::FoldCountMismatch {
            expected,
            actual: folds.len(),
        });
    }
    if let Some((index, &value)) = folds
        .iter()
        .enumerate()
        .find(|&(_, &n)| !(0..=NO_FOLDS).contains(&n))
    {
        return Err(CpError::InvalidFoldNumber { index, value });
    }

    let mut mesh = GridMesh::square(size);
    for (index, &n) in folds.iter().enumerate() {
        if index % size == 0 {
            continue;
        }
        let Some(bits) = fold_bits(n) else {
            continue;
        };
        let p = boundary_point(size, index);
        for ((dx, dy), bit) in Side::of_index(size, index).offsets().into_iter().zip(bits) {
            mesh.set_edge_use(p, p.offset(dx, dy), EdgeUse::from_bit(bit))?;
        }
    }
    tracing::debug!(size, "decoded boundary fold numbers");
    Ok(mesh)
}
