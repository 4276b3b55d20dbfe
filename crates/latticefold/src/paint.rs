//! Painted 8×8 silhouettes and the single-loop gate.
//!
//! The painted grid never becomes a `GridMesh`; it travels to the search as a
//! 64-character dot string. Before searching, its polyomino perimeter is
//! compared with the loop length the search computes independently: equal
//! means the silhouette's outline is one simple closed loop.

use nalgebra::SMatrix;

use crate::error::CpError;

/// Cells per side of the painting canvas.
pub const PAINT_SIZE: usize = 8;

pub type PaintMatrix = SMatrix<u8, PAINT_SIZE, PAINT_SIZE>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintedGrid {
    cells: PaintMatrix,
}

impl Default for PaintedGrid {
    fn default() -> Self {
        Self {
            cells: PaintMatrix::zeros(),
        }
    }
}

impl PaintedGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells with any non-zero value count as painted.
    pub fn from_matrix(cells: PaintMatrix) -> Self {
        Self {
            cells: cells.map(|v| u8::from(v != 0)),
        }
    }

    #[inline]
    pub fn matrix(&self) -> &PaintMatrix {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get((row, col)).copied()
    }

    /// Flip one cell; returns its new value, `None` when out of range.
    pub fn toggle(&mut self, row: usize, col: usize) -> Option<u8> {
        let cell = self.cells.get_mut((row, col))?;
        *cell ^= 1;
        Some(*cell)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    pub fn perimeter(&self) -> usize {
        perimeter(&self.cells)
    }

    /// Row-major `'0'`/`'1'` string, the form the search consumes.
    pub fn to_dot_string(&self) -> String {
        let mut s = String::with_capacity(PAINT_SIZE * PAINT_SIZE);
        for row in 0..PAINT_SIZE {
            for col in 0..PAINT_SIZE {
                s.push(if self.cells[(row, col)] != 0 { '1' } else { '0' });
            }
        }
        s
    }

    pub fn from_dot_string(dots: &str) -> Result<Self, CpError> {
        let dots = dots.trim();
        if dots.len() != PAINT_SIZE * PAINT_SIZE {
            return Err(CpError::protocol(format!(
                "dot string must have {} characters, got {}",
                PAINT_SIZE * PAINT_SIZE,
                dots.len()
            )));
        }
        let mut grid = Self::default();
        for (i, ch) in dots.chars().enumerate() {
            let value = match ch {
                '0' => 0,
                '1' => 1,
                other => {
                    return Err(CpError::protocol(format!(
                        "dot string has {other:?} at position {i}"
                    )))
                }
            };
            grid.cells[(i / PAINT_SIZE, i % PAINT_SIZE)] = value;
        }
        Ok(grid)
    }
}

/// Polyomino boundary length: `4·cells − 2·(adjacent filled pairs)`.
pub fn perimeter(grid: &PaintMatrix) -> usize {
    let filled = |r: usize, c: usize| grid[(r, c)] != 0;
    let mut cells = 0;
    let mut shared = 0;
    for r in 0..PAINT_SIZE {
        for c in 0..PAINT_SIZE {
            if !filled(r, c) {
                continue;
            }
            cells += 1;
            if c + 1 < PAINT_SIZE && filled(r, c + 1) {
                shared += 1;
            }
            if r + 1 < PAINT_SIZE && filled(r + 1, c) {
                shared += 1;
            }
        }
    }
    4 * cells - 2 * shared
}

/// The outline is one simple loop iff its perimeter equals the loop length the
/// search reports for the same painting.
pub fn is_single_loop(grid: &PaintMatrix, reported_loop_length: usize) -> bool {
    perimeter(grid) == reported_loop_length
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn perimeter_reference_values() {
        let mut g = PaintedGrid::new();
        assert_eq!(g.perimeter(), 0);
        g.toggle(3, 3);
        assert_eq!(g.perimeter(), 4);
        g.toggle(3, 4);
        g.toggle(4, 3);
        g.toggle(4, 4);
        assert_eq!(g.perimeter(), 8);
        // full canvas is the sheet outline
        let full = PaintedGrid::from_matrix(PaintMatrix::repeat(1));
        assert_eq!(full.perimeter(), 32);
    }

    #[test]
    fn single_cell_against_reported_loop_length() {
        let mut g = PaintedGrid::new();
        g.toggle(3, 3);
        assert!(is_single_loop(g.matrix(), 4));
        assert!(!is_single_loop(g.matrix(), 0));
        assert!(!is_single_loop(g.matrix(), 32));
    }

    #[test]
    fn corner_touching_cells_share_no_edge() {
        let mut g = PaintedGrid::new();
        g.toggle(2, 2);
        g.toggle(3, 3);
        assert_eq!(g.perimeter(), 8);
    }

    #[test]
    fn toggle_and_clear() {
        let mut g = PaintedGrid::new();
        assert_eq!(g.toggle(0, 7), Some(1));
        assert_eq!(g.toggle(0, 7), Some(0));
        assert_eq!(g.toggle(8, 0), None);
        g.toggle(5, 5);
        assert_eq!(g.filled(), 1);
        g.clear();
        assert!(g.is_empty());
    }

    #[test]
    fn dot_string_is_row_major() {
        let mut g = PaintedGrid::new();
        g.toggle(0, 1);
        g.toggle(7, 0);
        let s = g.to_dot_string();
        assert_eq!(s.len(), 64);
        assert_eq!(&s[..8], "01000000");
        assert_eq!(&s[56..], "10000000");
        assert_eq!(PaintedGrid::from_dot_string(&s).unwrap(), g);
    }

    #[test]
    fn dot_string_rejects_garbage() {
        assert!(PaintedGrid::from_dot_string("0101").is_err());
        let bad = format!("{}2", "0".repeat(63));
        assert!(matches!(
            PaintedGrid::from_dot_string(&bad),
            Err(CpError::Protocol { .. })
        ));
    }

    proptest! {
        #[test]
        fn perimeter_is_invariant_under_transpose_and_flip(bits in any::<u64>()) {
            let m = PaintMatrix::from_fn(|r, c| ((bits >> (r * 8 + c)) & 1) as u8);
            let flipped = PaintMatrix::from_fn(|r, c| m[(r, PAINT_SIZE - 1 - c)]);
            let p = perimeter(&m);
            prop_assert_eq!(p, perimeter(&m.transpose()));
            prop_assert_eq!(p, perimeter(&flipped));
            prop_assert_eq!(is_single_loop(&m, p), is_single_loop(&m.transpose(), p));
            prop_assert_eq!(p % 2, 0);
        }
    }
}
