//! Catalog of the 36 single-vertex tiles.
//!
//! Each tile lists, in compass order N..NW, which of the 8 lattice directions
//! carry a crease at one vertex. The table is exactly the set of 8-direction
//! configurations satisfying Kawasaki's condition on 45° sectors (plus the
//! empty vertex), sorted as bit strings; the tile id is the row number and is
//! what the search program reports.

use crate::error::CpError;
use crate::lattice::Direction;
use crate::mesh::EdgeUse;

pub const TILE_COUNT: usize = 36;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: u8,
    pub bits: [u8; 8],
}

impl Tile {
    #[inline]
    pub fn bit(&self, dir: Direction) -> u8 {
        self.bits[dir.index()]
    }

    #[inline]
    pub fn edge_use(&self, dir: Direction) -> EdgeUse {
        EdgeUse::from_bit(self.bit(dir))
    }

    /// Number of creases meeting at the vertex.
    pub fn degree(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }
}

const fn t(id: u8, bits: [u8; 8]) -> Tile {
    Tile { id, bits }
}

#[rustfmt::skip]
pub static TILES: [Tile; TILE_COUNT] = [
    t(0,  [0, 0, 0, 0, 0, 0, 0, 0]),
    t(1,  [0, 0, 0, 1, 0, 0, 0, 1]),
    t(2,  [0, 0, 1, 0, 0, 0, 1, 0]),
    t(3,  [0, 0, 1, 0, 0, 1, 1, 1]),
    t(4,  [0, 0, 1, 0, 1, 1, 0, 1]),
    t(5,  [0, 0, 1, 1, 1, 0, 0, 1]),
    t(6,  [0, 1, 0, 0, 0, 1, 0, 0]),
    t(7,  [0, 1, 0, 0, 1, 0, 1, 1]),
    t(8,  [0, 1, 0, 0, 1, 1, 1, 0]),
    t(9,  [0, 1, 0, 1, 0, 1, 0, 1]),
    t(10, [0, 1, 0, 1, 1, 0, 1, 0]),
    t(11, [0, 1, 0, 1, 1, 1, 1, 1]),
    t(12, [0, 1, 1, 0, 1, 0, 0, 1]),
    t(13, [0, 1, 1, 1, 0, 0, 1, 0]),
    t(14, [0, 1, 1, 1, 0, 1, 1, 1]),
    t(15, [0, 1, 1, 1, 1, 1, 0, 1]),
    t(16, [1, 0, 0, 0, 1, 0, 0, 0]),
    t(17, [1, 0, 0, 1, 0, 0, 1, 1]),
    t(18, [1, 0, 0, 1, 0, 1, 1, 0]),
    t(19, [1, 0, 0, 1, 1, 1, 0, 0]),
    t(20, [1, 0, 1, 0, 0, 1, 0, 1]),
    t(21, [1, 0, 1, 0, 1, 0, 1, 0]),
    t(22, [1, 0, 1, 0, 1, 1, 1, 1]),
    t(23, [1, 0, 1, 1, 0, 1, 0, 0]),
    t(24, [1, 0, 1, 1, 1, 0, 1, 1]),
    t(25, [1, 0, 1, 1, 1, 1, 1, 0]),
    t(26, [1, 1, 0, 0, 1, 0, 0, 1]),
    t(27, [1, 1, 0, 1, 0, 0, 1, 0]),
    t(28, [1, 1, 0, 1, 0, 1, 1, 1]),
    t(29, [1, 1, 0, 1, 1, 1, 0, 1]),
    t(30, [1, 1, 1, 0, 0, 1, 0, 0]),
    t(31, [1, 1, 1, 0, 1, 0, 1, 1]),
    t(32, [1, 1, 1, 0, 1, 1, 1, 0]),
    t(33, [1, 1, 1, 1, 0, 1, 0, 1]),
    t(34, [1, 1, 1, 1, 1, 0, 1, 0]),
    t(35, [1, 1, 1, 1, 1, 1, 1, 1]),
];

pub fn tile_by_id(id: u8) -> Result<&'static Tile, CpError> {
    TILES
        .get(usize::from(id))
        .ok_or(CpError::UnknownTileId { id })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alternate 45° sectors must each sum to 180° (4 steps).
    fn kawasaki(bits: [u8; 8]) -> bool {
        let dirs: Vec<usize> = (0..8).filter(|&d| bits[d] != 0).collect();
        if dirs.is_empty() {
            return true;
        }
        if dirs.len() % 2 != 0 {
            return false;
        }
        let k = dirs.len();
        let sectors: Vec<usize> = (0..k)
            .map(|i| match (dirs[(i + 1) % k] + 8 - dirs[i]) % 8 {
                0 => 8,
                s => s,
            })
            .collect();
        sectors.iter().step_by(2).sum::<usize>() == 4
    }

    #[test]
    fn ids_match_rows() {
        for (i, tile) in TILES.iter().enumerate() {
            assert_eq!(usize::from(tile.id), i);
            assert_eq!(tile_by_id(tile.id), Ok(tile));
        }
    }

    #[test]
    fn out_of_range_ids_fail() {
        assert_eq!(tile_by_id(36), Err(CpError::UnknownTileId { id: 36 }));
        assert_eq!(tile_by_id(99), Err(CpError::UnknownTileId { id: 99 }));
    }

    #[test]
    fn every_tile_is_even_and_locally_flat() {
        for tile in &TILES {
            assert_eq!(tile.degree() % 2, 0, "tile {}", tile.id);
            assert!(kawasaki(tile.bits), "tile {}", tile.id);
        }
    }

    #[test]
    fn catalog_is_exactly_the_kawasaki_configurations() {
        let mut all: Vec<[u8; 8]> = (0u16..256)
            .map(|m| {
                let mut bits = [0u8; 8];
                for (d, b) in bits.iter_mut().enumerate() {
                    *b = ((m >> (7 - d)) & 1) as u8;
                }
                bits
            })
            .filter(|&b| kawasaki(b))
            .collect();
        all.sort();
        let table: Vec<[u8; 8]> = TILES.iter().map(|t| t.bits).collect();
        assert_eq!(table, all);
    }

    #[test]
    fn straight_lines_are_degree_two() {
        let lines: Vec<u8> = TILES
            .iter()
            .filter(|t| t.degree() == 2)
            .map(|t| t.id)
            .collect();
        assert_eq!(lines, vec![1, 2, 6, 16]);
        let vertical = tile_by_id(16).unwrap();
        assert_eq!(vertical.edge_use(Direction::N), EdgeUse::Used);
        assert_eq!(vertical.edge_use(Direction::S), EdgeUse::Used);
        assert_eq!(vertical.edge_use(Direction::E), EdgeUse::NotUsed);
    }
}
