//! Lattice points, compass directions, and canonical edge keys.
//!
//! Conventions
//! - `y` grows downward (row index), so `N` is `(0, -1)`.
//! - Direction order is N, NE, E, SE, S, SW, W, NW; this order is part of the
//!   wire format (slot `vertex * 8 + dir`) and of the tile table.

use std::fmt;

/// Integer point of the square lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticePoint {
    pub x: i32,
    pub y: i32,
}

impl LatticePoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        self.offset(dx, dy)
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the 8 unit or diagonal steps around a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Forward offsets (down, right, down-right, down-left). Walking these from every
/// point visits each undirected lattice edge exactly once.
pub(crate) const FORWARD_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        OFFSETS[self as usize]
    }

    #[inline]
    pub const fn reverse(self) -> Self {
        Self::ALL[(self as usize + 4) % 8]
    }

    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        OFFSETS
            .iter()
            .position(|&o| o == (dx, dy))
            .map(|i| Self::ALL[i])
    }

    /// Direction of the single step `from → to`, if the two points are lattice neighbors.
    pub fn between(from: LatticePoint, to: LatticePoint) -> Option<Self> {
        Self::from_offset(to.x - from.x, to.y - from.y)
    }
}

/// Order-independent identity of an edge: the lexicographically smaller endpoint first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: LatticePoint,
    hi: LatticePoint,
}

impl EdgeKey {
    pub fn new(a: LatticePoint, b: LatticePoint) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    #[inline]
    pub fn lo(self) -> LatticePoint {
        self.lo
    }

    #[inline]
    pub fn hi(self) -> LatticePoint {
        self.hi
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}
