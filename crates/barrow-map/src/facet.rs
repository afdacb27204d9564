/// One of the six cardinal faces of a cube.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Facet {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
    Up = 4,
    Down = 5,
}

/// Fixed iteration order matching the face-slot indices.
pub const ALL_FACETS: [Facet; 6] = [
    Facet::North,
    Facet::South,
    Facet::East,
    Facet::West,
    Facet::Up,
    Facet::Down,
];

impl Facet {
    /// Returns the `[0..6)` face-slot index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face-slot index back into a `Facet`.
    /// Falls back to `North` for out-of-range indices.
    #[inline]
    pub fn from_index(i: usize) -> Facet {
        match i {
            0 => Facet::North,
            1 => Facet::South,
            2 => Facet::East,
            3 => Facet::West,
            4 => Facet::Up,
            5 => Facet::Down,
            _ => Facet::North,
        }
    }

    /// Pure, stateless facing pair: N↔S, E↔W, U↔D.
    #[inline]
    pub fn opposite(self) -> Facet {
        match self {
            Facet::North => Facet::South,
            Facet::South => Facet::North,
            Facet::East => Facet::West,
            Facet::West => Facet::East,
            Facet::Up => Facet::Down,
            Facet::Down => Facet::Up,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this facet.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Facet::North => (0, 1, 0),
            Facet::South => (0, -1, 0),
            Facet::East => (1, 0, 0),
            Facet::West => (-1, 0, 0),
            Facet::Up => (0, 0, 1),
            Facet::Down => (0, 0, -1),
        }
    }

    /// True for the four side facets (not Up/Down).
    #[inline]
    pub fn is_lateral(self) -> bool {
        !matches!(self, Facet::Up | Facet::Down)
    }
}
