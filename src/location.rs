use crate::constants::*;
use serde::*;
use std::fmt;

/// A cell coordinate on the 9x9 grid, packed as `row << 4 | col`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Position {
    packed: u8,
}

impl Position {
    /// Create a position. Panics in debug builds if the coordinates are off the grid.
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < GRID_HEIGHT && col < GRID_WIDTH);
        Position {
            packed: (row << 4) | col,
        }
    }

    /// Create a position from signed coordinates, if they are on the grid.
    pub fn checked(row: i16, col: i16) -> Option<Self> {
        if (0..GRID_HEIGHT as i16).contains(&row) && (0..GRID_WIDTH as i16).contains(&col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.packed >> 4
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.packed & 0x0F
    }

    /// Row-major index into a grid-sized array.
    #[inline]
    pub fn index(self) -> usize {
        self.row() as usize * GRID_WIDTH as usize + self.col() as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        Position::new(
            (index / GRID_WIDTH as usize) as u8,
            (index % GRID_WIDTH as usize) as u8,
        )
    }

    #[inline]
    pub fn packed_repr(self) -> u8 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u8) -> Self {
        Position { packed }
    }

    /// Displace by `(row, col)`. Returns `None` when the result leaves the grid.
    pub fn offset(self, (dr, dc): (i8, i8)) -> Option<Self> {
        Position::checked(self.row() as i16 + dr as i16, self.col() as i16 + dc as i16)
    }

    /// Chebyshev distance: the number of 8-directional steps between two cells.
    pub fn distance_to(self, other: Self) -> u8 {
        let dr = (self.row() as i8) - (other.row() as i8);
        let dc = (self.col() as i8) - (other.col() as i8);

        dr.abs().max(dc.abs()) as u8
    }

    /// True if `other` is one king-move away.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.distance_to(other) == 1
    }

    /// Iterate over the in-bounds cells reached by applying each offset.
    pub fn around<'a>(self, offsets: &'a [(i8, i8)]) -> impl Iterator<Item = Position> + 'a {
        offsets.iter().filter_map(move |&offset| self.offset(offset))
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_CELLS).map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row(), self.col())
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let packed = u8::deserialize(deserializer)?;
        if (packed >> 4) >= GRID_HEIGHT || (packed & 0x0F) >= GRID_WIDTH {
            return Err(de::Error::custom("position outside of the grid"));
        }
        Ok(Position::from_packed(packed))
    }
}
