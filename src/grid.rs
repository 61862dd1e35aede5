use crate::constants::*;
use crate::location::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Everything standing on (or covering) a single cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Occupants: u8 {
        const NONE = 0;
        const AGENT = 1;
        const NEMESIS = 2;
        const MONSTER = 4;
        const ROCK = 8;
        const GOAL = 16;
        const SAFE_HAVEN = 32;
        const PERCEPTION = 64;
        const PATH = 128;
    }
}

/// Display identity of a cell, derived from its occupants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Agent,
    Nemesis,
    Monster,
    Rock,
    Goal,
    SafeHaven,
    AgentOnSafeHaven,
    MonsterOnRock,
    PerceptionZone,
    PathMarker,
}

impl CellKind {
    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => '_',
            CellKind::Agent => 'J',
            CellKind::Nemesis => 'D',
            CellKind::Monster => 'K',
            CellKind::Rock => 'R',
            CellKind::Goal => 'C',
            CellKind::SafeHaven => 'T',
            CellKind::AgentOnSafeHaven => 'G',
            CellKind::MonsterOnRock => 'S',
            CellKind::PerceptionZone => '*',
            CellKind::PathMarker => '@',
        }
    }
}

/// A single grid node: what is on it and how dangerous it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub occupants: Occupants,
    pub danger: u8,
}

impl Cell {
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.danger == 0
    }

    #[inline]
    pub fn has(&self, occupants: Occupants) -> bool {
        self.occupants.contains(occupants)
    }

    /// True if the Monster stands here, alone or sharing the cell with the Rock.
    #[inline]
    pub fn holds_monster(&self) -> bool {
        self.has(Occupants::MONSTER)
    }

    #[inline]
    pub fn is_safe_haven(&self) -> bool {
        self.has(Occupants::SAFE_HAVEN)
    }

    pub fn kind(&self) -> CellKind {
        let o = self.occupants;
        if o.contains(Occupants::PATH) {
            CellKind::PathMarker
        } else if o.contains(Occupants::MONSTER | Occupants::ROCK) {
            CellKind::MonsterOnRock
        } else if o.contains(Occupants::AGENT | Occupants::SAFE_HAVEN) {
            CellKind::AgentOnSafeHaven
        } else if o.contains(Occupants::AGENT) {
            CellKind::Agent
        } else if o.contains(Occupants::NEMESIS) {
            CellKind::Nemesis
        } else if o.contains(Occupants::MONSTER) {
            CellKind::Monster
        } else if o.contains(Occupants::ROCK) {
            CellKind::Rock
        } else if o.contains(Occupants::GOAL) {
            CellKind::Goal
        } else if o.contains(Occupants::SAFE_HAVEN) {
            CellKind::SafeHaven
        } else if o.contains(Occupants::PERCEPTION) {
            CellKind::PerceptionZone
        } else {
            CellKind::Empty
        }
    }
}

/// A 9x9 array for grid-sized data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridArray<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy> GridArray<T> {
    pub fn new(initial: T) -> Self {
        GridArray {
            data: vec![initial; GRID_CELLS],
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> &T {
        &self.data[pos.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> &mut T {
        &mut self.data[pos.index()]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, value: T) {
        *self.get_mut(pos) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Position::from_index(i), v))
    }
}

impl<T: Copy + Serialize> Serialize for GridArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de, T: Copy + Deserialize<'de>> Deserialize<'de> for GridArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = Vec::<T>::deserialize(deserializer)?;
        if data.len() != GRID_CELLS {
            return Err(serde::de::Error::custom("Invalid grid array size"));
        }
        Ok(GridArray { data })
    }
}

/// The static world: cell identities and danger counters.
pub type Grid = GridArray<Cell>;

impl Grid {
    /// Render the grid with column and row headers, one glyph per cell.
    pub fn render(&self) -> String {
        let mut out = String::from("  ");
        for col in 0..GRID_WIDTH {
            out.push_str(&format!("{} ", col));
        }
        out.push('\n');
        for row in 0..GRID_HEIGHT {
            out.push_str(&format!("{} ", row));
            for col in 0..GRID_WIDTH {
                out.push(self.get(Position::new(row, col)).kind().glyph());
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Copy of the grid with every path cell marked.
    pub fn with_path(&self, path: &[Position]) -> Grid {
        let mut marked = self.clone();
        for pos in path {
            marked.get_mut(*pos).occupants.insert(Occupants::PATH);
        }
        marked
    }
}
