//! The world the searchers run on.
//!
//! `MapBuilder` validates placements one object at a time; `GameMap` is the
//! finished, immutable grid plus the landmark positions the search needs.
//! Danger counters are computed once when the map is built.

pub mod generator;
pub mod objects;
pub mod scenario;

pub use generator::*;
pub use objects::*;
pub use scenario::*;

use crate::error::*;
use crate::grid::*;
use crate::location::*;
use log::*;
use serde::{Deserialize, Serialize};

/// Positions of every object on a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placements {
    pub agent: Position,
    pub nemesis: Position,
    pub monster: Position,
    pub rock: Position,
    pub goal: Position,
    pub safe_haven: Position,
}

impl Placements {
    pub fn position_of(&self, kind: ObjectKind) -> Position {
        match kind {
            ObjectKind::Player => self.agent,
            ObjectKind::Nemesis => self.nemesis,
            ObjectKind::Hazard => self.monster,
            ObjectKind::Obstacle => self.rock,
            ObjectKind::Goal => self.goal,
            ObjectKind::Waypoint => self.safe_haven,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = MapObject> + '_ {
        PLACEMENT_ORDER
            .iter()
            .map(move |&kind| MapObject::new(kind, self.position_of(kind)))
    }
}

/// Incrementally places objects, rejecting any that conflict with those
/// already on the map.
#[derive(Clone, Debug, Default)]
pub struct MapBuilder {
    objects: Vec<MapObject>,
}

impl MapBuilder {
    pub fn new() -> Self {
        MapBuilder::default()
    }

    /// The first already-placed object that `object` conflicts with.
    pub fn conflict(&self, object: &MapObject) -> Option<&MapObject> {
        self.objects.iter().find(|placed| object.conflicts_with(placed))
    }

    pub fn try_place(&mut self, object: MapObject) -> MapResult<()> {
        if let Some(other) = self.conflict(&object) {
            trace!(
                "Rejected {:?} at {}: conflicts with {:?} at {}",
                object.kind,
                object.position,
                other.kind,
                other.position
            );
            return Err(MapError::Conflict {
                object: object.kind,
                other: other.kind,
                position: object.position,
            });
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn position_of(&self, kind: ObjectKind) -> Option<Position> {
        self.objects
            .iter()
            .find(|object| object.kind == kind)
            .map(|object| object.position)
    }

    pub fn build(self) -> MapResult<GameMap> {
        let find = |kind| self.position_of(kind).ok_or(MapError::MissingObject(kind));
        let placements = Placements {
            agent: find(ObjectKind::Player)?,
            nemesis: find(ObjectKind::Nemesis)?,
            monster: find(ObjectKind::Hazard)?,
            rock: find(ObjectKind::Obstacle)?,
            goal: find(ObjectKind::Goal)?,
            safe_haven: find(ObjectKind::Waypoint)?,
        };
        Ok(GameMap::from_valid_placements(placements))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMap {
    placements: Placements,
    grid: Grid,
    hazard_removed: bool,
}

impl GameMap {
    /// Validate and build a map from a full set of positions.
    pub fn initialize(placements: &Placements) -> MapResult<GameMap> {
        let mut builder = MapBuilder::new();
        for object in placements.objects() {
            builder.try_place(object)?;
        }
        builder.build()
    }

    /// Random valid map; see [`generator::generate`].
    pub fn generate<R: rand::Rng + ?Sized>(rng: &mut R) -> MapResult<GameMap> {
        generator::generate(rng)
    }

    fn from_valid_placements(placements: Placements) -> GameMap {
        GameMap {
            placements,
            grid: build_grid(&placements),
            hazard_removed: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        self.grid.get(pos)
    }

    pub fn start(&self) -> Position {
        self.placements.agent
    }

    pub fn nemesis(&self) -> Position {
        self.placements.nemesis
    }

    pub fn monster(&self) -> Position {
        self.placements.monster
    }

    pub fn rock(&self) -> Position {
        self.placements.rock
    }

    pub fn goal(&self) -> Position {
        self.placements.goal
    }

    pub fn safe_haven(&self) -> Position {
        self.placements.safe_haven
    }

    pub fn hazard_removed(&self) -> bool {
        self.hazard_removed
    }

    /// Erase the Monster from the rendered map after a route neutralized it.
    ///
    /// Only identities change: perception cells that no other zone covers
    /// become empty and the Monster's own cell keeps only what else stands on
    /// it. Danger counters are left untouched.
    pub fn remove_hazard(&mut self) {
        let monster = self.placements.monster;
        for pos in MapObject::new(ObjectKind::Hazard, monster).perception_zone() {
            let cell = self.grid.get_mut(pos);
            if cell.danger == 1 {
                cell.occupants.remove(Occupants::PERCEPTION);
            }
        }
        let cell = self.grid.get_mut(monster);
        cell.occupants.remove(Occupants::MONSTER);
        if cell.danger == 1 {
            cell.occupants.remove(Occupants::PERCEPTION);
        }
        self.hazard_removed = true;
        debug!("Removed hazard at {} from the map", monster);
    }
}

/// Stamp every object and perception zone onto a fresh grid.
fn build_grid(placements: &Placements) -> Grid {
    let mut grid = Grid::new(Cell::default());

    for object in placements.objects() {
        let cell = grid.get_mut(object.position);
        cell.occupants.insert(object.kind.occupant());
        if object.kind.is_hazardous() {
            cell.danger += 1;
        }
        for pos in object.perception_zone() {
            let cell = grid.get_mut(pos);
            cell.occupants.insert(Occupants::PERCEPTION);
            cell.danger += 1;
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample() -> Placements {
        Placements {
            agent: Position::new(0, 0),
            nemesis: Position::new(7, 1),
            monster: Position::new(4, 4),
            rock: Position::new(2, 6),
            goal: Position::new(8, 8),
            safe_haven: Position::new(0, 8),
        }
    }

    #[test]
    fn danger_counts_overlapping_zones() {
        let mut placements = sample();
        placements.rock = Position::new(4, 5);
        let map = GameMap::initialize(&placements).unwrap();

        assert_eq!(map.cell(Position::new(4, 4)).danger, 1);
        assert_eq!(map.cell(Position::new(3, 4)).danger, 1);
        // Rock inside the Monster's ring: own danger plus the zone.
        assert_eq!(map.cell(Position::new(4, 5)).danger, 2);
        assert_eq!(map.cell(Position::new(3, 3)).danger, 0);
        assert_eq!(map.cell(Position::new(6, 1)).danger, 1);
        assert_eq!(map.cell(Position::new(7, 1)).danger, 1);
        assert_eq!(map.cell(Position::new(0, 0)).danger, 0);
    }

    #[test]
    fn monster_on_rock_stacks_danger() {
        let mut placements = sample();
        placements.rock = placements.monster;
        let map = GameMap::initialize(&placements).unwrap();
        let cell = map.cell(placements.monster);
        assert_eq!(cell.kind(), CellKind::MonsterOnRock);
        assert_eq!(cell.danger, 2);
    }

    #[test]
    fn conflicting_placement_is_rejected() {
        let mut placements = sample();
        placements.goal = Position::new(4, 3);
        let err = GameMap::initialize(&placements).unwrap_err();
        assert_eq!(
            err,
            MapError::Conflict {
                object: ObjectKind::Goal,
                other: ObjectKind::Hazard,
                position: Position::new(4, 3),
            }
        );
    }

    #[test]
    fn builder_requires_every_object() {
        let mut builder = MapBuilder::new();
        builder
            .try_place(MapObject::new(ObjectKind::Player, Position::new(0, 0)))
            .unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            MapError::MissingObject(ObjectKind::Nemesis)
        );
    }

    #[test]
    fn removing_the_hazard_clears_its_glyphs_only() {
        let mut placements = sample();
        placements.rock = placements.monster;
        let mut map = GameMap::initialize(&placements).unwrap();
        map.remove_hazard();

        assert!(map.hazard_removed());
        assert_eq!(map.cell(placements.monster).kind(), CellKind::Rock);
        assert_eq!(map.cell(Position::new(3, 4)).kind(), CellKind::Empty);
        assert_eq!(map.cell(Position::new(3, 4)).danger, 1);
    }
}
