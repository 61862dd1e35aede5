//! Map objects and their placement rules.
//!
//! Each object kind carries a fixed `PlacementRule`: which other kinds it may
//! share a cell with, and whose danger zones it must stay out of. Validation
//! is a pure function over pairs of placed objects, so the order in which a
//! map is assembled never changes which layouts are accepted.

use crate::constants::*;
use crate::grid::Occupants;
use crate::location::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// The searching agent.
    Player,
    /// Stationary enemy; its whole 8-neighbourhood is dangerous.
    Nemesis,
    /// The Monster; dangerous along its cardinal ring, can be neutralized.
    Hazard,
    /// The Rock; only dangerous on its own cell.
    Obstacle,
    Goal,
    /// The SafeHaven, where the one-time resource is picked up.
    Waypoint,
}

/// Placement order used when assembling maps from a full set of positions.
pub const PLACEMENT_ORDER: [ObjectKind; 6] = [
    ObjectKind::Player,
    ObjectKind::Nemesis,
    ObjectKind::Hazard,
    ObjectKind::Obstacle,
    ObjectKind::Goal,
    ObjectKind::Waypoint,
];

pub struct PlacementRule {
    /// Kinds allowed on the same cell.
    pub shares_with: &'static [ObjectKind],
    /// Kinds whose danger zone must not cover this object.
    pub avoids_zone_of: &'static [ObjectKind],
}

impl ObjectKind {
    pub fn rule(self) -> PlacementRule {
        match self {
            ObjectKind::Player => PlacementRule {
                shares_with: &[ObjectKind::Waypoint],
                avoids_zone_of: &[],
            },
            ObjectKind::Nemesis => PlacementRule {
                shares_with: &[],
                avoids_zone_of: &[],
            },
            ObjectKind::Hazard => PlacementRule {
                shares_with: &[ObjectKind::Obstacle],
                avoids_zone_of: &[],
            },
            ObjectKind::Obstacle => PlacementRule {
                shares_with: &[ObjectKind::Hazard],
                avoids_zone_of: &[],
            },
            ObjectKind::Goal => PlacementRule {
                shares_with: &[],
                avoids_zone_of: &[ObjectKind::Hazard, ObjectKind::Nemesis],
            },
            ObjectKind::Waypoint => PlacementRule {
                shares_with: &[ObjectKind::Player],
                avoids_zone_of: &[ObjectKind::Hazard, ObjectKind::Nemesis],
            },
        }
    }

    pub fn occupant(self) -> Occupants {
        match self {
            ObjectKind::Player => Occupants::AGENT,
            ObjectKind::Nemesis => Occupants::NEMESIS,
            ObjectKind::Hazard => Occupants::MONSTER,
            ObjectKind::Obstacle => Occupants::ROCK,
            ObjectKind::Goal => Occupants::GOAL,
            ObjectKind::Waypoint => Occupants::SAFE_HAVEN,
        }
    }

    /// Hazardous objects add one danger to the cell they stand on.
    pub fn is_hazardous(self) -> bool {
        matches!(
            self,
            ObjectKind::Nemesis | ObjectKind::Hazard | ObjectKind::Obstacle
        )
    }

    /// Offsets of the cells this object makes dangerous around itself.
    pub fn perception_offsets(self) -> &'static [(i8, i8)] {
        match self {
            ObjectKind::Nemesis => &NEIGHBORS_8,
            ObjectKind::Hazard => &NEIGHBORS_4,
            _ => &[],
        }
    }

    /// Does the danger zone of an object of this kind at `own` cover `other`?
    pub fn zone_covers(self, own: Position, other: Position) -> bool {
        let dr = (own.row() as i8 - other.row() as i8).abs();
        let dc = (own.col() as i8 - other.col() as i8).abs();
        match self {
            ObjectKind::Nemesis => dr <= 1 && dc <= 1,
            ObjectKind::Hazard => dr + dc <= 1,
            _ => own == other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
    pub kind: ObjectKind,
    pub position: Position,
}

impl MapObject {
    pub fn new(kind: ObjectKind, position: Position) -> Self {
        MapObject { kind, position }
    }

    /// The cells made dangerous by this object's perception zone.
    pub fn perception_zone(&self) -> impl Iterator<Item = Position> {
        self.position.around(self.kind.perception_offsets())
    }

    /// True if the two objects cannot coexist on the map.
    pub fn conflicts_with(&self, other: &MapObject) -> bool {
        if self.kind == other.kind {
            return true;
        }
        let own_rule = self.kind.rule();
        let other_rule = other.kind.rule();

        if self.position == other.position && !own_rule.shares_with.contains(&other.kind) {
            return true;
        }
        if own_rule.avoids_zone_of.contains(&other.kind)
            && other.kind.zone_covers(other.position, self.position)
        {
            return true;
        }
        other_rule.avoids_zone_of.contains(&self.kind)
            && self.kind.zone_covers(self.position, other.position)
    }
}
