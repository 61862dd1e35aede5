//! Hazard rules shared by both search engines.
//!
//! A route carries two flags: whether the agent has picked up the resource
//! at the safe haven, and whether the Monster is still alive. Entering a cell
//! updates the flags in a fixed order: first the safe haven hands over the
//! resource, then a resource holder standing diagonally next to the Monster
//! neutralizes it. Both checks only look at cells the agent has revealed;
//! an unknown cell never counts as the Monster.

use crate::constants::*;
use crate::grid::*;
use crate::location::*;
use crate::visibility::*;
use log::*;
use serde::{Deserialize, Serialize};

/// True if a revealed diagonal neighbour of `pos` holds the Monster.
pub fn is_hazard_diagonal(pos: Position, vis: &VisibilityMap) -> bool {
    pos.around(&DIAGONALS_4)
        .any(|diagonal| vis.get(diagonal).map_or(false, Cell::holds_monster))
}

/// True if `pos` sits in the Monster's perception ring, or on the Monster
/// itself, as far as the agent can tell.
pub fn is_hazard_perceived(pos: Position, vis: &VisibilityMap) -> bool {
    vis.get(pos).map_or(false, Cell::holds_monster)
        || pos
            .around(&NEIGHBORS_4)
            .any(|near| vis.get(near).map_or(false, Cell::holds_monster))
}

/// Per-route state carried through a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteFlags {
    pub has_resource: bool,
    pub hazard_alive: bool,
}

impl RouteFlags {
    /// Number of distinct flag combinations.
    pub const COUNT: usize = 4;

    /// A fresh route: no resource, Monster alive.
    pub const START: RouteFlags = RouteFlags {
        has_resource: false,
        hazard_alive: true,
    };

    pub fn new(has_resource: bool, hazard_alive: bool) -> Self {
        RouteFlags {
            has_resource,
            hazard_alive,
        }
    }

    /// Dense index in `0..COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        (self.has_resource as usize) << 1 | self.hazard_alive as usize
    }

    pub fn from_index(index: usize) -> Self {
        RouteFlags::new(index & 2 != 0, index & 1 != 0)
    }

    /// Flags after the agent arrives on `pos`.
    pub fn arrive(self, pos: Position, vis: &VisibilityMap) -> RouteFlags {
        let mut flags = self;

        if vis.get(pos).map_or(false, Cell::is_safe_haven) {
            flags.has_resource = true;
        }

        if flags.has_resource && flags.hazard_alive && is_hazard_diagonal(pos, vis) {
            debug!("Hazard neutralized from {}", pos);
            flags.hazard_alive = false;
        }

        flags
    }
}

impl Default for RouteFlags {
    fn default() -> Self {
        RouteFlags::START
    }
}

/// Step from a cell with flags `from` onto `to`. Returns the flags on
/// arrival, or `None` if the move is not allowed.
///
/// A cell is enterable when it is known and either free of danger, or only
/// inside the Monster's ring after the Monster has been neutralized. Callers
/// scan `to` first so its surroundings are known when this is evaluated.
pub fn step(from: RouteFlags, to: Position, vis: &VisibilityMap) -> Option<RouteFlags> {
    let cell = vis.get(to)?;

    let allowed = match cell.danger {
        0 => true,
        1 => !from.hazard_alive && is_hazard_perceived(to, vis),
        _ => false,
    };

    if allowed {
        Some(from.arrive(to, vis))
    } else {
        trace!("Step onto {} rejected (danger {})", to, cell.danger);
        None
    }
}
