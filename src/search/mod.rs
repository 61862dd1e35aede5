//! Route search over a partially known grid.
//!
//! Two engines answer the same question: the shortest safe route from the
//! agent to the goal. Each one solves up to three sub-problems (the direct
//! route, start to safe haven, safe haven to goal) and the composer keeps
//! whichever of the direct route and the detour through the haven is
//! shorter. Among routes of equal length, both engines and the composer
//! prefer one that leaves the Monster neutralized.

pub mod backtracking;
pub mod best_first;
pub mod open_set;
pub mod scratch;

pub use backtracking::*;
pub use best_first::*;

use crate::config::SearchConfig;
use crate::location::*;
use crate::map::GameMap;
use log::*;
use serde::{Deserialize, Serialize};

/// A route for one sub-problem, both endpoints included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: Vec<Position>,
    /// Whether the Monster is still alive at the end of the route.
    pub hazard_alive: bool,
}

impl Route {
    pub fn single(position: Position, hazard_alive: bool) -> Self {
        Route {
            path: vec![position],
            hazard_alive,
        }
    }

    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Shorter, or as long and neutralizing where `other` is not.
    pub fn improves_on(&self, other: &Route) -> bool {
        shorter_or_safer(self.steps(), self.hazard_alive, other.steps(), other.hazard_alive)
    }

    /// Append `rest`, which must start where this route ends.
    pub fn splice(mut self, rest: Route) -> Route {
        debug_assert_eq!(self.path.last(), rest.path.first());
        self.path.extend(rest.path.into_iter().skip(1));
        Route {
            path: self.path,
            hazard_alive: self.hazard_alive && rest.hazard_alive,
        }
    }
}

/// Final answer of a search session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Start to goal inclusive; empty when the goal cannot be reached.
    pub path: Vec<Position>,
    pub hazard_alive: bool,
}

impl SearchOutcome {
    pub fn no_path() -> Self {
        SearchOutcome {
            path: Vec::new(),
            hazard_alive: true,
        }
    }

    pub fn is_win(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves; zero for a lost search.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl From<Option<Route>> for SearchOutcome {
    fn from(route: Option<Route>) -> Self {
        match route {
            Some(route) => SearchOutcome {
                path: route.path,
                hazard_alive: route.hazard_alive,
            },
            None => SearchOutcome::no_path(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BestFirst,
    Backtracking,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::BestFirst, Algorithm::Backtracking];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BestFirst => "best_first",
            Algorithm::Backtracking => "backtracking",
        }
    }
}

/// Work counters for a search session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub sub_searches: u32,
    pub nodes_expanded: u64,
    pub nodes_pruned: u64,
}

pub trait PathSearch {
    fn name(&self) -> &str;

    /// Find the shortest safe route from `start` to `target`.
    fn execute(&mut self, start: Position, target: Position) -> SearchOutcome;

    fn stats(&self) -> SearchStats;
}

/// Route ordering shared by the engines: fewer steps first, then a dead
/// Monster over a live one.
pub(crate) fn shorter_or_safer<S: Ord>(
    steps: S,
    hazard_alive: bool,
    than_steps: S,
    than_alive: bool,
) -> bool {
    match steps.cmp(&than_steps) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Equal => than_alive && !hazard_alive,
        std::cmp::Ordering::Greater => false,
    }
}

/// Keep the detour if it improves on the direct route; a full tie keeps the
/// direct route.
pub fn choose_route(direct: Option<Route>, via: Option<Route>) -> Option<Route> {
    match (direct, via) {
        (Some(direct), Some(via)) => {
            if via.improves_on(&direct) {
                Some(via)
            } else {
                Some(direct)
            }
        }
        (direct, via) => direct.or(via),
    }
}

/// Outcomes that need no search at all.
pub(crate) fn trivial_outcome(map: &GameMap, start: Position, target: Position) -> Option<SearchOutcome> {
    if !map.cell(start).is_safe() {
        debug!("Start {} is in danger, no route", start);
        return Some(SearchOutcome::no_path());
    }
    if start == target {
        return Some(SearchOutcome {
            path: vec![start],
            hazard_alive: true,
        });
    }
    None
}

/// Run one engine from the map's start to its goal.
pub fn run_search(algorithm: Algorithm, map: &GameMap, config: &SearchConfig) -> SearchOutcome {
    let sensor = config.sensor;
    let mut engine: Box<dyn PathSearch + '_> = match algorithm {
        Algorithm::BestFirst => Box::new(BestFirst::new(map, &sensor)),
        Algorithm::Backtracking => Box::new(Backtracking::new(map, &sensor, config.depth_cap)),
    };

    let outcome = engine.execute(map.start(), map.goal());
    let stats = engine.stats();
    debug!(
        "{}: {} steps, sub_searches={}, expanded={}, pruned={}",
        engine.name(),
        outcome.steps(),
        stats.sub_searches,
        stats.nodes_expanded,
        stats.nodes_pruned
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(cells: &[(u8, u8)], hazard_alive: bool) -> Route {
        Route {
            path: cells.iter().map(|&(r, c)| Position::new(r, c)).collect(),
            hazard_alive,
        }
    }

    #[test]
    fn splice_joins_at_the_shared_cell() {
        let leg1 = route(&[(0, 0), (1, 1)], true);
        let leg2 = route(&[(1, 1), (2, 2), (3, 3)], false);
        let joined = leg1.splice(leg2);
        assert_eq!(joined.steps(), 3);
        assert_eq!(joined.path.len(), 4);
        assert!(!joined.hazard_alive);
    }

    #[test]
    fn detour_must_be_shorter_or_neutralize() {
        let direct = route(&[(0, 0), (1, 1), (2, 2)], true);
        let tie = route(&[(0, 0), (1, 0), (2, 2)], true);
        assert_eq!(
            choose_route(Some(direct.clone()), Some(tie)),
            Some(direct.clone())
        );

        let neutralizing = route(&[(0, 0), (1, 0), (2, 2)], false);
        assert_eq!(
            choose_route(Some(direct.clone()), Some(neutralizing.clone())),
            Some(neutralizing)
        );

        let safe_direct = route(&[(0, 0), (1, 1), (2, 2)], false);
        let live_tie = route(&[(0, 0), (1, 0), (2, 2)], true);
        assert_eq!(
            choose_route(Some(safe_direct.clone()), Some(live_tie)),
            Some(safe_direct)
        );

        let shorter = route(&[(0, 0), (2, 2)], false);
        assert_eq!(
            choose_route(Some(direct.clone()), Some(shorter.clone())),
            Some(shorter.clone())
        );
        assert_eq!(choose_route(None, Some(shorter.clone())), Some(shorter));
        assert_eq!(choose_route(Some(direct.clone()), None), Some(direct));
        assert_eq!(choose_route(None, None), None);
    }

    #[test]
    fn longer_neutralizing_route_does_not_win() {
        let short = route(&[(0, 0), (1, 1)], true);
        let long = route(&[(0, 0), (1, 0), (1, 1)], false);
        assert!(!long.improves_on(&short));
        assert!(short.improves_on(&long));
        assert!(!short.improves_on(&short));
    }

    #[test]
    fn empty_route_is_a_loss() {
        let outcome = SearchOutcome::from(None);
        assert!(!outcome.is_win());
        assert!(outcome.hazard_alive);
        assert_eq!(outcome.steps(), 0);
    }
}
