//! Backtracking engine.
//!
//! Depth-first branch-and-bound over the grid. Each sub-problem runs two
//! passes over fresh tables: a flood that only asks whether the target is
//! reachable at all, then an optimizing descent that keeps the shortest
//! route found. The descent prunes a branch when
//!
//! - its depth plus the Chebyshev distance left cannot beat the best route,
//! - it reaches a state no faster than an earlier branch did, or
//! - it runs past the depth cap.
//!
//! While the best route still leaves the Monster alive, branches that could
//! only tie it stay open, since a tie that neutralizes the Monster wins.
//!
//! Depths of the second leg of a detour continue from where the first leg
//! ended, so the cap applies to the whole route.

use super::scratch::*;
use super::*;
use crate::constants::*;
use crate::hazard::*;
use crate::sensor::Sensor;
use crate::visibility::*;

pub struct Backtracking<'a> {
    map: &'a GameMap,
    visibility: VisibilityMap<'a>,
    depth_cap: u32,
    scratch: BranchScratch,
    /// Depth of the best route found in the current pass.
    minimum: u32,
    any_path_found: bool,
    origin: Position,
    best: Option<Route>,
    stats: SearchStats,
}

impl<'a> Backtracking<'a> {
    pub fn new(map: &'a GameMap, sensor: &'a dyn Sensor, depth_cap: u32) -> Self {
        let mut visibility = VisibilityMap::new(map.grid(), sensor);
        visibility.reveal(map.safe_haven());

        Backtracking {
            map,
            visibility,
            depth_cap,
            scratch: BranchScratch::new(),
            minimum: u32::MAX,
            any_path_found: false,
            origin: map.start(),
            best: None,
            stats: SearchStats::default(),
        }
    }

    pub fn visibility(&self) -> &VisibilityMap<'a> {
        &self.visibility
    }

    /// Shortest route from `start` to `target` for a route that enters
    /// `start` carrying `flags` after `depth` steps.
    pub fn find_route(
        &mut self,
        start: Position,
        flags: RouteFlags,
        target: Position,
        depth: u32,
    ) -> Option<Route> {
        self.stats.sub_searches += 1;

        self.visibility.reveal(start);
        self.visibility.scan(start);
        let flags = flags.arrive(start, &self.visibility);

        if start == target {
            return Some(Route::single(start, flags.hazard_alive));
        }

        self.origin = start;
        self.best = None;

        self.reset_pass();
        self.explore(start, depth, target, flags);
        if !self.any_path_found {
            debug!("Backtracking {} -> {}: unreachable", start, target);
            return None;
        }

        self.reset_pass();
        self.descend(start, depth, target, flags);

        match &self.best {
            Some(route) => debug!(
                "Backtracking {} -> {}: {} steps (expanded={}, pruned={})",
                start,
                target,
                route.steps(),
                self.stats.nodes_expanded,
                self.stats.nodes_pruned
            ),
            None => debug!(
                "Backtracking {} -> {}: nothing within {} steps",
                start, target, self.depth_cap
            ),
        }
        self.best.take()
    }

    fn reset_pass(&mut self) {
        self.scratch = BranchScratch::new();
        self.minimum = u32::MAX;
        self.any_path_found = false;
    }

    /// Existence pass. Cells stay marked once entered, so this is a flood.
    fn explore(&mut self, position: Position, depth: u32, target: Position, flags: RouteFlags) {
        if self.any_path_found {
            return;
        }
        if position == target {
            self.any_path_found = true;
            return;
        }
        self.scratch.visited.set(position, true);

        for next in position.around(&NEIGHBORS_8) {
            self.visibility.scan(next);
            if *self.scratch.visited.get(next) {
                continue;
            }
            if let Some(next_flags) = step(flags, next, &self.visibility) {
                self.explore(next, depth + 1, target, next_flags);
            }
        }
    }

    /// Optimizing pass.
    fn descend(&mut self, position: Position, depth: u32, target: Position, flags: RouteFlags) {
        let bound = depth.saturating_add(position.distance_to(target) as u32);
        let ties_open = self.best.as_ref().map_or(false, |best| best.hazard_alive);
        let beaten = bound > self.minimum || (bound == self.minimum && !ties_open);
        if beaten || depth > self.depth_cap {
            self.stats.nodes_pruned += 1;
            trace!("Pruned {} at depth {} (bound {})", position, depth, bound);
            return;
        }

        let node = SearchNode::new(position, flags);
        let best_depth = self.scratch.best_depth.get_mut(node);
        if *best_depth <= depth {
            self.stats.nodes_pruned += 1;
            return;
        }
        *best_depth = depth;
        self.stats.nodes_expanded += 1;

        if position == target {
            let improves = match &self.best {
                Some(best) => {
                    shorter_or_safer(depth, flags.hazard_alive, self.minimum, best.hazard_alive)
                }
                None => true,
            };
            if improves {
                self.record_route(target, flags);
                self.minimum = depth;
            }
            return;
        }

        self.while_visiting(position, |engine| {
            for next in position.around(&NEIGHBORS_8) {
                engine.visibility.scan(next);
                if *engine.scratch.visited.get(next) {
                    continue;
                }
                if let Some(next_flags) = step(flags, next, &engine.visibility) {
                    engine.scratch.parent.set(next, Some(position));
                    engine.descend(next, depth + 1, target, next_flags);
                }
            }
        });
    }

    /// Mark `position` as on the current branch for the duration of `body`.
    fn while_visiting<F>(&mut self, position: Position, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scratch.visited.set(position, true);
        body(self);
        self.scratch.visited.set(position, false);
    }

    fn record_route(&mut self, target: Position, flags: RouteFlags) {
        let parent = &self.scratch.parent;
        match trace_back(target, self.origin, |p| *parent.get(p), |p| p) {
            Some(path) => {
                self.any_path_found = true;
                self.best = Some(Route {
                    path,
                    hazard_alive: flags.hazard_alive,
                });
            }
            None => warn!("Discarded broken route to {}", target),
        }
    }
}

impl<'a> PathSearch for Backtracking<'a> {
    fn name(&self) -> &str {
        Algorithm::Backtracking.name()
    }

    fn execute(&mut self, start: Position, target: Position) -> SearchOutcome {
        if let Some(outcome) = trivial_outcome(self.map, start, target) {
            return outcome;
        }

        let haven = self.map.safe_haven();
        let mut via = None;

        if haven != start && haven != target {
            if let Some(to_haven) = self.find_route(start, RouteFlags::START, haven, 0) {
                let carried = RouteFlags::new(true, to_haven.hazard_alive);
                let spent = to_haven.steps() as u32;
                if let Some(onward) = self.find_route(haven, carried, target, spent) {
                    via = Some(to_haven.splice(onward));
                }
            }
        }

        let direct = self.find_route(start, RouteFlags::START, target, 0);
        choose_route(direct, via).into()
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
