//! Best-first engine.
//!
//! Explores states (cell plus route flags) in order of steps taken, breaking
//! ties on the Chebyshev distance left to the target. Because a cell may be
//! worth revisiting once the Monster is gone, each flag combination gets its
//! own cost and parent. The first time the target is generated the route to
//! it is a shortest one; if the Monster is still alive on it, the rest of
//! that cost level is finished in case another arrival has neutralized it.

use super::open_set::*;
use super::scratch::*;
use super::*;
use crate::constants::*;
use crate::error::PriorityError;
use crate::hazard::*;
use crate::sensor::Sensor;
use crate::visibility::*;

pub struct BestFirst<'a> {
    map: &'a GameMap,
    visibility: VisibilityMap<'a>,
    stats: SearchStats,
}

impl<'a> BestFirst<'a> {
    pub fn new(map: &'a GameMap, sensor: &'a dyn Sensor) -> Self {
        let mut visibility = VisibilityMap::new(map.grid(), sensor);
        visibility.reveal(map.safe_haven());

        BestFirst {
            map,
            visibility,
            stats: SearchStats::default(),
        }
    }

    pub fn visibility(&self) -> &VisibilityMap<'a> {
        &self.visibility
    }

    /// Shortest route from `start` to `target` for a route that enters
    /// `start` carrying `flags`.
    pub fn find_route(
        &mut self,
        start: Position,
        flags: RouteFlags,
        target: Position,
    ) -> Result<Option<Route>, PriorityError> {
        self.stats.sub_searches += 1;

        self.visibility.reveal(start);
        self.visibility.scan(start);
        let origin = SearchNode::new(start, flags.arrive(start, &self.visibility));

        if start == target {
            return Ok(Some(Route::single(start, origin.flags.hazard_alive)));
        }

        let mut records = NodeTable::new(NodeRecord::default());
        let mut open = OpenSet::new();

        records.get_mut(origin).cost = 0;
        open.push(origin, (0, start.distance_to(target) as u32))?;

        let mut reached: Option<(SearchNode, u32)> = None;

        while let Some((node, (cost, _))) = open.pop() {
            if matches!(reached, Some((_, found)) if cost >= found) {
                break;
            }

            let record = records.get_mut(node);
            record.closed = true;
            let next_cost = record.cost + 1;
            self.stats.nodes_expanded += 1;

            for next_position in node.position.around(&NEIGHBORS_8) {
                self.visibility.scan(next_position);

                let Some(next_flags) = step(node.flags, next_position, &self.visibility) else {
                    continue;
                };
                let next = SearchNode::new(next_position, next_flags);

                if next_position == target {
                    let better = match reached {
                        Some((found, found_cost)) => shorter_or_safer(
                            next_cost,
                            next_flags.hazard_alive,
                            found_cost,
                            found.flags.hazard_alive,
                        ),
                        None => true,
                    };
                    if better {
                        records.set(
                            next,
                            NodeRecord {
                                cost: next_cost,
                                parent: Some(node),
                                closed: true,
                            },
                        );
                        reached = Some((next, next_cost));
                    }
                    continue;
                }

                let record = records.get_mut(next);
                if record.closed || next_cost >= record.cost {
                    continue;
                }
                record.cost = next_cost;
                record.parent = Some(node);
                open.push(next, (next_cost, next_position.distance_to(target) as u32))?;
            }

            if matches!(reached, Some((found, _)) if !found.flags.hazard_alive) {
                break;
            }
        }

        let Some((found, found_cost)) = reached else {
            debug!("Best-first {} -> {}: unreachable", start, target);
            return Ok(None);
        };
        debug!(
            "Best-first {} -> {}: {} steps, {} open",
            start,
            target,
            found_cost,
            open.len()
        );
        Ok(
            trace_back(found, origin, |n| records.get(n).parent, |n| n.position).map(|path| Route {
                path,
                hazard_alive: found.flags.hazard_alive,
            }),
        )
    }

    /// Relaxation only ever lowers a key, so an open-set error is a bug.
    fn solve(&mut self, start: Position, flags: RouteFlags, target: Position) -> Option<Route> {
        self.find_route(start, flags, target)
            .unwrap_or_else(|err| panic!("best-first {} -> {}: {}", start, target, err))
    }
}

impl<'a> PathSearch for BestFirst<'a> {
    fn name(&self) -> &str {
        Algorithm::BestFirst.name()
    }

    fn execute(&mut self, start: Position, target: Position) -> SearchOutcome {
        if let Some(outcome) = trivial_outcome(self.map, start, target) {
            return outcome;
        }

        let haven = self.map.safe_haven();
        let direct = self.solve(start, RouteFlags::START, target);

        let via = if haven != start && haven != target {
            self.solve(start, RouteFlags::START, haven).and_then(|to_haven| {
                let carried = RouteFlags::new(true, to_haven.hazard_alive);
                let onward = self.solve(haven, carried, target)?;
                Some(to_haven.splice(onward))
            })
        } else {
            None
        };

        choose_route(direct, via).into()
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
