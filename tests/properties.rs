//! Randomized checks over generated maps.

use haven_search::config::SearchConfig;
use haven_search::constants::MAX_BRANCH_DEPTH;
use haven_search::constants::NEIGHBORS_8;
use haven_search::hazard::*;
use haven_search::map::*;
use haven_search::search::*;
use haven_search::sensor::SensorProfile;
use haven_search::visibility::VisibilityMap;
use haven_search::Position;
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAPS: usize = 150;

fn maps(seed: u64) -> impl Iterator<Item = GameMap> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..MAPS).map(move |_| GameMap::generate(&mut rng).unwrap())
}

/// Exact shortest leg over (cell, flags) states with the whole grid revealed.
fn oracle_leg(
    vis: &VisibilityMap,
    start: Position,
    flags: RouteFlags,
    target: Position,
) -> Option<(usize, bool)> {
    let origin = (start, flags.arrive(start, vis));
    let states = bfs(
        &origin,
        |&(pos, flags)| {
            pos.around(&NEIGHBORS_8)
                .filter_map(|next| step(flags, next, vis).map(|f| (next, f)))
                .collect::<Vec<_>>()
        },
        |&(pos, _)| pos == target,
    )?;
    let (_, last) = *states.last()?;
    Some((states.len() - 1, last.hazard_alive))
}

/// Shortest composed route length, direct or through the haven.
fn oracle_steps(map: &GameMap) -> Option<usize> {
    let (start, goal, haven) = (map.start(), map.goal(), map.safe_haven());
    if !map.cell(start).is_safe() {
        return None;
    }

    let sensor = SensorProfile::Adjacent;
    let mut vis = VisibilityMap::new(map.grid(), &sensor);
    vis.reveal_all();

    let direct = oracle_leg(&vis, start, RouteFlags::START, goal).map(|(steps, _)| steps);
    let via = if haven != start && haven != goal {
        oracle_leg(&vis, start, RouteFlags::START, haven).and_then(|(to_haven, alive)| {
            oracle_leg(&vis, haven, RouteFlags::new(true, alive), goal)
                .map(|(onward, _)| to_haven + onward)
        })
    } else {
        None
    };

    match (direct, via) {
        (Some(d), Some(v)) => Some(d.min(v)),
        (d, v) => d.or(v),
    }
}

/// Walk the route with the real grid revealed and return the final
/// Monster state, or `None` if some step is illegal.
fn replay(map: &GameMap, outcome: &SearchOutcome) -> Option<bool> {
    let sensor = SensorProfile::Adjacent;
    let mut vis = VisibilityMap::new(map.grid(), &sensor);
    vis.reveal_all();

    let (first, rest) = outcome.path.split_first()?;
    let mut flags = RouteFlags::START.arrive(*first, &vis);
    for &pos in rest {
        flags = step(flags, pos, &vis)?;
    }
    Some(flags.hazard_alive)
}

#[test]
fn best_first_never_loses_to_backtracking() {
    let config = SearchConfig::default();
    let mut compared = 0;

    for map in maps(11) {
        let best_first = run_search(Algorithm::BestFirst, &map, &config);
        let backtracking = run_search(Algorithm::Backtracking, &map, &config);

        if backtracking.is_win() {
            assert!(best_first.is_win(), "{}", map.placements().to_scenario());
            assert!(
                best_first.steps() <= backtracking.steps(),
                "{}: {} > {}",
                map.placements().to_scenario(),
                best_first.steps(),
                backtracking.steps()
            );
            compared += 1;
        }
    }
    assert!(compared > MAPS / 2);
}

#[test]
fn best_first_matches_exhaustive_oracle() {
    let config = SearchConfig::default();
    for map in maps(23) {
        let outcome = run_search(Algorithm::BestFirst, &map, &config);
        let expected = oracle_steps(&map);
        assert_eq!(
            outcome.is_win().then(|| outcome.steps()),
            expected,
            "{}",
            map.placements().to_scenario()
        );
    }
}

#[test]
fn backtracking_matches_exhaustive_oracle_within_the_depth_cap() {
    let config = SearchConfig::default();
    let mut checked = 0;

    for map in maps(29) {
        let outcome = run_search(Algorithm::Backtracking, &map, &config);
        let scenario = map.placements().to_scenario();
        match oracle_steps(&map) {
            Some(steps) if steps <= MAX_BRANCH_DEPTH as usize => {
                assert!(outcome.is_win(), "{}", scenario);
                assert_eq!(outcome.steps(), steps, "{}", scenario);
                checked += 1;
            }
            Some(_) => {}
            None => assert!(!outcome.is_win(), "{}", scenario),
        }
    }
    assert!(checked > MAPS / 2);
}

#[test]
fn engines_agree_on_the_monster() {
    let config = SearchConfig::default();
    for map in maps(53) {
        let best_first = run_search(Algorithm::BestFirst, &map, &config);
        let backtracking = run_search(Algorithm::Backtracking, &map, &config);
        if best_first.is_win() && backtracking.is_win() {
            assert_eq!(
                best_first.hazard_alive,
                backtracking.hazard_alive,
                "{}",
                map.placements().to_scenario()
            );
        }
    }
}

#[test]
fn routes_replay_legally() {
    for map in maps(37) {
        for algorithm in Algorithm::ALL {
            let outcome = run_search(algorithm, &map, &SearchConfig::default());
            if !outcome.is_win() {
                continue;
            }
            assert_eq!(outcome.path.first(), Some(&map.start()));
            assert_eq!(outcome.path.last(), Some(&map.goal()));
            assert_eq!(outcome.steps(), outcome.path.len() - 1);
            assert!(outcome.path.windows(2).all(|w| w[0].is_adjacent(w[1])));
            assert_eq!(
                replay(&map, &outcome),
                Some(outcome.hazard_alive),
                "{} via {}",
                map.placements().to_scenario(),
                algorithm.name()
            );
        }
    }
}

#[test]
fn repeated_runs_agree() {
    let config = SearchConfig::default();
    for map in maps(5) {
        for algorithm in Algorithm::ALL {
            let first = run_search(algorithm, &map, &config);
            let second = run_search(algorithm, &map, &config);
            assert_eq!(first.steps(), second.steps());
            assert_eq!(first.hazard_alive, second.hazard_alive);
        }
    }
}

#[test]
fn sensor_range_does_not_change_route_length() {
    let adjacent = SearchConfig::with_sensor(SensorProfile::Adjacent);
    let extended = SearchConfig::with_sensor(SensorProfile::Extended);
    for map in maps(41) {
        for algorithm in Algorithm::ALL {
            let near = run_search(algorithm, &map, &adjacent);
            let far = run_search(algorithm, &map, &extended);
            assert_eq!(near.is_win(), far.is_win());
            assert_eq!(near.steps(), far.steps());
        }
    }
}
