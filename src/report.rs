//! Plain-text report of a single search run.

use crate::map::GameMap;
use crate::search::SearchOutcome;
use std::fmt;
use std::time::Duration;

pub struct Report {
    outcome: SearchOutcome,
    /// Copy of the map as it should be drawn, Monster removed if the route
    /// neutralized it.
    map: GameMap,
    elapsed: Duration,
}

impl Report {
    pub fn new(map: &GameMap, outcome: SearchOutcome, elapsed: Duration) -> Self {
        let mut map = map.clone();
        if outcome.is_win() && !outcome.hazard_alive {
            map.remove_hazard();
        }
        Report {
            outcome,
            map,
            elapsed,
        }
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.outcome.is_win() {
            return writeln!(f, "Lose");
        }

        writeln!(f, "Win")?;
        writeln!(f, "{}", self.outcome.steps())?;
        for pos in &self.outcome.path {
            write!(f, "{} ", pos)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.map.grid().with_path(&self.outcome.path).render())?;
        write!(f, "{} ms", self.elapsed.as_millis())
    }
}
