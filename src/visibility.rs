//! The agent's partial knowledge of the grid.
//!
//! Every cell starts unknown. Scanning a position copies the cells under the
//! sensor footprint out of the real grid; a revealed cell is never replaced.
//! Each position is scanned at most once per session.

use crate::grid::*;
use crate::location::*;
use crate::sensor::*;
use log::*;

pub struct VisibilityMap<'a> {
    grid: &'a Grid,
    sensor: &'a dyn Sensor,
    known: GridArray<Option<Cell>>,
    scanned: GridArray<bool>,
    scans: u32,
}

impl<'a> VisibilityMap<'a> {
    pub fn new(grid: &'a Grid, sensor: &'a dyn Sensor) -> Self {
        VisibilityMap {
            grid,
            sensor,
            known: GridArray::new(None),
            scanned: GridArray::new(false),
            scans: 0,
        }
    }

    /// The known contents of a cell, if it has been revealed.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.known.get(pos).as_ref()
    }

    #[inline]
    pub fn is_known(&self, pos: Position) -> bool {
        self.known.get(pos).is_some()
    }

    /// Reveal a single cell without scanning (the agent's own cell, or a
    /// landmark whose position is known up front).
    pub fn reveal(&mut self, pos: Position) -> bool {
        let slot = self.known.get_mut(pos);
        if slot.is_none() {
            *slot = Some(*self.grid.get(pos));
            true
        } else {
            false
        }
    }

    /// Scan from `pos`, revealing every cell under the sensor footprint.
    /// Returns the number of newly revealed cells; repeated scans are free.
    pub fn scan(&mut self, pos: Position) -> usize {
        if *self.scanned.get(pos) {
            return 0;
        }
        self.scanned.set(pos, true);
        self.scans += 1;

        let sensor = self.sensor;
        let revealed = pos
            .around(sensor.footprint())
            .filter(|&cell| self.reveal(cell))
            .count();

        trace!(
            "Scanned {} with {} sensor: {} new cells",
            pos,
            sensor.name(),
            revealed
        );
        revealed
    }

    /// Reveal the whole grid at once.
    pub fn reveal_all(&mut self) {
        for pos in Position::all() {
            self.reveal(pos);
        }
    }

    /// Number of distinct positions scanned so far.
    pub fn scans(&self) -> u32 {
        self.scans
    }

    pub fn known_count(&self) -> usize {
        self.known.iter().filter(|(_, cell)| cell.is_some()).count()
    }

    pub fn sensor(&self) -> &dyn Sensor {
        self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let mut grid = Grid::new(Cell::default());
        grid.get_mut(Position::new(2, 2)).danger = 1;
        grid
    }

    #[test]
    fn starts_unknown() {
        let grid = grid();
        let vis = VisibilityMap::new(&grid, &SensorProfile::Adjacent);
        assert_eq!(vis.known_count(), 0);
        assert!(vis.get(Position::new(0, 0)).is_none());
    }

    #[test]
    fn adjacent_scan_reveals_neighbours_not_centre() {
        let grid = grid();
        let mut vis = VisibilityMap::new(&grid, &SensorProfile::Adjacent);
        assert_eq!(vis.scan(Position::new(1, 1)), 8);
        assert!(!vis.is_known(Position::new(1, 1)));
        assert_eq!(vis.get(Position::new(2, 2)).map(|c| c.danger), Some(1));
        assert!(!vis.is_known(Position::new(3, 1)));
        assert_eq!(vis.scan(Position::new(1, 1)), 0);
        assert_eq!(vis.scans(), 1);
    }

    #[test]
    fn extended_scan_reaches_two_cells_out() {
        let grid = grid();
        let mut vis = VisibilityMap::new(&grid, &SensorProfile::Extended);
        assert_eq!(vis.scan(Position::new(4, 4)), 12);
        assert!(vis.is_known(Position::new(6, 4)));
        assert!(vis.is_known(Position::new(4, 2)));
        assert!(!vis.is_known(Position::new(6, 6)));
        // Clipped at the corner: 3 neighbours plus 2 two-step cells.
        assert_eq!(vis.scan(Position::new(0, 0)), 5);
    }

    #[test]
    fn revealed_cells_are_not_replaced() {
        let grid = grid();
        let mut vis = VisibilityMap::new(&grid, &SensorProfile::Adjacent);
        assert!(vis.reveal(Position::new(2, 2)));
        assert!(!vis.reveal(Position::new(2, 2)));
        assert_eq!(vis.scan(Position::new(1, 1)), 7);
    }
}
