pub const GRID_WIDTH: u8 = 9;
pub const GRID_HEIGHT: u8 = 9;
pub const GRID_CELLS: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Hard limit on the number of steps a backtracking branch may take.
pub const MAX_BRANCH_DEPTH: u32 = 24;

/// Number of trials run per algorithm by the statistics harness.
pub const DEFAULT_TRIALS: usize = 1000;

/// Neighbor offsets `(row, col)` for 8-directional movement.
///
/// The order is fixed so both engines expand neighbors identically.
pub const NEIGHBORS_8: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (0, 1),
    (1, -1),
    (-1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
];

/// Cardinal offsets: the Monster's perception ring.
pub const NEIGHBORS_4: [(i8, i8); 4] = [(1, 0), (0, 1), (0, -1), (-1, 0)];

/// Diagonal offsets: cells from which the Monster can be approached safely.
pub const DIAGONALS_4: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Footprint of the adjacent sensor: the eight surrounding cells.
pub const ADJACENT_FOOTPRINT: [(i8, i8); 8] = NEIGHBORS_8;

/// Footprint of the extended sensor: the eight surrounding cells plus the
/// four cells two steps away along the cardinal axes.
pub const EXTENDED_FOOTPRINT: [(i8, i8); 12] = [
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
    (1, 1),
    (1, 0),
    (0, 1),
    (1, -1),
    (-1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
];
