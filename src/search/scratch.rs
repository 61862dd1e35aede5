//! Per-sub-problem bookkeeping tables.
//!
//! A fresh set of tables is allocated for every sub-problem, so nothing one
//! search writes can leak into the next.

use crate::constants::*;
use crate::grid::*;
use crate::hazard::*;
use crate::location::*;
use log::*;

/// A search state: a cell plus the flags of the route that reached it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchNode {
    pub position: Position,
    pub flags: RouteFlags,
}

impl SearchNode {
    pub fn new(position: Position, flags: RouteFlags) -> Self {
        SearchNode { position, flags }
    }
}

/// Grid-sized table with one slot per flag combination.
#[derive(Clone, Debug)]
pub struct NodeTable<T: Copy> {
    data: GridArray<[T; RouteFlags::COUNT]>,
}

impl<T: Copy> NodeTable<T> {
    pub fn new(initial: T) -> Self {
        NodeTable {
            data: GridArray::new([initial; RouteFlags::COUNT]),
        }
    }

    #[inline]
    pub fn get(&self, node: SearchNode) -> &T {
        &self.data.get(node.position)[node.flags.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, node: SearchNode) -> &mut T {
        &mut self.data.get_mut(node.position)[node.flags.index()]
    }

    #[inline]
    pub fn set(&mut self, node: SearchNode, value: T) {
        *self.get_mut(node) = value;
    }
}

/// Best-first record for one search state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    /// Steps from the sub-problem start; `u32::MAX` until reached.
    pub cost: u32,
    pub parent: Option<SearchNode>,
    pub closed: bool,
}

impl Default for NodeRecord {
    fn default() -> Self {
        NodeRecord {
            cost: u32::MAX,
            parent: None,
            closed: false,
        }
    }
}

/// Backtracking tables.
#[derive(Clone, Debug)]
pub struct BranchScratch {
    /// Cells on the branch currently being explored (or, during the
    /// existence pass, every cell ever entered).
    pub visited: GridArray<bool>,
    pub parent: GridArray<Option<Position>>,
    /// Shortest depth each state has been reached at.
    pub best_depth: NodeTable<u32>,
}

impl BranchScratch {
    pub fn new() -> Self {
        BranchScratch {
            visited: GridArray::new(false),
            parent: GridArray::new(None),
            best_depth: NodeTable::new(u32::MAX),
        }
    }
}

impl Default for BranchScratch {
    fn default() -> Self {
        BranchScratch::new()
    }
}

/// Follow parent links from `end` back to `start` and return the positions
/// in travel order. Returns `None` if the chain breaks or loops.
pub fn trace_back<N, P, L>(end: N, start: N, parent: P, position: L) -> Option<Vec<Position>>
where
    N: Copy + PartialEq,
    P: Fn(N) -> Option<N>,
    L: Fn(N) -> Position,
{
    let limit = GRID_CELLS * RouteFlags::COUNT;
    let mut path = vec![position(end)];
    let mut current = end;

    while current != start {
        if path.len() > limit {
            warn!("Parent chain from {} does not terminate", position(end));
            return None;
        }
        current = match parent(current) {
            Some(previous) => previous,
            None => {
                warn!("Parent chain broken at {}", position(current));
                return None;
            }
        };
        path.push(position(current));
    }

    path.reverse();
    Some(path)
}
