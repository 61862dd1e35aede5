//! Priority queue of frontier states for the best-first engine.
//!
//! Backed by a binary heap with lazy deletion: lowering a key pushes a new
//! entry and the old one is skipped when it surfaces. A side table holds the
//! live key of every queued state.

use super::scratch::*;
use crate::error::PriorityError;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// `(cost so far, heuristic)`, compared lexicographically.
pub type Key = (u32, u32);

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    key: Key,
    /// Insertion order; breaks ties first-in first-out.
    sequence: u32,
    node: SearchNode,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest key.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct OpenSet {
    heap: BinaryHeap<Entry>,
    keys: NodeTable<Option<Key>>,
    live: usize,
    sequence: u32,
}

impl OpenSet {
    pub fn new() -> Self {
        OpenSet {
            heap: BinaryHeap::new(),
            keys: NodeTable::new(None),
            live: 0,
            sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, node: SearchNode) -> bool {
        self.keys.get(node).is_some()
    }

    pub fn key(&self, node: SearchNode) -> Option<Key> {
        *self.keys.get(node)
    }

    /// Queue `node`, or lower its key if it is already queued.
    pub fn push(&mut self, node: SearchNode, key: Key) -> Result<(), PriorityError> {
        match self.key(node) {
            Some(_) => self.decrease_key(node, key),
            None => {
                self.live += 1;
                self.insert(node, key);
                Ok(())
            }
        }
    }

    /// Lower the key of a queued node. Equal keys are a no-op; higher keys
    /// are refused.
    pub fn decrease_key(&mut self, node: SearchNode, key: Key) -> Result<(), PriorityError> {
        let current = self
            .key(node)
            .ok_or(PriorityError::NotQueued(node.position))?;

        match key.cmp(&current) {
            Ordering::Less => {
                self.insert(node, key);
                Ok(())
            }
            Ordering::Equal => Ok(()),
            Ordering::Greater => Err(PriorityError::KeyIncrease {
                position: node.position,
                current,
                requested: key,
            }),
        }
    }

    /// Remove and return the node with the smallest key.
    pub fn pop(&mut self) -> Option<(SearchNode, Key)> {
        while let Some(entry) = self.heap.pop() {
            if self.key(entry.node) == Some(entry.key) {
                self.keys.set(entry.node, None);
                self.live -= 1;
                return Some((entry.node, entry.key));
            }
        }
        None
    }

    fn insert(&mut self, node: SearchNode, key: Key) {
        self.keys.set(node, Some(key));
        self.heap.push(Entry {
            key,
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
    }
}

impl Default for OpenSet {
    fn default() -> Self {
        OpenSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::RouteFlags;
    use crate::location::Position;

    fn node(row: u8, col: u8) -> SearchNode {
        SearchNode::new(Position::new(row, col), RouteFlags::START)
    }

    #[test]
    fn pops_in_key_order() {
        let mut open = OpenSet::new();
        open.push(node(0, 0), (3, 1)).unwrap();
        open.push(node(0, 1), (1, 5)).unwrap();
        open.push(node(0, 2), (1, 2)).unwrap();
        assert_eq!(open.len(), 3);

        assert_eq!(open.pop(), Some((node(0, 2), (1, 2))));
        assert_eq!(open.pop(), Some((node(0, 1), (1, 5))));
        assert_eq!(open.pop(), Some((node(0, 0), (3, 1))));
        assert_eq!(open.pop(), None);
        assert!(open.is_empty());
    }

    #[test]
    fn ties_are_first_in_first_out() {
        let mut open = OpenSet::new();
        open.push(node(1, 1), (2, 2)).unwrap();
        open.push(node(0, 0), (2, 2)).unwrap();
        assert_eq!(open.pop().map(|(n, _)| n), Some(node(1, 1)));
        assert_eq!(open.pop().map(|(n, _)| n), Some(node(0, 0)));
    }

    #[test]
    fn decrease_key_reorders_and_skips_stale_entries() {
        let mut open = OpenSet::new();
        open.push(node(0, 0), (5, 0)).unwrap();
        open.push(node(1, 1), (3, 0)).unwrap();
        open.decrease_key(node(0, 0), (1, 0)).unwrap();
        assert_eq!(open.len(), 2);

        assert_eq!(open.pop(), Some((node(0, 0), (1, 0))));
        assert_eq!(open.pop(), Some((node(1, 1), (3, 0))));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn key_increase_is_rejected() {
        let mut open = OpenSet::new();
        open.push(node(2, 2), (2, 1)).unwrap();
        assert_eq!(
            open.push(node(2, 2), (4, 0)),
            Err(PriorityError::KeyIncrease {
                position: Position::new(2, 2),
                current: (2, 1),
                requested: (4, 0),
            })
        );
        assert_eq!(open.key(node(2, 2)), Some((2, 1)));
        assert_eq!(
            open.decrease_key(node(3, 3), (0, 0)),
            Err(PriorityError::NotQueued(Position::new(3, 3)))
        );
    }
}
