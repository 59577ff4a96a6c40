//! Priority frontier shared by the search engines.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::GridPos;

#[derive(Debug, Clone, Copy)]
struct Entry {
    f: f64,
    seq: u64,
    pos: GridPos,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys so the max-heap pops the smallest f, oldest first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-heap of positions keyed by `f`.
///
/// Equal keys come out in insertion order. There is no decrease-key: a
/// node whose `f` improves is pushed again, and the engines skip the
/// outdated entry when it surfaces because its node is already closed.
#[derive(Debug, Clone, Default)]
pub struct OpenList {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: GridPos, f: f64) {
        self.heap.push(Entry {
            f,
            seq: self.seq,
            pos,
        });
        self.seq += 1;
    }

    /// Remove and return the position with the lowest `f`.
    pub fn pop(&mut self) -> Option<GridPos> {
        self.heap.pop().map(|e| e.pos)
    }

    /// Lowest `f` currently queued.
    pub fn peek_f(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.f)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_first() {
        let mut open = OpenList::new();
        open.push(GridPos::new(0, 0), 3.0);
        open.push(GridPos::new(1, 0), 1.5);
        open.push(GridPos::new(2, 0), 2.0);
        assert_eq!(open.peek_f(), Some(1.5));
        assert_eq!(open.pop(), Some(GridPos::new(1, 0)));
        assert_eq!(open.pop(), Some(GridPos::new(2, 0)));
        assert_eq!(open.pop(), Some(GridPos::new(0, 0)));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn ties_are_fifo() {
        let mut open = OpenList::new();
        for x in 0..5 {
            open.push(GridPos::new(x, 0), 1.0);
        }
        let order: Vec<i32> = std::iter::from_fn(|| open.pop()).map(|p| p.x).collect();
        assert_eq!(order, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut open = OpenList::new();
        let p = GridPos::new(4, 4);
        open.push(p, 5.0);
        open.push(p, 2.0);
        assert_eq!(open.len(), 2);
        assert_eq!(open.peek_f(), Some(2.0));
        open.clear();
        assert!(open.is_empty());
    }

    #[test]
    fn clone_copies_entries() {
        let mut open = OpenList::new();
        open.push(GridPos::new(1, 1), 1.0);
        let mut copy = open.clone();
        copy.push(GridPos::new(2, 2), 0.5);
        assert_eq!(open.len(), 1);
        assert_eq!(copy.pop(), Some(GridPos::new(2, 2)));
    }
}
