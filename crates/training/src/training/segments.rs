//! Doubly-linked symbol sequences for in-place merging.
//!
//! Each word's segmentation is a linked list threaded through a fixed
//! backing vector: `prev`/`next` hold node indices, -1 marks the ends.
//! Merging two adjacent nodes is O(1) and never reclaims freed slots, so
//! node indices stay valid for the whole learning run.

/// No neighbor on this side.
const NIL: i32 = -1;

/// A word's current segmentation as a linked sequence of symbol ids.
pub struct SegmentList {
    syms: Vec<u32>,
    prev: Vec<i32>,
    next: Vec<i32>,
    head: i32,
    len: usize,
}

impl SegmentList {
    /// Build the list from an initial symbol-id sequence.
    pub fn from_symbols(symbols: Vec<u32>) -> Self {
        let n = symbols.len();
        let prev: Vec<i32> = (0..n).map(|i| i as i32 - 1).collect();
        let next: Vec<i32> = (0..n)
            .map(|i| if i + 1 < n { i as i32 + 1 } else { NIL })
            .collect();

        Self {
            syms: symbols,
            prev,
            next,
            head: if n == 0 { NIL } else { 0 },
            len: n,
        }
    }

    /// First node, if the list is non-empty.
    #[inline]
    pub fn head(&self) -> Option<usize> {
        (self.head != NIL).then_some(self.head as usize)
    }

    /// Node after `node`.
    #[inline]
    pub fn next(&self, node: usize) -> Option<usize> {
        let next = self.next[node];
        (next != NIL).then_some(next as usize)
    }

    /// Node before `node`.
    #[inline]
    pub fn prev(&self, node: usize) -> Option<usize> {
        let prev = self.prev[node];
        (prev != NIL).then_some(prev as usize)
    }

    /// Symbol id stored at `node`.
    #[inline]
    pub fn sym(&self, node: usize) -> u32 {
        self.syms[node]
    }

    /// Collapse `node` and its successor into one node holding `new_sym`.
    ///
    /// The successor's slot is unlinked but not reclaimed.
    ///
    /// # Panics
    /// Panics if `node` has no successor.
    pub fn merge(&mut self, node: usize, new_sym: u32) {
        let victim = self.next[node];
        assert!(victim != NIL, "merge requires a successor");
        let victim = victim as usize;

        self.syms[node] = new_sym;
        self.next[node] = self.next[victim];
        if let Some(after) = self.next(node) {
            self.prev[after] = node as i32;
        }
        self.len -= 1;
    }

    /// Current number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate symbol ids in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let mut node = self.head();
        std::iter::from_fn(move || {
            let current = node?;
            node = self.next(current);
            Some(self.syms[current])
        })
    }
}
