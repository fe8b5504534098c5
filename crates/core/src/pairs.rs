//! Adjacent-pair bookkeeping for merge learning.
//!
//! Counts live in a dense append-only vector so that argmax can scan every
//! pair ever seen (zeroed entries included) with a deterministic tie-break.
//! A hash map gives O(1) access from a pair to its record, and a second map
//! tracks which words contain each pair.

use ahash::{AHashMap, AHashSet};

/// A pair of adjacent symbol ids.
pub type Pair = (u32, u32);

/// One dense record: current weighted count for a pair.
struct PairRecord {
    count: i32,
    pair: Pair,
}

/// Index over every adjacent symbol pair in the corpus.
///
/// Occurrence-sets are permissive: a word id is inserted whenever a pair's
/// count grows in that word and never removed when it shrinks, so the set
/// may contain stale entries. Rewrite sweeps tolerate this because scanning
/// a word without the pair is a no-op.
pub struct PairIndex {
    /// Append-only records; argmax scans all of them
    records: Vec<PairRecord>,
    /// Pair -> position in `records`
    slots: AHashMap<Pair, usize>,
    /// Pair -> ids of words that contained it at some point
    occurrences: AHashMap<Pair, AHashSet<u32>>,
}

impl PairIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            slots: AHashMap::new(),
            occurrences: AHashMap::new(),
        }
    }

    /// Record every adjacent pair of `symbols` for word `word_id`.
    ///
    /// Each occurrence contributes `weight` to the pair's count.
    pub fn observe(&mut self, word_id: u32, symbols: &[u32], weight: i32) {
        for window in symbols.windows(2) {
            self.adjust((window[0], window[1]), weight, word_id);
        }
    }

    /// Add `delta` to a pair's count.
    ///
    /// A new record is created only for positive deltas; `word_id` is added
    /// to the occurrence-set only for positive deltas and never removed.
    pub fn adjust(&mut self, pair: Pair, delta: i32, word_id: u32) {
        match self.slots.get(&pair) {
            Some(&slot) => self.records[slot].count += delta,
            None => {
                if delta <= 0 {
                    return;
                }
                self.slots.insert(pair, self.records.len());
                self.records.push(PairRecord { count: delta, pair });
            }
        }

        if delta > 0 {
            self.occurrences.entry(pair).or_default().insert(word_id);
        }
    }

    /// The pair with the largest positive count, or `None` when every count
    /// is zero or negative.
    ///
    /// Ties are broken toward the lexicographically smaller pair tuple.
    pub fn argmax(&self) -> Option<(Pair, i32)> {
        let mut max_count = 0;
        let mut max_pair = None;

        for record in &self.records {
            if record.count > max_count {
                max_count = record.count;
                max_pair = Some(record.pair);
            } else if record.count == max_count && Some(record.pair) < max_pair {
                max_pair = Some(record.pair);
            }
        }

        max_pair.map(|pair| (pair, max_count))
    }

    /// Snapshot of the ids of words that have contained `pair`.
    pub fn occurrences(&self, pair: Pair) -> Vec<u32> {
        self.occurrences
            .get(&pair)
            .map(|words| words.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Force a pair's count to zero.
    pub fn zero(&mut self, pair: Pair) {
        if let Some(&slot) = self.slots.get(&pair) {
            self.records[slot].count = 0;
        }
    }

    /// Current count for a pair (zero if never seen).
    pub fn count(&self, pair: Pair) -> i32 {
        self.slots
            .get(&pair)
            .map(|&slot| self.records[slot].count)
            .unwrap_or(0)
    }

    /// Sum of all current counts.
    pub fn total_count(&self) -> i64 {
        self.records.iter().map(|record| record.count as i64).sum()
    }

    /// Number of distinct pairs ever seen.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no pairs have been seen.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PairIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_counts_occurrences() {
        let mut index = PairIndex::new();
        // Word 0 is "a a a" -> pair (0, 0) twice, weight 5 each.
        index.observe(0, &[0, 0, 0], 5);

        assert_eq!(index.count((0, 0)), 10);
        assert_eq!(index.occurrences((0, 0)), vec![0]);
    }

    #[test]
    fn test_adjust_creates_only_on_positive() {
        let mut index = PairIndex::new();

        index.adjust((1, 2), -3, 0);
        assert_eq!(index.len(), 0);
        assert_eq!(index.count((1, 2)), 0);

        index.adjust((1, 2), 3, 0);
        assert_eq!(index.len(), 1);
        assert_eq!(index.count((1, 2)), 3);
    }

    #[test]
    fn test_occurrence_set_is_permissive() {
        let mut index = PairIndex::new();
        index.adjust((1, 2), 3, 7);
        index.adjust((1, 2), -3, 7);

        // Count dropped to zero but the word id stays recorded.
        assert_eq!(index.count((1, 2)), 0);
        assert_eq!(index.occurrences((1, 2)), vec![7]);
    }

    #[test]
    fn test_argmax_prefers_larger_count() {
        let mut index = PairIndex::new();
        index.adjust((5, 6), 2, 0);
        index.adjust((1, 2), 4, 0);

        assert_eq!(index.argmax(), Some(((1, 2), 4)));
    }

    #[test]
    fn test_argmax_tie_breaks_on_smaller_pair() {
        let mut index = PairIndex::new();
        index.adjust((5, 6), 3, 0);
        index.adjust((5, 2), 3, 0);
        index.adjust((7, 0), 3, 0);

        assert_eq!(index.argmax(), Some(((5, 2), 3)));
    }

    #[test]
    fn test_argmax_skips_zeroed_entries() {
        let mut index = PairIndex::new();
        index.adjust((1, 2), 4, 0);
        index.adjust((3, 4), 2, 0);

        index.zero((1, 2));
        assert_eq!(index.argmax(), Some(((3, 4), 2)));

        index.zero((3, 4));
        assert_eq!(index.argmax(), None);
    }

    #[test]
    fn test_total_count() {
        let mut index = PairIndex::new();
        index.observe(0, &[0, 1, 2], 2);
        index.observe(1, &[1, 2], 3);

        // (0,1): 2, (1,2): 2 + 3
        assert_eq!(index.total_count(), 7);
    }
}
