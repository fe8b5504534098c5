//! Greedy merge learning over a fixed word-count snapshot.
//!
//! Each iteration selects the most frequent adjacent symbol pair, rewrites
//! every word containing it in place, and updates the pair index
//! incrementally from the rewrite's local neighborhood. No full re-scan is
//! ever performed after the initial pass.

use compact_str::CompactString;
use wordbpe_core::{Pair, PairIndex, SymbolTable, WordCounts};

use super::segments::SegmentList;

/// A learned merge rule: adjacent `left`/`right` collapse into their
/// concatenation.
///
/// A rule's position in the learned sequence is its rank (0 = highest
/// priority during application).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// Left symbol string
    pub left: CompactString,
    /// Right symbol string
    pub right: CompactString,
    /// Weighted pair count at the moment the rule was selected
    pub count: u32,
}

/// Iterative greedy BPE learner.
///
/// Built once from a word-count snapshot; each [`next_merge`] call emits
/// one rule and advances the corpus state.
///
/// [`next_merge`]: MergeLearner::next_merge
pub struct MergeLearner {
    /// Symbol interner, append-only across the whole run
    symbols: SymbolTable,
    /// One linked segmentation per unique word, indexed by word id
    words: Vec<SegmentList>,
    /// Corpus count per word, immutable during learning
    weights: Vec<i32>,
    /// Adjacent-pair counts and occurrence-sets
    pairs: PairIndex,
}

impl MergeLearner {
    /// Tokenize every word and populate the pair index.
    ///
    /// Word ids follow the counter's first-seen order, which keeps symbol
    /// interning and tie-breaking deterministic.
    pub fn from_counts(counts: &WordCounts) -> Self {
        let mut symbols = SymbolTable::new();
        let mut words = Vec::with_capacity(counts.len());
        let mut weights = Vec::with_capacity(counts.len());
        let mut pairs = PairIndex::new();

        for (word_id, (word, count)) in counts.iter().enumerate() {
            let ids = symbols.tokenize_word(word);
            pairs.observe(word_id as u32, &ids, count as i32);
            words.push(SegmentList::from_symbols(ids));
            weights.push(count as i32);
        }

        log::debug!(
            "tokenized {} unique words into {} initial symbols, {} distinct pairs",
            words.len(),
            symbols.len(),
            pairs.len()
        );

        Self {
            symbols,
            words,
            weights,
            pairs,
        }
    }

    /// Select and apply the next merge, or `None` when no pair has a
    /// positive count.
    ///
    /// The emitted count is the value observed at selection, before the
    /// rewrite sweep.
    pub fn next_merge(&mut self) -> Option<MergeRule> {
        let (max_pair, max_count) = self.pairs.argmax()?;
        let new_sym = self.symbols.intern_concat(max_pair.0, max_pair.1);

        let rule = MergeRule {
            left: CompactString::new(self.symbols.get(max_pair.0)),
            right: CompactString::new(self.symbols.get(max_pair.1)),
            count: max_count as u32,
        };

        self.rewrite(max_pair, new_sym);
        // The pair is fully consumed in the words just visited.
        self.pairs.zero(max_pair);

        Some(rule)
    }

    /// Learn up to `k_pairs` merge rules, stopping early when no pair with
    /// a positive count remains.
    pub fn learn(&mut self, k_pairs: usize) -> Vec<MergeRule> {
        log::info!("learning up to {} merges over {} unique words", k_pairs, self.words.len());
        let rules: Vec<MergeRule> = (0..k_pairs).map_while(|_| self.next_merge()).collect();
        log::info!("learned {} merges", rules.len());
        rules
    }

    /// Rewrite every occurrence of `pair` into `new_sym`, adjusting the
    /// neighbor pairs by the word's weight.
    fn rewrite(&mut self, pair: Pair, new_sym: u32) {
        for word_id in self.pairs.occurrences(pair) {
            let weight = self.weights[word_id as usize];
            let word = &mut self.words[word_id as usize];

            let mut cur = word.head();
            while let Some(node) = cur {
                let Some(succ) = word.next(node) else { break };
                if (word.sym(node), word.sym(succ)) != pair {
                    cur = Some(succ);
                    continue;
                }

                let after = word.next(succ);
                if let Some(before) = word.prev(node) {
                    let left = word.sym(before);
                    self.pairs.adjust((left, pair.0), -weight, word_id);
                    self.pairs.adjust((left, new_sym), weight, word_id);
                }
                if let Some(after) = after {
                    let right = word.sym(after);
                    self.pairs.adjust((pair.1, right), -weight, word_id);
                    self.pairs.adjust((new_sym, right), weight, word_id);
                }

                word.merge(node, new_sym);
                // Resume past the merged node: overlapping occurrences are
                // consumed left to right, once per sweep.
                cur = after;
            }
        }
    }
}

/// Learn up to `k_pairs` merge rules from a word-count snapshot.
pub fn learn_bpe(k_pairs: usize, counts: &WordCounts) -> Vec<MergeRule> {
    MergeLearner::from_counts(counts).learn(k_pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(text: &str) -> WordCounts {
        let mut counts = WordCounts::new();
        counts.extend_from_text(text);
        counts
    }

    fn word_symbols(learner: &MergeLearner, word_id: usize) -> Vec<String> {
        learner.words[word_id]
            .iter()
            .map(|id| learner.symbols.get(id).to_string())
            .collect()
    }

    fn rule(left: &str, right: &str, count: u32) -> MergeRule {
        MergeRule {
            left: left.into(),
            right: right.into(),
            count,
        }
    }

    const CORPUS: &str = "low low low low low lower lower newest newest \
                          newest newest newest newest widest widest widest";

    #[test]
    fn test_learn_sequence() {
        let rules = learn_bpe(10, &counts(CORPUS));

        assert_eq!(
            rules,
            vec![
                rule("e", "s", 9),
                rule("es", "t</w>", 9),
                rule("l", "o", 7),
                rule("w", "est</w>", 6),
                rule("e", "west</w>", 6),
                rule("n", "ewest</w>", 6),
                rule("lo", "w</w>", 5),
                rule("w", "i", 3),
                rule("d", "est</w>", 3),
                rule("wi", "dest</w>", 3),
            ]
        );
    }

    #[test]
    fn test_determinism() {
        let first = learn_bpe(10, &counts(CORPUS));
        let second = learn_bpe(10, &counts(CORPUS));

        assert_eq!(first, second);
    }

    #[test]
    fn test_overlapping_pair_consumed_left_to_right() {
        // "aaaaa" tokenizes to a a a a a</w>, so (a, a) occurs three times.
        let mut learner = MergeLearner::from_counts(&counts("aaaaa"));

        let rule = learner.next_merge().unwrap();
        assert_eq!(rule.left, "a");
        assert_eq!(rule.right, "a");
        assert_eq!(rule.count, 3);

        // Non-overlapping sweep: occurrences pair up left to right and the
        // freshly merged symbol cannot be re-consumed in the same pass.
        assert_eq!(word_symbols(&learner, 0), vec!["aa", "aa", "a</w>"]);
    }

    #[test]
    fn test_count_conservation() {
        let mut learner = MergeLearner::from_counts(&counts(CORPUS));

        for _ in 0..10 {
            let expected: i64 = learner
                .words
                .iter()
                .zip(learner.weights.iter())
                .map(|(word, &weight)| weight as i64 * (word.len() as i64 - 1))
                .sum();
            assert_eq!(learner.pairs.total_count(), expected);

            if learner.next_merge().is_none() {
                break;
            }
        }
    }

    #[test]
    fn test_word_lengths_monotone() {
        let mut learner = MergeLearner::from_counts(&counts(CORPUS));
        let mut lengths: Vec<usize> = learner.words.iter().map(|word| word.len()).collect();

        while learner.next_merge().is_some() {
            let current: Vec<usize> = learner.words.iter().map(|word| word.len()).collect();
            for (new, old) in current.iter().zip(lengths.iter()) {
                assert!(new <= old);
            }
            lengths = current;
        }
    }

    #[test]
    fn test_early_stop_when_pairs_exhausted() {
        // "ab" has a single mergeable pair; after it the word is one symbol.
        let rules = learn_bpe(10, &counts("ab"));

        assert_eq!(rules, vec![rule("a", "b</w>", 1)]);
    }

    #[test]
    fn test_empty_corpus() {
        let rules = learn_bpe(5, &counts(""));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_single_symbol_words_have_no_pairs() {
        let rules = learn_bpe(5, &counts("a b a"));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_emitted_count_is_pre_sweep() {
        // "ababa" has (a,b) twice; the emitted count reflects both
        // occurrences even though the sweep consumes them all.
        let mut learner = MergeLearner::from_counts(&counts("ababa"));
        let rule = learner.next_merge().unwrap();

        assert_eq!(rule.left, "a");
        assert_eq!(rule.right, "b");
        assert_eq!(rule.count, 2);
        assert_eq!(word_symbols(&learner, 0), vec!["ab", "ab", "a</w>"]);
    }
}
