//! Applying ranked merge lists to text.
//!
//! Each word is reduced greedily: the adjacent pair with the lowest rank
//! merges first, leftmost occurrence on ties, one non-overlapping
//! replacement pass per round. Unique words are segmented once, in
//! parallel, then expanded back over the input at emission time.

mod restrict;

use ahash::AHashMap;
use compact_str::CompactString;
use rayon::prelude::*;
use wordbpe_core::{split_word, BpeError, Result, WordCounts, END_WORD, TOKEN_DELIM};

/// Merge-pair lookup: `(left, right)` -> rank (lower merges first).
pub type Codes = AHashMap<(CompactString, CompactString), u32>;

/// Concatenation-reverse lookup: `left ++ right` -> `(left, right)`.
pub type ReversedCodes = AHashMap<CompactString, (CompactString, CompactString)>;

/// Permitted output vocabulary: surface form -> corpus count.
pub type Vocab = AHashMap<CompactString, u32>;

/// Number of application worker threads.
pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, 10)
}

/// Applies a ranked merge list, optionally restricted to a vocabulary.
///
/// The codes, reverse map, and vocabulary are read-only after construction,
/// so application parallelizes freely across words.
pub struct BpeApplier {
    codes: Codes,
    reversed: ReversedCodes,
    /// Empty means unrestricted
    vocab: Vocab,
}

impl BpeApplier {
    /// Create an applier from already-built lookup maps.
    pub fn new(codes: Codes, reversed: ReversedCodes, vocab: Vocab) -> Self {
        Self {
            codes,
            reversed,
            vocab,
        }
    }

    /// Create an applier from a codes map alone, deriving the reverse map.
    pub fn from_codes(codes: Codes, vocab: Vocab) -> Self {
        let reversed = codes
            .keys()
            .map(|(left, right)| {
                let mut concat = left.clone();
                concat.push_str(right);
                (concat, (left.clone(), right.clone()))
            })
            .collect();

        Self::new(codes, reversed, vocab)
    }

    /// Segment a single word into its `@@ `-joined subword form.
    ///
    /// The final symbol has its end-of-word marker removed, so a word that
    /// stays whole round-trips to itself.
    pub fn segment_word(&self, word: &str) -> Result<String> {
        let mut symbols = split_word(word);

        while symbols.len() > 1 {
            // Lowest rank wins; the scan keeps the leftmost on ties.
            let mut best: Option<(usize, u32)> = None;
            for pos in 0..symbols.len() - 1 {
                let pair = (symbols[pos].clone(), symbols[pos + 1].clone());
                if let Some(&rank) = self.codes.get(&pair) {
                    if best.map_or(true, |(_, best_rank)| rank < best_rank) {
                        best = Some((pos, rank));
                    }
                }
            }
            let Some((best_pos, _)) = best else { break };
            let best_left = symbols[best_pos].clone();
            let best_right = symbols[best_pos + 1].clone();

            // One pass, merging every non-overlapping occurrence.
            let mut merged = Vec::with_capacity(symbols.len());
            let mut just_merged = false;
            for pos in 0..symbols.len() {
                if pos + 1 < symbols.len()
                    && !just_merged
                    && symbols[pos] == best_left
                    && symbols[pos + 1] == best_right
                {
                    let mut concat = symbols[pos].clone();
                    concat.push_str(&symbols[pos + 1]);
                    merged.push(concat);
                    just_merged = true;
                } else if !just_merged {
                    merged.push(symbols[pos].clone());
                } else {
                    just_merged = false;
                }
            }
            symbols = merged;
        }

        if !self.vocab.is_empty() {
            symbols = restrict::limit_vocab(&symbols, &self.reversed, &self.vocab)?;
        }

        let mut out = String::new();
        for symbol in &symbols {
            out.push_str(symbol);
            out.push_str(TOKEN_DELIM);
            out.push(' ');
        }
        // Drop the last symbol's end-of-word marker and its delimiter.
        out.truncate(out.len() - (END_WORD.len() + TOKEN_DELIM.len() + 1));
        Ok(out)
    }

    /// Segment every unique word of `counts` in parallel.
    pub fn segment_words(&self, counts: &WordCounts) -> Result<AHashMap<CompactString, String>> {
        let threads = worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| BpeError::Apply(format!("failed to start worker pool: {err}")))?;

        log::info!(
            "applying merges to {} unique words on {} threads",
            counts.len(),
            threads
        );

        let words: Vec<&str> = counts.iter().map(|(word, _)| word).collect();
        pool.install(|| {
            let pairs: Result<Vec<(CompactString, String)>> = words
                .par_iter()
                .map(|&word| Ok((CompactString::new(word), self.segment_word(word)?)))
                .collect();
            pairs.map(|pairs| pairs.into_iter().collect())
        })
    }

    /// Segment `text`, preserving every separator byte.
    ///
    /// Words are deduplicated and segmented once, then each position in the
    /// input is replaced by its word's segmentation.
    pub fn apply_to_text(&self, text: &str) -> Result<String> {
        let mut counts = WordCounts::new();
        counts.extend_from_text(text);
        let segmented = self.segment_words(&counts)?;

        let mut out = String::with_capacity(text.len() * 2);
        let bytes = text.as_bytes();
        let mut start = 0;

        for (pos, &byte) in bytes.iter().enumerate() {
            if byte == b' ' || byte == b'\n' {
                if pos > start {
                    let word = &text[start..pos];
                    out.push_str(lookup_segmentation(&segmented, word));
                }
                out.push(byte as char);
                start = pos + 1;
            }
        }
        if start < bytes.len() {
            out.push_str(lookup_segmentation(&segmented, &text[start..]));
        }

        Ok(out)
    }
}

/// Every word was segmented up front, so a miss here is a bug.
fn lookup_segmentation<'a>(segmented: &'a AHashMap<CompactString, String>, word: &str) -> &'a str {
    segmented
        .get(word)
        .unwrap_or_else(|| panic!("no segmentation computed for word `{word}`"))
}
