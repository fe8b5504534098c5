//! Word counting over whitespace-separated text.
//!
//! Words are split on spaces and newlines; bytes are preserved verbatim with
//! no normalization. First-seen order is kept so that word ids and symbol
//! interning are deterministic across runs.

use ahash::AHashMap;
use compact_str::CompactString;

/// Word -> count accumulator preserving first-seen order.
pub struct WordCounts {
    /// Words in first-seen order
    words: Vec<CompactString>,
    /// Parallel counts, one per word
    counts: Vec<u32>,
    /// Word -> position in `words`
    index: AHashMap<CompactString, u32>,
    /// Total (non-unique) number of words seen
    total: u64,
}

impl WordCounts {
    /// Create a new empty counter.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            counts: Vec::new(),
            index: AHashMap::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        self.total += 1;

        if let Some(&pos) = self.index.get(word) {
            self.counts[pos as usize] += 1;
            return;
        }

        let pos = self.words.len() as u32;
        let word = CompactString::new(word);
        self.index.insert(word.clone(), pos);
        self.words.push(word);
        self.counts.push(1);
    }

    /// Count every word in `text`.
    ///
    /// A word terminates at a space or a newline; empty runs between
    /// separators are ignored. The end of the input also terminates a word.
    pub fn extend_from_text(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let mut start = 0;

        for (pos, &byte) in bytes.iter().enumerate() {
            if byte == b' ' || byte == b'\n' {
                if pos > start {
                    self.add(&text[start..pos]);
                }
                start = pos + 1;
            }
        }
        if start < bytes.len() {
            self.add(&text[start..]);
        }
    }

    /// Get the count for a word.
    #[inline]
    pub fn get(&self, word: &str) -> Option<u32> {
        self.index.get(word).map(|&pos| self.counts[pos as usize])
    }

    /// Iterate `(word, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.words
            .iter()
            .map(|word| word.as_str())
            .zip(self.counts.iter().copied())
    }

    /// Number of unique words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if no words have been counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total (non-unique) number of words counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(word, count)` pairs sorted by descending count, then ascending word.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl Default for WordCounts {
    fn default() -> Self {
        Self::new()
    }
}
