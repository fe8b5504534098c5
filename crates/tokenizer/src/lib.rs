//! wordbpe-tokenizer - Applying BPE merge lists to text
//!
//! This crate turns a ranked merge list (optionally restricted to a known
//! vocabulary) into segmented text, and reads/writes the two persisted
//! artifacts: the codes file and the vocabulary file. It also exposes the
//! whole pipeline as free functions for embedding.
//!
//! # Example
//!
//! ```rust
//! use wordbpe_tokenizer::{apply_bpe, learn_bpes, Codes, Vocab};
//!
//! let rules = learn_bpes(10, "low low low lower\n");
//!
//! let codes: Codes = rules
//!     .iter()
//!     .enumerate()
//!     .map(|(rank, rule)| ((rule.left.clone(), rule.right.clone()), rank as u32))
//!     .collect();
//!
//! let segmented = apply_bpe("low lowest\n", &codes, &Vocab::new())?;
//! assert!(segmented.starts_with("low"));
//! # Ok::<(), wordbpe_tokenizer::BpeError>(())
//! ```

use std::path::Path;

// Re-export core types
pub use wordbpe_core::{BpeError, Result, WordCounts, END_WORD, TOKEN_DELIM};
pub use wordbpe_training::MergeRule;

// Merge application
pub mod applier;
pub use applier::{worker_count, BpeApplier, Codes, ReversedCodes, Vocab};

// Artifact I/O
pub mod io;
pub use io::{read_text, write_text};

/// Count whitespace-separated words in `text`.
pub fn get_vocabs(text: &str) -> WordCounts {
    let mut counts = WordCounts::new();
    counts.extend_from_text(text);
    counts
}

/// Learn up to `k_pairs` merge rules from `text`.
pub fn learn_bpes(k_pairs: usize, text: &str) -> Vec<MergeRule> {
    wordbpe_training::learn_bpe(k_pairs, &get_vocabs(text))
}

/// Read a vocabulary file into a surface-form -> count map.
pub fn read_vocab_file(path: &Path) -> Result<Vocab> {
    io::vocab::read_vocab_file(path)
}

/// Read a codes file into the rank map and its concatenation-reverse map.
pub fn read_codes_file(path: &Path) -> Result<(Codes, ReversedCodes)> {
    io::codes::read_codes_file(path)
}

/// Segment `text` with an in-memory codes map.
///
/// The concatenation-reverse map is derived from `codes`. An empty `vocab`
/// means no vocabulary restriction.
pub fn apply_bpe(text: &str, codes: &Codes, vocab: &Vocab) -> Result<String> {
    BpeApplier::from_codes(codes.clone(), vocab.clone()).apply_to_text(text)
}

/// Segment `text` with codes (and optionally a vocabulary) loaded from disk.
///
/// An empty `vocab_path` means no vocabulary restriction.
pub fn apply_bpe_from_files(text: &str, codes_path: &str, vocab_path: &str) -> Result<String> {
    let (codes, reversed) = io::codes::read_codes_file(Path::new(codes_path))?;
    let vocab = if vocab_path.is_empty() {
        Vocab::new()
    } else {
        io::vocab::read_vocab_file(Path::new(vocab_path))?
    };

    BpeApplier::new(codes, reversed, vocab).apply_to_text(text)
}
