//! wordbpe-training - Merge learning for word-level BPE
//!
//! This crate learns ranked merge lists from a word-count snapshot: each
//! iteration selects the most frequent adjacent symbol pair, rewrites every
//! word containing it through a doubly-linked segmentation, and updates the
//! pair histogram incrementally.
//!
//! # Example
//!
//! ```rust
//! use wordbpe_core::WordCounts;
//! use wordbpe_training::learn_bpe;
//!
//! let mut counts = WordCounts::new();
//! counts.extend_from_text("low low lower\n");
//!
//! let rules = learn_bpe(3, &counts);
//! assert_eq!(rules[0].left, "l");
//! assert_eq!(rules[0].right, "o");
//! ```

pub use wordbpe_core::{BpeError, Result};

// Learning infrastructure
pub mod training;
pub use training::{learn_bpe, MergeLearner, MergeRule, SegmentList};
