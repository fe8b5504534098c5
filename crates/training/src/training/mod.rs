//! Merge learning for word-level BPE.

pub mod learner;
pub mod segments;

pub use learner::{learn_bpe, MergeLearner, MergeRule};
pub use segments::SegmentList;
