//! wordbpe-core - Core data structures for word-level BPE
//!
//! This crate provides the building blocks shared by the learning and
//! application pipelines: symbol interning with initial per-code-point
//! segmentation, whitespace word counting, and the adjacent-pair index
//! driving greedy merge selection.
//!
//! # Example
//!
//! ```rust
//! use wordbpe_core::{SymbolTable, WordCounts};
//!
//! let mut counts = WordCounts::new();
//! counts.extend_from_text("low low lower\n");
//! assert_eq!(counts.get("low"), Some(2));
//!
//! let mut symbols = SymbolTable::new();
//! let ids = symbols.tokenize_word("low");
//! assert_eq!(symbols.get(ids[2]), "w</w>");
//! ```

pub mod error;
pub use error::{BpeError, Result};

pub mod symbols;
pub use symbols::{split_word, starts_code_point, SymbolTable, END_WORD, TOKEN_DELIM};

pub mod words;
pub use words::WordCounts;

pub mod pairs;
pub use pairs::{Pair, PairIndex};
