//! Learnbpe command implementation.

use clap::Parser;

/// Learnbpe command arguments.
#[derive(Parser)]
pub struct LearnbpeCommand {
    /// Number of merge rules to learn
    pub k_pairs: usize,

    /// First input text file (use `-` for standard input)
    pub input1: String,

    /// Optional second input text file
    pub input2: Option<String>,
}

use anyhow::Result as AnyhowResult;
use std::io::{BufWriter, Write};
use wordbpe_core::WordCounts;
use wordbpe_tokenizer::io::{read_words_into, write_rule};
use wordbpe_training::MergeLearner;

pub fn run(cmd: LearnbpeCommand) -> AnyhowResult<()> {
    let mut counts = WordCounts::new();
    read_words_into(&cmd.input1, &mut counts)?;
    if let Some(second) = super::optional_input(cmd.input2) {
        read_words_into(&second, &mut counts)?;
    }

    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);

    // Rules stream out as they are learned, so an interrupted run still
    // leaves a well-formed prefix of the merge list.
    let mut learner = MergeLearner::from_counts(&counts);
    for _ in 0..cmd.k_pairs {
        let Some(rule) = learner.next_merge() else {
            break;
        };
        write_rule(&mut out, &rule)?;
    }
    out.flush()?;

    Ok(())
}
