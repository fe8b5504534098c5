//! Getvocab command implementation.

use clap::Parser;

/// Getvocab command arguments.
#[derive(Parser)]
pub struct GetvocabCommand {
    /// First input text file (use `-` for standard input)
    pub input1: String,

    /// Optional second input text file
    pub input2: Option<String>,
}

use anyhow::Result as AnyhowResult;
use std::io::{BufWriter, Write};
use wordbpe_core::WordCounts;
use wordbpe_tokenizer::io::{read_words_into, write_vocab};

pub fn run(cmd: GetvocabCommand) -> AnyhowResult<()> {
    let mut counts = WordCounts::new();
    read_words_into(&cmd.input1, &mut counts)?;
    if let Some(second) = super::optional_input(cmd.input2) {
        read_words_into(&second, &mut counts)?;
    }

    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    write_vocab(&mut out, &counts)?;
    out.flush()?;

    Ok(())
}
