//! Applybpe command implementation.

use clap::Parser;

/// Applybpe command arguments.
#[derive(Parser)]
pub struct ApplybpeCommand {
    /// Output file for the segmented text
    pub output: String,

    /// Input text file (use `-` for standard input)
    pub input: String,

    /// Codes file, one `left right count` rule per line
    pub codes: String,

    /// Optional vocabulary file restricting the output symbols
    pub vocab: Option<String>,
}

use anyhow::Result as AnyhowResult;
use std::path::Path;
use wordbpe_tokenizer::io::{read_codes_file, read_text, read_vocab_file, write_text};
use wordbpe_tokenizer::{BpeApplier, Vocab};

pub fn run(cmd: ApplybpeCommand) -> AnyhowResult<()> {
    let text = read_text(&cmd.input)?;

    let (codes, reversed) = read_codes_file(Path::new(&cmd.codes))?;
    let vocab = match super::optional_input(cmd.vocab) {
        Some(path) => read_vocab_file(Path::new(&path))?,
        None => Vocab::new(),
    };

    let applier = BpeApplier::new(codes, reversed, vocab);
    let segmented = applier.apply_to_text(&text)?;

    write_text(Path::new(&cmd.output), &segmented)?;
    log::info!("wrote {} bytes to {}", segmented.len(), cmd.output);

    Ok(())
}
