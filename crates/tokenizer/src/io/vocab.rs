//! Vocabulary-file parsing and emission.
//!
//! One `word count` line per entry. Reading rejects duplicates; writing
//! emits entries sorted by descending count, then ascending word.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use compact_str::CompactString;
use wordbpe_core::{BpeError, Result, WordCounts};

use crate::applier::Vocab;

/// Read a vocabulary file into a surface-form -> count map.
pub fn read_vocab_file(path: &Path) -> Result<Vocab> {
    let file = File::open(path).map_err(|err| BpeError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    log::info!("loading vocabulary from {}", path.display());

    let mut vocab = Vocab::new();
    let mut total = 0u64;

    for (line_idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| BpeError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let fields: Vec<&str> = line.split(' ').filter(|field| !field.is_empty()).collect();
        if fields.len() != 2 {
            return Err(BpeError::Load(format!(
                "{}:{}: expected `word count`, got `{}`",
                path.display(),
                line_idx + 1,
                line
            )));
        }

        let count: u32 = fields[1].parse().map_err(|_| {
            BpeError::Load(format!(
                "{}:{}: `{}` is not a count",
                path.display(),
                line_idx + 1,
                fields[1]
            ))
        })?;

        let word = CompactString::new(fields[0]);
        if vocab.insert(word, count).is_some() {
            return Err(BpeError::Load(format!(
                "{}:{}: duplicate word `{}`",
                path.display(),
                line_idx + 1,
                fields[0]
            )));
        }
        total += count as u64;
    }

    log::info!(
        "read {} words ({} unique) from {}",
        total,
        vocab.len(),
        path.display()
    );
    Ok(vocab)
}

/// Write word counts sorted by descending count, then ascending word.
pub fn write_vocab(writer: &mut impl Write, counts: &WordCounts) -> std::io::Result<()> {
    for (word, count) in counts.sorted() {
        writeln!(writer, "{} {}", word, count)?;
    }
    Ok(())
}
