//! Reading corpus text and writing segmented output.
//!
//! Inputs come from a file path or standard input (`-`); the whole input is
//! buffered in memory. Output goes through a buffered writer.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use wordbpe_core::{BpeError, Result, WordCounts};

/// Read a whole text input; `-` reads standard input.
pub fn read_text(path: &str) -> Result<String> {
    let bytes = if path == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|err| BpeError::Io {
                path: path.into(),
                err,
            })?;
        buffer
    } else {
        std::fs::read(path).map_err(|err| BpeError::Io {
            path: path.into(),
            err,
        })?
    };

    String::from_utf8(bytes)
        .map_err(|_| BpeError::InvalidInput(format!("{path}: input is not valid UTF-8")))
}

/// Count the words of a text input into `counts`.
pub fn read_words_into(path: &str, counts: &mut WordCounts) -> Result<()> {
    let before_total = counts.total();
    let text = read_text(path)?;
    counts.extend_from_text(&text);

    log::info!(
        "read {} words ({} unique so far) from {}",
        counts.total() - before_total,
        counts.len(),
        path
    );
    Ok(())
}

/// Write `contents` to a file, replacing whatever was there.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let file = File::create(path).map_err(|err| BpeError::Io {
        path: path.to_path_buf(),
        err,
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|err| BpeError::Io {
            path: path.to_path_buf(),
            err,
        })
}
