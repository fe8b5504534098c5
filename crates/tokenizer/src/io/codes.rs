//! Codes-file parsing and emission.
//!
//! One merge rule per line, `left right count`, in learned order. A rule's
//! rank is its zero-based line index.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use compact_str::CompactString;
use wordbpe_core::{BpeError, Result};
use wordbpe_training::MergeRule;

use crate::applier::{Codes, ReversedCodes};

/// Read a codes file into the rank map and its concatenation-reverse map.
///
/// Duplicate pairs and duplicate concatenations are structural errors.
pub fn read_codes_file(path: &Path) -> Result<(Codes, ReversedCodes)> {
    let file = File::open(path).map_err(|err| BpeError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    log::info!("loading codes from {}", path.display());

    let mut codes = Codes::new();
    let mut reversed = ReversedCodes::new();

    for (line_idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| BpeError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let fields: Vec<&str> = line.split(' ').filter(|field| !field.is_empty()).collect();
        if fields.len() != 3 {
            return Err(BpeError::Load(format!(
                "{}:{}: expected `left right count`, got `{}`",
                path.display(),
                line_idx + 1,
                line
            )));
        }
        if fields[2].parse::<u32>().is_err() {
            return Err(BpeError::Load(format!(
                "{}:{}: `{}` is not a count",
                path.display(),
                line_idx + 1,
                fields[2]
            )));
        }

        let pair = (CompactString::new(fields[0]), CompactString::new(fields[1]));
        let mut concat = pair.0.clone();
        concat.push_str(&pair.1);

        if codes.contains_key(&pair) {
            return Err(BpeError::Load(format!(
                "{}:{}: duplicate pair `{} {}`",
                path.display(),
                line_idx + 1,
                pair.0,
                pair.1
            )));
        }
        if reversed.contains_key(&concat) {
            return Err(BpeError::Load(format!(
                "{}:{}: duplicate concatenation `{concat}`",
                path.display(),
                line_idx + 1
            )));
        }

        let rank = codes.len() as u32;
        codes.insert(pair.clone(), rank);
        reversed.insert(concat, pair);
    }

    log::info!("read {} codes from {}", codes.len(), path.display());
    Ok((codes, reversed))
}

/// Write merge rules in learned order, one `left right count` line each.
pub fn write_codes(writer: &mut impl Write, rules: &[MergeRule]) -> std::io::Result<()> {
    for rule in rules {
        write_rule(writer, rule)?;
    }
    Ok(())
}

/// Write a single merge rule line.
pub fn write_rule(writer: &mut impl Write, rule: &MergeRule) -> std::io::Result<()> {
    writeln!(writer, "{} {} {}", rule.left, rule.right, rule.count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_codes() {
        let path = write_temp("wordbpe_test_codes", "l o 7\nlo w</w> 5\n");
        let (codes, reversed) = read_codes_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(codes.len(), 2);
        assert_eq!(codes.get(&("l".into(), "o".into())), Some(&0));
        assert_eq!(codes.get(&("lo".into(), "w</w>".into())), Some(&1));
        assert_eq!(
            reversed.get("low</w>"),
            Some(&("lo".into(), "w</w>".into()))
        );
    }

    #[test]
    fn test_wrong_field_count_is_an_error() {
        let path = write_temp("wordbpe_test_codes_fields", "l o\n");
        let err = read_codes_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, BpeError::Load(_)));
    }

    #[test]
    fn test_duplicate_pair_is_an_error() {
        let path = write_temp("wordbpe_test_codes_dup", "l o 7\nl o 3\n");
        let err = read_codes_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, BpeError::Load(_)));
    }

    #[test]
    fn test_duplicate_concatenation_is_an_error() {
        let path = write_temp("wordbpe_test_codes_concat", "a bc 2\nab c 1\n");
        let err = read_codes_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, BpeError::Load(_)));
    }

    #[test]
    fn test_non_numeric_count_is_an_error() {
        let path = write_temp("wordbpe_test_codes_count", "l o seven\n");
        let err = read_codes_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, BpeError::Load(_)));
    }

    #[test]
    fn test_write_codes_round_trips() {
        let rules = vec![
            MergeRule {
                left: "l".into(),
                right: "o".into(),
                count: 7,
            },
            MergeRule {
                left: "lo".into(),
                right: "w</w>".into(),
                count: 5,
            },
        ];

        let mut buffer = Vec::new();
        write_codes(&mut buffer, &rules).unwrap();
        assert_eq!(buffer, b"l o 7\nlo w</w> 5\n");

        let path = std::env::temp_dir().join("wordbpe_test_codes_roundtrip");
        std::fs::write(&path, &buffer).unwrap();
        let (codes, _) = read_codes_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(codes.get(&("lo".into(), "w</w>".into())), Some(&1));
    }
}
