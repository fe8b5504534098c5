//! Vocabulary restriction of segmented output.
//!
//! A produced symbol is kept only if its surface form is in the permitted
//! vocabulary: non-final symbols probe with the inter-token delimiter
//! appended, the final symbol probes with the end-of-word marker stripped.
//! Anything else is recursively un-merged through the concatenation-reverse
//! map down to symbols that do satisfy the probe, or to single code points.

use compact_str::CompactString;
use wordbpe_core::{starts_code_point, BpeError, Result, END_WORD, TOKEN_DELIM};

use super::{ReversedCodes, Vocab};

/// Surface form a symbol must have in the vocabulary.
fn probe(symbol: &str, is_final: bool) -> CompactString {
    if is_final {
        CompactString::new(symbol.strip_suffix(END_WORD).unwrap_or(symbol))
    } else {
        let mut query = CompactString::new(symbol);
        query.push_str(TOKEN_DELIM);
        query
    }
}

/// Recursively un-merge `symbol` until every emitted piece passes its
/// vocabulary probe or bottoms out at a single code point.
fn decompose(
    symbol: &CompactString,
    out: &mut Vec<CompactString>,
    reversed: &ReversedCodes,
    vocab: &Vocab,
    is_final: bool,
) -> Result<()> {
    let Some((left, right)) = reversed.get(symbol.as_str()) else {
        // Un-mergeable, so it has to be a single code point.
        let stripped = if is_final {
            symbol.strip_suffix(END_WORD).unwrap_or(symbol)
        } else {
            symbol.as_str()
        };
        let points = stripped.bytes().filter(|&b| starts_code_point(b)).count();
        if points != 1 {
            return Err(BpeError::Apply(format!(
                "cannot decompose symbol `{symbol}`: the codes do not cover the vocabulary"
            )));
        }
        out.push(symbol.clone());
        return Ok(());
    };

    // The left piece is never word-final.
    if vocab.contains_key(probe(left, false).as_str()) {
        out.push(left.clone());
    } else {
        decompose(left, out, reversed, vocab, false)?;
    }

    // The right piece inherits the parent's finality.
    if vocab.contains_key(probe(right, is_final).as_str()) {
        out.push(right.clone());
    } else {
        decompose(right, out, reversed, vocab, is_final)?;
    }

    Ok(())
}

/// Replace every out-of-vocabulary symbol by its decomposition.
pub(crate) fn limit_vocab(
    symbols: &[CompactString],
    reversed: &ReversedCodes,
    vocab: &Vocab,
) -> Result<Vec<CompactString>> {
    let mut out = Vec::with_capacity(symbols.len());

    for (pos, symbol) in symbols.iter().enumerate() {
        let is_final = pos == symbols.len() - 1;
        if vocab.contains_key(probe(symbol, is_final).as_str()) {
            out.push(symbol.clone());
        } else {
            decompose(symbol, &mut out, reversed, vocab, is_final)?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reversed(entries: &[(&str, (&str, &str))]) -> ReversedCodes {
        entries
            .iter()
            .map(|&(concat, (left, right))| {
                (
                    CompactString::new(concat),
                    (CompactString::new(left), CompactString::new(right)),
                )
            })
            .collect()
    }

    fn vocab(entries: &[&str]) -> Vocab {
        entries
            .iter()
            .map(|&word| (CompactString::new(word), 1))
            .collect()
    }

    fn symbols(entries: &[&str]) -> Vec<CompactString> {
        entries.iter().map(|&s| CompactString::new(s)).collect()
    }

    #[test]
    fn test_in_vocab_symbols_kept() {
        let reversed = reversed(&[("lo", ("l", "o"))]);
        let vocab = vocab(&["lo@@", "w"]);

        let out = limit_vocab(&symbols(&["lo", "w</w>"]), &reversed, &vocab).unwrap();
        assert_eq!(out, symbols(&["lo", "w</w>"]));
    }

    #[test]
    fn test_out_of_vocab_symbol_decomposes() {
        let reversed = reversed(&[
            ("low</w>", ("l", "ow</w>")),
            ("ow</w>", ("o", "w</w>")),
        ]);
        let vocab = vocab(&["l@@", "ow"]);

        let out = limit_vocab(&symbols(&["low</w>"]), &reversed, &vocab).unwrap();
        assert_eq!(out, symbols(&["l", "ow</w>"]));
    }

    #[test]
    fn test_decomposition_bottoms_out_at_code_points() {
        let reversed = reversed(&[("lo", ("l", "o"))]);
        // Nothing is in vocabulary, so everything unravels to code points.
        let vocab = vocab(&["unused"]);

        let out = limit_vocab(&symbols(&["lo", "w</w>"]), &reversed, &vocab).unwrap();
        assert_eq!(out, symbols(&["l", "o", "w</w>"]));
    }

    #[test]
    fn test_unmergeable_multichar_symbol_is_an_error() {
        let reversed = ReversedCodes::new();
        let vocab = vocab(&["unused"]);

        let err = limit_vocab(&symbols(&["lo</w>"]), &reversed, &vocab).unwrap_err();
        assert!(matches!(err, BpeError::Apply(_)));
    }

    #[test]
    fn test_final_symbol_probes_without_end_marker() {
        let reversed = ReversedCodes::new();
        let vocab = vocab(&["w"]);

        let out = limit_vocab(&symbols(&["w</w>"]), &reversed, &vocab).unwrap();
        assert_eq!(out, symbols(&["w</w>"]));
    }
}
