//! Purpose: Strip one enclosing quote pair, then decode with the right strategy.
//! Exports: `QuoteWrapper`, `advanced_unescape`.
//! Role: Quote-aware front end over the escape decoder.
//! Invariants: Only the outermost quote pair is stripped, exactly once.
//! Invariants: Strict-decode failures never surface; they fall back to the permissive decoder.

use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::escape::{self, Variant};

/// Whether the trimmed input is enclosed in one matching pair of quotes.
/// Recomputed per call from the first and last character only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuoteWrapper {
    None,
    Double,
    Single,
}

pub fn classify(text: &str) -> QuoteWrapper {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return QuoteWrapper::None;
    };
    match (first, last) {
        ('"', '"') => QuoteWrapper::Double,
        ('\'', '\'') => QuoteWrapper::Single,
        _ => QuoteWrapper::None,
    }
}

/// Decode text that may have been copied with its surrounding quotes.
///
/// Double-quoted input gets a strict pass through the JSON string grammar
/// first; single-quoted and unquoted input always use the permissive decoder.
/// Errs only when the input is empty or whitespace-only.
pub fn advanced_unescape(text: &str) -> Result<String, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("input is empty")
            .with_hint("Provide text containing escape sequences to decode."));
    }

    match classify(trimmed) {
        QuoteWrapper::None => Ok(escape::decode(trimmed, Variant::Unescape)),
        QuoteWrapper::Double => {
            let body = strip_outer_quotes(trimmed);
            Ok(strict_decode(body)
                .unwrap_or_else(|| escape::decode(body, Variant::Unescape)))
        }
        QuoteWrapper::Single => {
            let body = strip_outer_quotes(trimmed);
            Ok(escape::decode(body, Variant::Unescape))
        }
    }
}

fn strip_outer_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Parse `body` as the content of a JSON string literal. None on any
/// grammar violation, which the caller treats as a fallback signal.
fn strict_decode(body: &str) -> Option<String> {
    let literal = format!("\"{body}\"");
    match serde_json::from_str::<String>(&literal) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            debug!(error = %err, "strict decode failed; using permissive decoder");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{advanced_unescape, classify, QuoteWrapper};
    use crate::core::error::ErrorKind;

    #[test]
    fn classify_reads_first_and_last_char_only() {
        assert_eq!(classify(r#""abc""#), QuoteWrapper::Double);
        assert_eq!(classify("'abc'"), QuoteWrapper::Single);
        assert_eq!(classify(r#""abc'"#), QuoteWrapper::None);
        assert_eq!(classify("abc"), QuoteWrapper::None);
        assert_eq!(classify(""), QuoteWrapper::None);
        assert_eq!(classify("\""), QuoteWrapper::None);
    }

    #[test]
    fn empty_input_is_a_usage_error() {
        for input in ["", "   ", "\n\t "] {
            let err = advanced_unescape(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Usage);
        }
    }

    #[test]
    fn double_quoted_takes_strict_path() {
        assert_eq!(advanced_unescape(r#""a\nb""#).unwrap(), "a\nb");
        assert_eq!(advanced_unescape(r#""tab\there""#).unwrap(), "tab\there");
    }

    #[test]
    fn double_quoted_strict_handles_surrogate_pairs() {
        assert_eq!(advanced_unescape(r#""😀""#).unwrap(), "😀");
    }

    #[test]
    fn malformed_double_quoted_falls_back_to_permissive() {
        // \x is not JSON string grammar; strict fails, permissive decodes it.
        assert_eq!(advanced_unescape(r#""a\x41b""#).unwrap(), "aAb");
        // Unknown escape letter survives the fallback untouched.
        assert_eq!(advanced_unescape(r#""a\qb""#).unwrap(), r"a\qb");
    }

    #[test]
    fn single_quoted_always_permissive() {
        assert_eq!(advanced_unescape(r"'a\nb'").unwrap(), "a\nb");
        assert_eq!(advanced_unescape(r"'it\'s'").unwrap(), "it's");
    }

    #[test]
    fn unquoted_input_decodes_directly() {
        assert_eq!(advanced_unescape(r"a\tb").unwrap(), "a\tb");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_classification() {
        assert_eq!(advanced_unescape("  \"a\\nb\"  ").unwrap(), "a\nb");
    }

    #[test]
    fn only_one_quote_pair_is_stripped() {
        assert_eq!(advanced_unescape(r#"""x"""#).unwrap(), "\"x\"");
    }
}
