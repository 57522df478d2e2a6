//! Purpose: Decode literal backslash-escape notation into the characters it names.
//! Exports: `Variant`, `decode`.
//! Role: Shared decoding primitive behind `parse-escapes`, `unescape`, and `unwrap`.
//! Invariants: Decoding is total; unrecognized or incomplete tokens pass through unchanged.
//! Invariants: A single forward scan, so output characters are never re-interpreted.

/// Which escape tokens are active. The two variants differ only in whether
/// `\v` and `\0` are decoded; everything else is shared.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    /// Quote escapes, `\\`, `\n \r \t \b \f`, `\uXXXX`, `\xXX`.
    Unescape,
    /// `Unescape` plus `\v` and `\0`.
    ParseEscapes,
}

/// Decode all recognized escape tokens in `text` in one left-to-right pass.
///
/// At each backslash the longest valid token is matched and consumed; the
/// decoded character is emitted and never rescanned, so `\\n` yields a
/// backslash followed by the letter `n`, not a newline. A lone trailing
/// backslash, a `\u`/`\x` with too few hex digits, or an unknown escape
/// letter is copied through verbatim.
pub fn decode(text: &str, variant: Variant) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(&next) = chars.peek() else {
            // Trailing lone backslash.
            out.push('\\');
            break;
        };
        match next {
            '"' | '\'' | '\\' => {
                chars.next();
                out.push(next);
            }
            'n' => {
                chars.next();
                out.push('\n');
            }
            'r' => {
                chars.next();
                out.push('\r');
            }
            't' => {
                chars.next();
                out.push('\t');
            }
            'b' => {
                chars.next();
                out.push('\u{0008}');
            }
            'f' => {
                chars.next();
                out.push('\u{000c}');
            }
            'v' if variant == Variant::ParseEscapes => {
                chars.next();
                out.push('\u{000b}');
            }
            '0' if variant == Variant::ParseEscapes => {
                chars.next();
                out.push('\0');
            }
            'u' => decode_unicode(&mut chars, &mut out),
            'x' => decode_hex(&mut chars, &mut out),
            _ => {
                // Unknown escape letter: keep the backslash, let the letter
                // flow through the normal path on the next iteration.
                out.push('\\');
            }
        }
    }

    out
}

/// Consume `u` + 4 hex digits and emit the code unit, or copy `\u...`
/// through unchanged when fewer than 4 hex digits follow.
fn decode_unicode(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    let mut lookahead = chars.clone();
    lookahead.next(); // the 'u'
    let Some(unit) = take_hex_units(&mut lookahead, 4) else {
        out.push('\\');
        return;
    };

    if !is_high_surrogate(unit) {
        *chars = lookahead;
        push_unit(unit, out);
        return;
    }

    // UTF-16 semantics: a high surrogate pairs with an immediately following
    // low-surrogate escape. Rust strings cannot hold a lone surrogate, so an
    // unpaired half becomes U+FFFD.
    let mut paired = lookahead.clone();
    if paired.next() == Some('\\') && paired.next() == Some('u') {
        if let Some(low) = take_hex_units(&mut paired, 4) {
            if is_low_surrogate(low) {
                *chars = paired;
                let combined =
                    0x10000 + ((u32::from(unit) - 0xd800) << 10) + (u32::from(low) - 0xdc00);
                out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                return;
            }
        }
    }
    *chars = lookahead;
    out.push(char::REPLACEMENT_CHARACTER);
}

/// Consume `x` + 2 hex digits and emit the code unit, or copy `\x...`
/// through unchanged when fewer than 2 hex digits follow.
fn decode_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) {
    let mut lookahead = chars.clone();
    lookahead.next(); // the 'x'
    match take_hex_units(&mut lookahead, 2) {
        Some(unit) => {
            *chars = lookahead;
            push_unit(unit, out);
        }
        None => out.push('\\'),
    }
}

fn take_hex_units(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, count: u32) -> Option<u16> {
    let mut value = 0u16;
    for _ in 0..count {
        let digit = chars.next()?.to_digit(16)?;
        value = (value << 4) | digit as u16;
    }
    Some(value)
}

fn push_unit(unit: u16, out: &mut String) {
    match char::from_u32(u32::from(unit)) {
        Some(ch) => out.push(ch),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xd800..=0xdbff).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xdc00..=0xdfff).contains(&unit)
}
