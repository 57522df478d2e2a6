// Contract tests for the escape decoder and quote-aware unwrapper.
use jsonmend::api::{advanced_unescape, decode, ErrorKind, Variant};

#[test]
fn decode_is_identity_on_backslash_free_text() {
    let inputs = [
        "",
        "plain",
        "{\"key\": [1, 2, 3]}",
        "multi\nline already decoded",
        "unicode: é 😀 中文",
    ];
    for input in inputs {
        assert_eq!(decode(input, Variant::Unescape), input);
        assert_eq!(decode(input, Variant::ParseEscapes), input);
    }
}

#[test]
fn decode_is_idempotent_on_decoded_output_without_backslashes() {
    let inputs = [r#"\"quoted\"\nline"#, r"A\t", r"\x41 plus text"];
    for input in inputs {
        let once = decode(input, Variant::ParseEscapes);
        if !once.contains('\\') {
            assert_eq!(decode(&once, Variant::ParseEscapes), once);
        }
    }
}

#[test]
fn four_hex_digit_escapes_yield_that_code_unit() {
    for (escape, expected) in [
        (r"\u0041", "A"),
        (r"\u0020", " "),
        (r"\u00e9", "é"),
        (r"\u4e2d", "中"),
        (r"\u0009", "\t"),
    ] {
        assert_eq!(decode(escape, Variant::Unescape), expected);
    }
}

#[test]
fn advanced_unescape_double_quoted_uses_strict_grammar() {
    assert_eq!(advanced_unescape(r#""a\nb""#).unwrap(), "a\nb");
}

#[test]
fn advanced_unescape_single_quoted_uses_permissive_decoder() {
    assert_eq!(advanced_unescape(r"'a\nb'").unwrap(), "a\nb");
}

#[test]
fn advanced_unescape_rejects_empty_input() {
    let err = advanced_unescape("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    let err = advanced_unescape(" \t\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn escaped_backslash_is_not_reinterpreted_as_escape_start() {
    // Backslash, backslash, n: a literal backslash then the letter n.
    let decoded = decode(r"\\n", Variant::Unescape);
    assert_eq!(decoded, "\\n");
    assert_eq!(decoded.chars().collect::<Vec<_>>(), ['\\', 'n']);

    let decoded = decode(r"\\n", Variant::ParseEscapes);
    assert_eq!(decoded, "\\n");
}

#[test]
fn incomplete_hex_escape_is_left_unchanged() {
    assert_eq!(decode(r"\x", Variant::Unescape), r"\x");
    assert_eq!(decode(r"\x7", Variant::ParseEscapes), r"\x7");
    assert_eq!(decode(r"\u12", Variant::Unescape), r"\u12");
}

#[test]
fn decode_never_fails_on_adversarial_input() {
    let inputs = [
        "\\",
        "\\\\\\",
        r"\q\w\e",
        r"\u\u\u",
        r"\xzz\uqqqq",
        r"\ud800\ud800",
        "mixed \\ud83d\\ude00 tail \\",
    ];
    for input in inputs {
        let _ = decode(input, Variant::Unescape);
        let _ = decode(input, Variant::ParseEscapes);
    }
}
