//! Tests for separator escape handling.

use crate::config::unescape;

#[test]
fn backslash_n_becomes_newline() {
    assert_eq!(unescape("\\n"), "\n");
    assert_eq!(unescape("\\n").as_bytes(), b"\n");
}

#[test]
fn plain_text_is_untouched() {
    assert_eq!(unescape("|"), "|");
    assert_eq!(unescape(", "), ", ");
    assert_eq!(unescape(""), "");
    assert_eq!(unescape("héllo"), "héllo");
}

#[test]
fn simple_escapes() {
    assert_eq!(unescape("\\t"), "\t");
    assert_eq!(unescape("\\r\\n"), "\r\n");
    assert_eq!(unescape("\\\\"), "\\");
    assert_eq!(unescape("\\'\\\""), "'\"");
    assert_eq!(unescape("\\a\\b\\f\\v"), "\u{07}\u{08}\u{0c}\u{0b}");
}

#[test]
fn numeric_escapes() {
    assert_eq!(unescape("\\0"), "\0");
    assert_eq!(unescape("\\101"), "A");
    assert_eq!(unescape("\\1011"), "A1");
    assert_eq!(unescape("\\x41"), "A");
    assert_eq!(unescape("\\u00e9"), "é");
    assert_eq!(unescape("\\U0001F600"), "😀");
}

#[test]
fn line_continuation_is_removed() {
    assert_eq!(unescape("a\\\nb"), "ab");
}

#[test]
fn unknown_or_incomplete_escapes_stay_literal() {
    assert_eq!(unescape("\\q"), "\\q");
    assert_eq!(unescape("\\x4"), "\\x4");
    assert_eq!(unescape("\\xzz"), "\\xzz");
    assert_eq!(unescape("\\ud800"), "\\ud800");
    assert_eq!(unescape("end\\"), "end\\");
}

#[test]
fn escaped_backslash_before_n_is_not_a_newline() {
    assert_eq!(unescape("\\\\n"), "\\n");
}
