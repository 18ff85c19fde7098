//! # JSON Scanner
//!
//! Classifies an input byte sequence from a (possibly malformed) JSON
//! document into a lazy sequence of [`Span`]s that exactly partition the
//! input.
//!
//! Scanning is pull-based: [`step`] is a pure function from the input and a
//! [`Cursor`] to the next span and the advanced cursor, and [`Scanner`] is the
//! iterator that drives it. Nothing is ever rejected; bytes that fit no other
//! category come out as [`Category::Plain`].
use std::iter::FusedIterator;

use crate::tokenizer::{Category, Span};

/// Literal words recognized outside strings. None is a prefix of another.
const LITERALS: [(&[u8], Category); 3] = [
    (b"true", Category::True),
    (b"false", Category::False),
    (b"null", Category::Null),
];

/// States of the scanner.
///
/// Between tokens the scanner is either in [`ScanState::Default`] or
/// [`ScanState::ExpectingValue`]; the string states are only visited while a
/// quoted token is consumed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ScanState {
    /// Outside a string, after something that is not a value separator
    Default,
    /// Outside a string, after `:`, `,`, `[` or at the start of input. Only
    /// here does a digit, `-` or `.` start a number.
    ExpectingValue,
    /// Inside a quoted string
    InString,
    /// Inside a quoted string, right after an unescaped backslash
    InStringEscaped,
}

impl ScanState {
    /// Returns the state entered after consuming `byte` in this state.
    #[must_use]
    pub const fn next(self, byte: u8) -> Self {
        match (self, byte) {
            (Self::InString, b'\\') => Self::InStringEscaped,
            (Self::InString, b'"') => Self::Default,
            (Self::InString | Self::InStringEscaped, _) => Self::InString,
            (_, b'"') => Self::InString,
            (_, b':' | b',' | b'[') => Self::ExpectingValue,
            (state, b' ' | b'\t' | b'\n' | b'\r') => state,
            _ => Self::Default,
        }
    }
}

/// Position of the scanner within its input.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cursor {
    /// Byte offset of the next unconsumed byte
    pub offset: usize,
    /// State reached after consuming everything before `offset`
    pub state: ScanState,
}

impl Cursor {
    /// The cursor at the start of an input.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            state: ScanState::ExpectingValue,
        }
    }
}

/// Whitespace as far as key detection and value slots are concerned.
const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Category of a single-byte structural token.
const fn delimiter(byte: u8) -> Option<Category> {
    match byte {
        b'{' => Some(Category::ObjectOpen),
        b'}' => Some(Category::ObjectClose),
        b'[' => Some(Category::ArrayOpen),
        b']' => Some(Category::ArrayClose),
        b':' => Some(Category::Colon),
        b',' => Some(Category::Comma),
        _ => None,
    }
}

const fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
}

const fn starts_number(byte: u8, state: ScanState) -> bool {
    matches!(byte, b'0'..=b'9' | b'-' | b'.')
        && matches!(state, ScanState::ExpectingValue)
}

/// Matches a literal word at the start of `rest`. No word boundary is
/// checked: `nullx` yields `null` followed by plain `x`.
fn match_literal(rest: &[u8]) -> Option<(usize, Category)> {
    LITERALS
        .iter()
        .find(|(word, _)| rest.starts_with(word))
        .map(|&(word, category)| (word.len(), category))
}

/// Returns `true` if a non-plain token starts at `position` in `state`.
fn starts_token(input: &[u8], position: usize, state: ScanState) -> bool {
    let byte = input[position];
    byte == b'"'
        || delimiter(byte).is_some()
        || starts_number(byte, state)
        || match_literal(&input[position..]).is_some()
}

/// Looks past any whitespace following `position` for a colon. Only
/// inspects; nothing is consumed.
fn followed_by_colon(input: &[u8], position: usize) -> bool {
    input[position..]
        .iter()
        .find(|&&byte| !is_whitespace(byte))
        .is_some_and(|&byte| byte == b':')
}

/// Reads a quoted string starting at the opening quote at `start`.
fn read_string(
    input: &[u8],
    start: usize,
    state: ScanState,
) -> (usize, Category, ScanState) {
    let mut state = state.next(b'"');
    let mut position = start + 1;

    while let Some(&byte) = input.get(position) {
        state = state.next(byte);
        position += 1;

        if state == ScanState::Default {
            // closing quote
            let category = if followed_by_colon(input, position) {
                Category::Key
            } else {
                Category::StringValue
            };
            return (position, category, state);
        }
    }

    // unterminated: the string swallows the rest of the input
    (input.len(), Category::StringValue, state)
}

/// Reads a permissive numeric literal starting at `start`.
fn read_number(input: &[u8], start: usize) -> (usize, Category, ScanState) {
    let end = input[start..]
        .iter()
        .position(|&byte| !is_number_byte(byte))
        .map_or(input.len(), |len| start + len);

    (end, Category::Number, ScanState::Default)
}

/// Reads a maximal run of plain bytes starting at `start`.
///
/// The run stops at the first byte that starts another token in the state
/// reached so far. A backslash takes the following byte with it, so an
/// escaped quote outside a string never opens one.
fn read_plain(
    input: &[u8],
    start: usize,
    mut state: ScanState,
) -> (usize, Category, ScanState) {
    let mut position = start;

    while let Some(&byte) = input.get(position) {
        if position > start && starts_token(input, position, state) {
            break;
        }
        position += 1;

        if byte == b'\\' {
            position = (position + 1).min(input.len());
            state = ScanState::Default;
        } else {
            state = state.next(byte);
        }
    }

    (position, Category::Plain, state)
}

/// Consumes the next token of `input` at `cursor`.
///
/// Returns the classified span together with the advanced cursor, or `None`
/// once the cursor has reached the end of the input. This is a pure
/// function: the same input and cursor always give the same result.
#[must_use]
pub fn step(input: &[u8], cursor: Cursor) -> Option<(Span, Cursor)> {
    let start = cursor.offset;
    let &byte = input.get(start)?;

    let (end, category, state) = match byte {
        b'"' => read_string(input, start, cursor.state),
        _ if starts_number(byte, cursor.state) => read_number(input, start),
        _ => match (delimiter(byte), match_literal(&input[start..])) {
            (Some(category), _) => {
                (start + 1, category, cursor.state.next(byte))
            }
            (None, Some((len, category))) => {
                (start + len, category, ScanState::Default)
            }
            (None, None) => read_plain(input, start, cursor.state),
        },
    };

    Some((Span::new(start, end, category), Cursor { offset: end, state }))
}

/// A lazy scanner over an input byte sequence, yielding [`Span`]s in input
/// order.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    /// The input sequence of bytes to classify
    input: &'a [u8],
    /// Where the next span starts
    cursor: Cursor,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            cursor: Cursor::start(),
        }
    }

    /// The current cursor. Once the scanner is exhausted, its state tells
    /// whether the input ended inside a string.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, cursor) = step(self.input, self.cursor)?;
        self.cursor = cursor;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // every span covers at least one byte
        let remaining = self.input.len().saturating_sub(self.cursor.offset);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan an input byte sequence into classified spans covering all of it.
#[must_use]
pub const fn scan(input: &[u8]) -> Scanner<'_> {
    Scanner::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    /// Scans `input` and pairs each category with the text it covers.
    fn classify(input: &str) -> Vec<(Category, &str)> {
        scan(input.as_bytes())
            .map(|span| (span.category, &input[span.range()]))
            .collect()
    }

    /// Asserts that the spans of `input` partition it exactly.
    fn assert_covers(input: &str) {
        let mut expected_start = 0;
        for span in scan(input.as_bytes()) {
            assert_eq!(span.start, expected_start, "gap/overlap in {input:?}");
            assert!(!span.is_empty(), "empty span in {input:?}");
            expected_start = span.end;
        }
        assert_eq!(expected_start, input.len(), "{input:?} not fully covered");
    }

    #[test]
    fn test_empty() {
        assert_eq!(scan(b"").count(), 0);
    }

    #[test]
    fn key_and_string_value() {
        assert_eq!(
            classify(r#"{"a": "b"}"#),
            vec![
                (ObjectOpen, "{"),
                (Key, r#""a""#),
                (Colon, ":"),
                (Plain, " "),
                (StringValue, r#""b""#),
                (ObjectClose, "}"),
            ]
        );
    }

    #[test]
    fn key_detection_skips_whitespace() {
        let input = "{\r\n  \"a\"\r\n\t : 1\r\n}";
        let keys: Vec<_> = classify(input)
            .into_iter()
            .filter(|(category, _)| *category == Key)
            .collect();
        assert_eq!(keys, vec![(Key, r#""a""#)]);
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        assert_eq!(classify(r#""a\"b""#), vec![(StringValue, r#""a\"b""#)]);
    }

    #[test]
    fn escaped_backslash_closes_string() {
        assert_eq!(
            classify(r#""\\": 1"#),
            vec![
                (Key, r#""\\""#),
                (Colon, ":"),
                (Plain, " "),
                (Number, "1"),
            ]
        );
    }

    #[test]
    fn test_escape_sequences() {
        let cases = [
            r#""Test \"quoted\" text""#,
            r#""Backslash: \\""#,
            r#""Forward slash: \/""#,
            r#""Newline: \n""#,
            r#""Tab: \t""#,
            r#""Unicode: \u0041\u0042\u0043""#,
            r#""Mixed: \"\\\n\t ""#,
        ];

        for input in &cases {
            assert_eq!(classify(input), vec![(StringValue, *input)]);
        }
    }

    #[test]
    fn literals_without_gaps() {
        assert_eq!(
            classify("[true,false,null]"),
            vec![
                (ArrayOpen, "["),
                (True, "true"),
                (Comma, ","),
                (False, "false"),
                (Comma, ","),
                (Null, "null"),
                (ArrayClose, "]"),
            ]
        );
    }

    #[test]
    fn literal_prefix_matches_greedily() {
        assert_eq!(classify("nullx"), vec![(Null, "null"), (Plain, "x")]);
    }

    #[test]
    fn truncated_literal_is_plain() {
        assert_eq!(
            classify(r#"{"a": tru}"#),
            vec![
                (ObjectOpen, "{"),
                (Key, r#""a""#),
                (Colon, ":"),
                (Plain, " tru"),
                (ObjectClose, "}"),
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let input = r#"{"a": "b"#;
        let spans: Vec<Span> = scan(input.as_bytes()).collect();
        let last = spans.last().copied().expect("at least one span");

        assert_eq!(last, Span::new(6, input.len(), StringValue));
        assert_eq!(
            spans.iter().filter(|s| s.category == StringValue).count(),
            1
        );
    }

    #[test]
    fn unterminated_string_reports_state() {
        let mut scanner = scan(br#"["abc\"#);
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.cursor().state, ScanState::InStringEscaped);
    }

    #[test]
    fn test_number_variants() {
        let cases = ["0", "-0", "123", "-123", "3.14", "0.001e-10", "-12.5e+3"];
        for input in &cases {
            assert_eq!(classify(input), vec![(Number, *input)]);
        }
    }

    #[test]
    fn malformed_numbers_still_colored() {
        assert_eq!(
            classify("[.5, 1.2.3, -]"),
            vec![
                (ArrayOpen, "["),
                (Number, ".5"),
                (Comma, ","),
                (Plain, " "),
                (Number, "1.2.3"),
                (Comma, ","),
                (Plain, " "),
                (Number, "-"),
                (ArrayClose, "]"),
            ]
        );
    }

    #[test]
    fn digits_outside_value_slot_are_plain() {
        assert_eq!(
            classify(r#"{"a" 5}"#),
            vec![
                (ObjectOpen, "{"),
                (StringValue, r#""a""#),
                (Plain, " 5"),
                (ObjectClose, "}"),
            ]
        );
        assert_eq!(
            classify("[x1]"),
            vec![(ArrayOpen, "["), (Plain, "x1"), (ArrayClose, "]")]
        );
    }

    #[test]
    fn whitespace_keeps_value_slot_open() {
        assert_eq!(
            classify("[ \n 1]"),
            vec![
                (ArrayOpen, "["),
                (Plain, " \n "),
                (Number, "1"),
                (ArrayClose, "]"),
            ]
        );
    }

    #[test]
    fn backslash_outside_string_escapes_quote() {
        assert_eq!(
            classify(r#"\"a""#),
            vec![(Plain, r#"\"a"#), (StringValue, "\"")]
        );
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            classify(r#"{"ключ": "значение", "emoji": "🦀"}"#)
                .into_iter()
                .filter(|(category, _)| *category != Plain)
                .collect::<Vec<_>>(),
            vec![
                (ObjectOpen, "{"),
                (Key, r#""ключ""#),
                (Colon, ":"),
                (StringValue, r#""значение""#),
                (Comma, ","),
                (Key, r#""emoji""#),
                (Colon, ":"),
                (StringValue, r#""🦀""#),
                (ObjectClose, "}"),
            ]
        );
    }

    #[test]
    fn nested_document() {
        let input = concat!(
            r#"{"data": [{"id": "1", "likes": 42, "ok": true}], "#,
            r#""_meta": null}"#,
        );
        let categories: Vec<Category> = scan(input.as_bytes())
            .map(|span| span.category)
            .filter(|category| *category != Plain)
            .collect();

        assert_eq!(
            categories,
            vec![
                ObjectOpen, Key, Colon, ArrayOpen, ObjectOpen, Key, Colon,
                StringValue, Comma, Key, Colon, Number, Comma, Key, Colon,
                True, ObjectClose, ArrayClose, Comma, Key, Colon, Null,
                ObjectClose,
            ]
        );
    }

    #[test]
    fn spans_cover_input() {
        let cases = [
            "",
            " ",
            r#"{"a": "b"}"#,
            r#"{"a": tru}"#,
            r#"{"a": "b"#,
            r#"\"#,
            r#"a\"#,
            "[[[[[[[[[[",
            "}}]]::,,",
            r#""\"#,
            "  -1e5 true  nul l\t\"x\"\n:",
            "caf\u{e9} \u{1f980}",
        ];
        for input in &cases {
            assert_covers(input);
        }
    }

    #[test]
    fn step_is_pure() {
        let input = br#"{"a":1}"#;
        let first = step(input, Cursor::start());

        assert_eq!(first, step(input, Cursor::start()));
        assert_eq!(
            first,
            Some((
                Span::new(0, 1, ObjectOpen),
                Cursor {
                    offset: 1,
                    state: ScanState::Default
                }
            ))
        );
        assert_eq!(
            step(input, Cursor {
                offset: input.len(),
                state: ScanState::Default
            }),
            None
        );
    }

    #[test]
    fn scanning_is_repeatable() {
        let input = br#"{"a": [1, "two", null], "b": {"c": false}}"#;
        let first: Vec<Span> = scan(input).collect();
        let second: Vec<Span> = scan(input).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn state_transitions() {
        use ScanState as S;

        assert_eq!(S::Default.next(b'"'), S::InString);
        assert_eq!(S::ExpectingValue.next(b'"'), S::InString);
        assert_eq!(S::InString.next(b'\\'), S::InStringEscaped);
        assert_eq!(S::InStringEscaped.next(b'"'), S::InString);
        assert_eq!(S::InStringEscaped.next(b'\\'), S::InString);
        assert_eq!(S::InString.next(b'"'), S::Default);
        assert_eq!(S::InString.next(b':'), S::InString);
        assert_eq!(S::Default.next(b':'), S::ExpectingValue);
        assert_eq!(S::Default.next(b','), S::ExpectingValue);
        assert_eq!(S::Default.next(b'['), S::ExpectingValue);
        assert_eq!(S::ExpectingValue.next(b'{'), S::Default);
        assert_eq!(S::ExpectingValue.next(b' '), S::ExpectingValue);
        assert_eq!(S::Default.next(b'\n'), S::Default);
        assert_eq!(S::ExpectingValue.next(b'x'), S::Default);
    }
}
