//! # Spans
//!
//! Defines the classified byte ranges produced by scanning a JSON document.
use std::fmt::Display;
use std::ops::Range;

/// The lexical category of a [`Span`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    /* Delimiters */
    /// Opening curly brace
    ObjectOpen,

    /// Closing curly brace
    ObjectClose,

    /// Opening square bracket
    ArrayOpen,

    /// Closing square bracket
    ArrayClose,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Strings */
    /// Quoted string followed by a colon, quotes included
    Key,

    /// Any other quoted string, quotes included. Unterminated strings run to
    /// the end of the input.
    StringValue,

    /* Values */
    /// Numeric literal, loosely matched
    Number,

    /// `true` literal
    True,

    /// `false` literal
    False,

    /// `null` literal
    Null,

    /* Reserved */
    /// Whitespace and anything not recognized above
    Plain,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::ObjectOpen,
        Self::ObjectClose,
        Self::ArrayOpen,
        Self::ArrayClose,
        Self::Colon,
        Self::Comma,
        Self::Key,
        Self::StringValue,
        Self::Number,
        Self::True,
        Self::False,
        Self::Null,
        Self::Plain,
    ];

    /// Returns `true` for categories that occupy a value slot.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::StringValue
                | Self::Number
                | Self::True
                | Self::False
                | Self::Null
        )
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ObjectOpen => "object-open",
            Self::ObjectClose => "object-close",
            Self::ArrayOpen => "array-open",
            Self::ArrayClose => "array-close",
            Self::Colon => "colon",
            Self::Comma => "comma",
            Self::Key => "key",
            Self::StringValue => "string",
            Self::Number => "number",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Plain => "plain",
        };
        write!(f, "{name}")
    }
}

/// A classified range of the input, `[start, end)` in bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Span {
    /// Byte offset of the first byte (inclusive)
    pub start: usize,
    /// Byte offset one past the last byte (exclusive)
    pub end: usize,
    /// Lexical category of the covered bytes
    pub category: Category,
}

impl Span {
    /// Creates a new span over `[start, end)`.
    #[must_use]
    pub const fn new(start: usize, end: usize, category: Category) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no bytes. The scanner never produces
    /// empty spans.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The covered bytes of `input`.
    ///
    /// # Panics
    ///
    /// Panics if the span lies outside `input`, i.e. it was produced for a
    /// different input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.range()]
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}..{}]", self.category, self.start, self.end)
    }
}
