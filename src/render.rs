/*!
# Render Emitter

Wraps each classified [`Span`](crate::tokenizer::Span) of a JSON document in
the ANSI SGR directive of its category, followed by a reset, and passes
everything else through untouched. Stripping the inserted directives from the
output always gives back the input.

## Examples

```rust
use colored::Color;
use jsonhl::render::{Emitter, Palette, Style};

let palette = Palette {
    key: Some(Style::new(Color::Red)),
    ..Palette::plain()
};
let styled = Emitter::new(palette).render(r#"{"a": 1}"#);
assert_eq!(styled, "{\x1b[31m\"a\"\x1b[0m: 1}");
```
*/
use colored::Color;
use std::borrow::Cow;
use std::convert::Infallible;
use std::io;
use std::ops::Range;

use crate::tokenizer::{Category, scan};

/// Resets all attributes; written after every styled span.
pub const RESET: &str = "\x1b[0m";

/// Foreground color plus optional bold weight for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground color
    pub color: Color,
    /// Whether to render in bold
    pub bold: bool,
}

impl Style {
    /// A regular-weight style in `color`.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color, bold: false }
    }

    /// The same style in bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// The SGR directive that switches this style on, e.g. `ESC[1;33m`.
    #[must_use]
    pub fn directive(&self) -> String {
        let weight = if self.bold { "1;" } else { "" };
        format!("\x1b[{weight}{}m", foreground(self.color))
    }
}

/// SGR foreground parameters for `color`.
///
/// True colors are always written as `38;2;r;g;b`, whatever `COLORTERM`
/// says; `colored` alone would map them to the nearest basic color.
fn foreground(color: Color) -> Cow<'static, str> {
    match color {
        Color::TrueColor { r, g, b } => format!("38;2;{r};{g};{b}").into(),
        named => named.to_fg_str(),
    }
}

/// Creates a true-color [`Color`].
const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}

/// Style per category. `None` leaves a category unstyled; [`Category::Plain`]
/// is never styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Object keys
    pub key: Option<Style>,
    /// String values
    pub string: Option<Style>,
    /// Numbers
    pub number: Option<Style>,
    /// `true`
    pub true_literal: Option<Style>,
    /// `false`
    pub false_literal: Option<Style>,
    /// `null`
    pub null: Option<Style>,
    /// `{` and `}`
    pub brace: Option<Style>,
    /// `[` and `]`
    pub bracket: Option<Style>,
    /// `:`
    pub colon: Option<Style>,
    /// `,`
    pub comma: Option<Style>,
}

impl Palette {
    /// A palette that styles nothing. Rendering with it returns the input.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            key: None,
            string: None,
            number: None,
            true_literal: None,
            false_literal: None,
            null: None,
            brace: None,
            bracket: None,
            colon: None,
            comma: None,
        }
    }

    /// The style used for `category`, if any.
    #[must_use]
    pub const fn style_for(&self, category: Category) -> Option<&Style> {
        match category {
            Category::Key => self.key.as_ref(),
            Category::StringValue => self.string.as_ref(),
            Category::Number => self.number.as_ref(),
            Category::True => self.true_literal.as_ref(),
            Category::False => self.false_literal.as_ref(),
            Category::Null => self.null.as_ref(),
            Category::ObjectOpen | Category::ObjectClose => self.brace.as_ref(),
            Category::ArrayOpen | Category::ArrayClose => self.bracket.as_ref(),
            Category::Colon => self.colon.as_ref(),
            Category::Comma => self.comma.as_ref(),
            Category::Plain => None,
        }
    }
}

impl Default for Palette {
    /// Coral keys, green strings, orange numbers, teal `true`, pink `false`,
    /// purple `null`, bold gold braces, bold lavender brackets, gray colons
    /// and plain commas.
    fn default() -> Self {
        Self {
            key: Some(Style::new(rgb(255, 95, 95))),
            string: Some(Style::new(rgb(135, 215, 135))),
            number: Some(Style::new(rgb(255, 175, 95))),
            true_literal: Some(Style::new(rgb(95, 215, 175))),
            false_literal: Some(Style::new(rgb(255, 95, 135))),
            null: Some(Style::new(rgb(175, 135, 175))),
            brace: Some(Style::new(rgb(255, 215, 135)).bold()),
            bracket: Some(Style::new(rgb(175, 175, 255)).bold()),
            colon: Some(Style::new(rgb(138, 138, 138))),
            comma: None,
        }
    }
}

/// A piece of output: either a range of the input or a directive.
enum Piece<'a> {
    Text(Range<usize>),
    Directive(&'a str),
}

/// Renders JSON text with a fixed [`Palette`].
#[derive(Debug, Clone)]
pub struct Emitter {
    palette: Palette,
    /// Start directive per category, indexed by `Category as usize`
    directives: [Option<String>; Category::ALL.len()],
    /// Close and reopen styles around newlines inside a span
    line_safe: bool,
}

impl Emitter {
    /// Creates an emitter for `palette`.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        let directives = Category::ALL
            .map(|category| palette.style_for(category).map(Style::directive));

        Self {
            palette,
            directives,
            line_safe: false,
        }
    }

    /// When enabled, a styled span that contains newlines is reset before
    /// each newline and restyled after it, so every output line carries its
    /// own styling. Useful when the output is later sliced by line, e.g. by a
    /// pager.
    #[must_use]
    pub const fn line_safe(mut self, line_safe: bool) -> Self {
        self.line_safe = line_safe;
        self
    }

    /// The palette this emitter renders with.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Renders `text` into a new string.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() * 2);
        let Ok(()) = self.emit::<Infallible, _>(text.as_bytes(), |piece| {
            match piece {
                Piece::Text(range) => output.push_str(&text[range]),
                Piece::Directive(directive) => output.push_str(directive),
            }
            Ok(())
        });
        output
    }

    /// Renders arbitrary bytes into `writer`. Bytes that are not valid UTF-8
    /// pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write<W: io::Write>(
        &self,
        writer: &mut W,
        input: &[u8],
    ) -> io::Result<()> {
        self.emit(input, |piece| match piece {
            Piece::Text(range) => writer.write_all(&input[range]),
            Piece::Directive(directive) => {
                writer.write_all(directive.as_bytes())
            }
        })
    }

    /// Walks the spans of `input` and hands every output piece to `out`, in
    /// order.
    fn emit<'a, E, F>(&'a self, input: &[u8], mut out: F) -> Result<(), E>
    where
        F: FnMut(Piece<'a>) -> Result<(), E>,
    {
        let mut covered = 0;

        for span in scan(input) {
            debug_assert_eq!(span.start, covered, "spans must partition input");
            covered = span.end;

            let directive = self.directives[span.category as usize].as_deref();
            let Some(directive) = directive else {
                out(Piece::Text(span.range()))?;
                continue;
            };

            if !self.line_safe {
                Self::styled(directive, span.range(), &mut out)?;
                continue;
            }

            let mut segment_start = span.start;
            for newline in span.range().filter(|&i| input[i] == b'\n') {
                Self::styled(directive, segment_start..newline, &mut out)?;
                out(Piece::Text(newline..newline + 1))?;
                segment_start = newline + 1;
            }
            Self::styled(directive, segment_start..span.end, &mut out)?;
        }

        debug_assert_eq!(covered, input.len(), "spans must cover input");
        Ok(())
    }

    /// Emits `range` between `directive` and a reset. Empty ranges emit
    /// nothing.
    fn styled<'a, E, F>(
        directive: &'a str,
        range: Range<usize>,
        out: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(Piece<'a>) -> Result<(), E>,
    {
        if range.is_empty() {
            return Ok(());
        }
        out(Piece::Directive(directive))?;
        out(Piece::Text(range))?;
        out(Piece::Directive(RESET))
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}
