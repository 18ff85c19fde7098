//! Miscellaneous utility functions.

use anyhow::Context as _;
use regex::Regex;
use std::borrow::Cow;
use std::io::Write;
use std::io::{self, ErrorKind};
use std::sync::LazyLock;

use crate::render::Emitter;

/// Matches SGR escape sequences such as `ESC[1;38;2;255;95;95m`.
static SGR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\x1b\\[[0-9;]*m").expect("hardcoded SGR pattern")
});

/// Removes SGR style directives from `styled`, e.g. to measure its visible
/// width. Borrows when there is nothing to strip.
#[must_use]
pub fn strip_styles(styled: &str) -> Cow<'_, str> {
    SGR.replace_all(styled, "")
}

// =============================================================================
// Colorized JSON Output
// =============================================================================

/// Write `input` rendered by `emitter` to `writer`, followed by a newline
/// unless `input` already ends with one. Silently returns `Ok(())` on broken
/// pipe so that piping to tools like `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_rendered<W: Write>(
    writer: &mut W,
    emitter: &Emitter,
    input: &[u8],
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        emitter.write(writer, input)?;
        if !input.is_empty() && !input.ends_with(b"\n") {
            writeln!(writer)?;
        }
        writer.flush()
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write highlighted JSON to stdout"),
    }
}
