/*!
# `jsonhl` Library

Highlights JSON text for the terminal in a single pass, without parsing it
into a tree. Input does not have to be valid JSON: malformed, truncated or
deeply nested documents are classified as well as they locally can be, and
every input byte makes it to the output unchanged.

```rust
let styled = jsonhl::render(r#"{"ok": true}"#);
assert_eq!(jsonhl::utils::strip_styles(&styled), r#"{"ok": true}"#);
```
*/

pub mod commands;
pub mod formats;
pub mod render;
pub mod theme;
pub mod tokenizer;
pub mod utils;

/// Renders `text` with the default [`Palette`](render::Palette).
#[must_use]
pub fn render(text: &str) -> String {
    render::Emitter::default().render(text)
}
