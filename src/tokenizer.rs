//! # Tokenizer/ Scanner
//!
//! Classifies an input sequence of bytes from a JSON document into spans.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Cursor, ScanState, Scanner, scan, step};
pub use token::{Category, Span};
