//! Subcommands of the `jhl` binary that do not highlight anything.
pub mod generate;
