//! `generate` subcommand: shell completions and man pages.
use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the completion script of `cmd` for `shell` to `writer`.
pub fn generate_completions<W: Write>(
    shell: Shell,
    cmd: &mut Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Renders man pages for `cmd` and, recursively, all of its subcommands into
/// `output_dir` if specified, else the current directory. Subcommand pages are
/// named after their full invocation, e.g. `jhl-generate-man.1`.
///
/// Returns the paths of the pages written, parent commands first.
///
/// # Errors
///
/// Returns an error if the output directory or a page cannot be created.
pub fn generate_man_pages(
    cmd: &Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut written = Vec::new();
    let root = cmd.clone().disable_help_subcommand(true);
    render_page(root, &output_dir, &mut written)?;
    Ok(written)
}

/// Writes the page for `cmd` (already carrying its full name), then recurses.
fn render_page(
    cmd: Command,
    output_dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let name = cmd.get_name().to_string();
    let path = output_dir.join(format!("{name}.1"));

    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd.clone())
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("rendered man page {}", path.display());
    written.push(path);

    for subcmd in cmd.get_subcommands() {
        // NAME, SYNOPSIS and SEE ALSO use the prefixed name
        let renamed = subcmd
            .clone()
            .name(format!("{name}-{}", subcmd.get_name()))
            .disable_help_subcommand(true);
        render_page(renamed, output_dir, written)?;
    }

    Ok(())
}
