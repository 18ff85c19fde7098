/*!
Main binary for jsonhl.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::borrow::Cow;
use std::io::{self, stdout};
use std::{
    fs,
    io::{IsTerminal, Read},
    path::PathBuf,
};

use jsonhl::commands;
use jsonhl::formats::{self, FormatError, InputFormat, Layout};
use jsonhl::render::{Emitter, Palette};
use jsonhl::{theme, utils};

/// Highlight a JSON document for the terminal.
#[derive(Parser)]
#[command(
    name = "jhl",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to the input document. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Input format. `auto` infers it from the file extension; STDIN and
    /// unknown extensions are read as JSON
    #[arg(short, long, value_enum, default_value_t = FormatChoice::Auto)]
    format: FormatChoice,
    /// Re-indent the document before highlighting
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "compact")]
    pretty: bool,
    /// Remove all insignificant whitespace before highlighting
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// When to emit colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Theme file (.json, .yaml or .toml) overriding the default colors
    #[arg(long, value_name = "THEME")]
    theme: Option<PathBuf>,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Available subcommands for `jhl`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate man pages for jhl to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// How to pick the input format.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatChoice {
    /// From the file extension, falling back to JSON
    Auto,
    Json,
    Yaml,
    Toml,
    Cbor,
    Msgpack,
}

impl FormatChoice {
    /// The explicitly requested format, or `None` for `auto`.
    const fn format(self) -> Option<InputFormat> {
        match self {
            Self::Auto => None,
            Self::Json => Some(InputFormat::Json),
            Self::Yaml => Some(InputFormat::Yaml),
            Self::Toml => Some(InputFormat::Toml),
            Self::Cbor => Some(InputFormat::Cbor),
            Self::Msgpack => Some(InputFormat::Msgpack),
        }
    }
}

/// When to emit colors.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Only when STDOUT is a terminal and `NO_COLOR`/`CLICOLOR` allow it
    Auto,
    /// Always
    Always,
    /// Never; the document is printed as read
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                io::stdout().is_terminal()
                    && colored::control::SHOULD_COLORIZE.should_colorize()
            }
        }
    }
}

/// Entry point for main binary.
///
/// This reads the input document from a file or, if piped in, from STDIN,
/// converts it to JSON text if needed and prints it highlighted to STDOUT.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match &args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                commands::generate::generate_completions(
                    *shell,
                    &mut Args::command(),
                    &mut stdout().lock(),
                );
            }
            GenerateCommand::Man { output_dir } => {
                let pages = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir.clone(),
                )?;
                for page in pages {
                    println!("Generated: {}", page.display());
                }
            }
        },
        None => highlight(&args)?,
    }

    Ok(())
}

/// Reads, converts and prints the input document.
fn highlight(args: &Args) -> Result<()> {
    let (input, format) = if let Some(path) = &args.input {
        let input = fs::read(path).with_context(|| {
            format!("Failed to read file {}", path.display())
        })?;
        let format = args
            .format
            .format()
            .or_else(|| InputFormat::from_path(path))
            .unwrap_or(InputFormat::Json);
        (input, format)
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            return Ok(cmd.print_help()?);
        }
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        (buffer, args.format.format().unwrap_or(InputFormat::Json))
    };
    log::debug!("reading {} bytes as {format}", input.len());

    let layout = if args.pretty {
        Layout::Pretty
    } else if args.compact {
        Layout::Compact
    } else {
        Layout::Preserve
    };

    let text = match formats::to_json_text(&input, format, layout) {
        Ok(text) => text,
        Err(err @ FormatError::Parse { .. }) if format == InputFormat::Json => {
            log::warn!("{err}; highlighting the input as is");
            Cow::Borrowed(input.as_slice())
        }
        Err(err) => {
            return Err(err).context("Failed to convert input to JSON");
        }
    };

    let palette = match &args.theme {
        Some(path) => theme::load_palette(path).with_context(|| {
            format!("Failed to load theme {}", path.display())
        })?,
        None => Palette::default(),
    };
    let palette = if args.color.enabled() {
        palette
    } else {
        log::debug!("colors disabled");
        Palette::plain()
    };

    let emitter = Emitter::new(palette).line_safe(true);
    utils::write_rendered(&mut stdout().lock(), &emitter, &text)
}
