/*!
# Themes

Loads [`Palette`] overrides from a theme file. The file format follows its
extension (see [`InputFormat::from_path`]); each entry is either a color, the
string `"none"`, or a table with `color` and `bold`:

```toml
base = "default"        # or "plain" to start from an unstyled palette
key = "#e06c75"
string = "green"
comma = "none"

[bracket]
color = "bright blue"
bold = true
```

Colors are `#rrggbb` hex values or any color name `colored` understands.
*/
use colored::Color;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::formats::{self, FormatError, InputFormat};
use crate::render::{Palette, Style};

/// Palette a theme file starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// [`Palette::default`]
    #[default]
    Default,
    /// [`Palette::plain`]
    Plain,
}

/// One category entry of a theme file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StyleEntry {
    /// A bare color, or `"none"` to leave the category unstyled
    Color(String),
    /// A color with a weight
    Style {
        /// Color name or `#rrggbb`
        color: String,
        /// Whether to render in bold
        #[serde(default)]
        bold: bool,
    },
}

impl StyleEntry {
    /// Resolves the entry; `None` means unstyled.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownColor`] for unrecognized colors.
    pub fn resolve(&self) -> Result<Option<Style>, ThemeError> {
        match self {
            Self::Color(color) if color.eq_ignore_ascii_case("none") => {
                Ok(None)
            }
            Self::Color(color) => {
                parse_color(color).map(|c| Some(Style::new(c)))
            }
            Self::Style { color, bold } => {
                let style = Style::new(parse_color(color)?);
                Ok(Some(if *bold { style.bold() } else { style }))
            }
        }
    }
}

/// Contents of a theme file. Omitted categories keep the base style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Starting palette
    #[serde(default)]
    pub base: Base,
    pub key: Option<StyleEntry>,
    pub string: Option<StyleEntry>,
    pub number: Option<StyleEntry>,
    #[serde(rename = "true")]
    pub true_literal: Option<StyleEntry>,
    #[serde(rename = "false")]
    pub false_literal: Option<StyleEntry>,
    pub null: Option<StyleEntry>,
    pub brace: Option<StyleEntry>,
    pub bracket: Option<StyleEntry>,
    pub colon: Option<StyleEntry>,
    pub comma: Option<StyleEntry>,
}

impl ThemeConfig {
    /// Builds the palette described by this theme.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownColor`] if any entry names an
    /// unrecognized color.
    pub fn to_palette(&self) -> Result<Palette, ThemeError> {
        let mut palette = match self.base {
            Base::Default => Palette::default(),
            Base::Plain => Palette::plain(),
        };

        let overrides = [
            (&mut palette.key, &self.key),
            (&mut palette.string, &self.string),
            (&mut palette.number, &self.number),
            (&mut palette.true_literal, &self.true_literal),
            (&mut palette.false_literal, &self.false_literal),
            (&mut palette.null, &self.null),
            (&mut palette.brace, &self.brace),
            (&mut palette.bracket, &self.bracket),
            (&mut palette.colon, &self.colon),
            (&mut palette.comma, &self.comma),
        ];
        for (slot, entry) in overrides {
            if let Some(entry) = entry {
                *slot = entry.resolve()?;
            }
        }

        Ok(palette)
    }
}

/// Represents errors that can occur while loading a theme.
#[derive(Debug)]
pub enum ThemeError {
    /// The theme file could not be read.
    Io {
        /// Theme file path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The theme file extension maps to no known format.
    UnknownFormat(PathBuf),
    /// The theme file is not a valid document.
    Format(FormatError),
    /// A color could not be recognized.
    UnknownColor(String),
}

impl Error for ThemeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format(err) => Some(err),
            Self::UnknownFormat(_) | Self::UnknownColor(_) => None,
        }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => {
                write!(f, "Failed to read theme {}", path.display())
            }
            Self::UnknownFormat(path) => write!(
                f,
                "Cannot tell the format of theme {}; \
                 use a .json, .yaml or .toml extension",
                path.display()
            ),
            Self::Format(err) => write!(f, "Invalid theme: {err}"),
            Self::UnknownColor(color) => write!(f, "Unknown color: {color:?}"),
        }
    }
}

impl From<FormatError> for ThemeError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

/// Parses a `#rrggbb` hex color or a color name.
///
/// # Errors
///
/// Returns [`ThemeError::UnknownColor`] if `color` is neither.
pub fn parse_color(color: &str) -> Result<Color, ThemeError> {
    let unknown = || ThemeError::UnknownColor(color.to_string());

    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(unknown());
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| unknown())
        };
        return Ok(Color::TrueColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }

    color.parse::<Color>().map_err(|_| unknown())
}

/// Loads the palette described by the theme file at `path`.
///
/// # Errors
///
/// Returns a [`ThemeError`] if the file cannot be read or parsed, or names
/// unknown colors.
pub fn load_palette(path: &Path) -> Result<Palette, ThemeError> {
    let format = InputFormat::from_path(path)
        .ok_or_else(|| ThemeError::UnknownFormat(path.to_path_buf()))?;
    let contents = fs::read(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ThemeConfig = formats::deserialize(&contents, format)?;
    log::debug!("loaded {format} theme from {}", path.display());
    config.to_palette()
}
