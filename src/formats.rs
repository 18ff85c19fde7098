/*!
# Input Formats

Turns documents of the supported serialization formats into JSON text ready
for highlighting. JSON input can be passed through byte-for-byte, which is the
only mode that tolerates malformed input; every other path goes through
[`serde_json::Value`].

Formats other than JSON are gated behind the `yaml`, `toml`, `cbor` and
`msgpack` cargo features (all enabled by default).
*/
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Serialization formats that can be highlighted as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// JSON text
    Json,
    /// YAML text
    Yaml,
    /// TOML text
    Toml,
    /// CBOR binary
    Cbor,
    /// MessagePack binary
    Msgpack,
}

impl InputFormat {
    /// Infers the format from the extension of `path`, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "cbor" => Some(Self::Cbor),
            "msgpack" | "mp" => Some(Self::Msgpack),
            _ => None,
        }
    }

    /// Lower-case name of the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Cbor => "cbor",
            Self::Msgpack => "msgpack",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the JSON text should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Keep JSON input exactly as given; other formats are pretty-printed
    #[default]
    Preserve,
    /// Re-serialize with two-space indentation
    Pretty,
    /// Re-serialize without any whitespace
    Compact,
}

/// Represents errors that can occur while converting a document to JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input is not a valid document of the given format.
    Parse {
        /// Format the input was read as
        format: InputFormat,
        /// Parser message
        message: String,
    },
    /// The parsed document could not be written back out as JSON.
    Serialize(String),
    /// Support for the format was not compiled in.
    Disabled(InputFormat),
}

impl FormatError {
    fn parse(format: InputFormat, err: impl fmt::Display) -> Self {
        Self::Parse {
            format,
            message: err.to_string(),
        }
    }
}

impl Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { format, message } => {
                write!(f, "Invalid {format} input: {message}")
            }
            Self::Serialize(message) => {
                write!(f, "Failed to serialize JSON: {message}")
            }
            Self::Disabled(format) => write!(
                f,
                "Support for {format} is disabled; \
                 rebuild with the `{format}` feature"
            ),
        }
    }
}

/// Deserializes `input` read as `format`.
///
/// # Errors
///
/// Returns [`FormatError::Parse`] if `input` is not a valid document, and
/// [`FormatError::Disabled`] if the format's cargo feature is off.
pub fn deserialize<T: DeserializeOwned>(
    input: &[u8],
    format: InputFormat,
) -> Result<T, FormatError> {
    match format {
        InputFormat::Json => serde_json::from_slice(input)
            .map_err(|e| FormatError::parse(format, e)),
        #[cfg(feature = "yaml")]
        InputFormat::Yaml => serde_yaml::from_slice(input)
            .map_err(|e| FormatError::parse(format, e)),
        #[cfg(feature = "toml")]
        InputFormat::Toml => {
            let text = std::str::from_utf8(input)
                .map_err(|e| FormatError::parse(format, e))?;
            toml::from_str(text).map_err(|e| FormatError::parse(format, e))
        }
        #[cfg(feature = "cbor")]
        InputFormat::Cbor => ciborium::de::from_reader(input)
            .map_err(|e| FormatError::parse(format, e)),
        #[cfg(feature = "msgpack")]
        InputFormat::Msgpack => rmp_serde::from_slice(input)
            .map_err(|e| FormatError::parse(format, e)),
        #[allow(unreachable_patterns)]
        disabled => Err(FormatError::Disabled(disabled)),
    }
}

/// Converts `input` read as `format` into JSON text laid out per `layout`.
///
/// JSON input with [`Layout::Preserve`] is borrowed unchanged and never
/// parsed, so malformed JSON still makes it to the highlighter.
///
/// # Errors
///
/// Returns a [`FormatError`] if the input has to be parsed and is not a valid
/// document of `format`.
pub fn to_json_text(
    input: &[u8],
    format: InputFormat,
    layout: Layout,
) -> Result<Cow<'_, [u8]>, FormatError> {
    if format == InputFormat::Json && layout == Layout::Preserve {
        return Ok(Cow::Borrowed(input));
    }

    let value: serde_json::Value = deserialize(input, format)?;
    let text = match layout {
        Layout::Compact => serde_json::to_vec(&value),
        Layout::Pretty | Layout::Preserve => serde_json::to_vec_pretty(&value),
    }
    .map_err(|e| FormatError::Serialize(e.to_string()))?;

    log::debug!("converted {} bytes of {format} to JSON", input.len());
    Ok(Cow::Owned(text))
}
