use std::fmt;
use std::str::FromStr;

use crate::foundation::error::BackdropError;

/// Target image container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Heic,
    Jpeg,
}

/// Formats the bundled encoder backend can produce on this build.
///
/// The `image` crate has no HEIF/HEIC encoder, so HEIC is reported as unsupported rather than
/// probed at runtime.
const ENCODABLE: &[OutputFormat] = &[OutputFormat::Png, OutputFormat::Jpeg];

impl OutputFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Heic, Self::Jpeg];

    /// Human-readable name, as shown in the format picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Heic => "HEIC",
            Self::Jpeg => "JPEG",
        }
    }

    /// Canonical file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Heic => "heic",
            Self::Jpeg => "jpg",
        }
    }

    /// Whether the `quality` encode option applies.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Heic | Self::Jpeg)
    }

    /// Whether the container can store an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Png)
    }

    pub fn is_encodable(self) -> bool {
        ENCODABLE.contains(&self)
    }

    /// Guess from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "heic" | "heif" => Some(Self::Heic),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim().trim_start_matches('.')).ok_or_else(|| {
            BackdropError::invalid_request(format!(
                "unknown output format \"{s}\" (expected png, jpeg or heic)"
            ))
        })
    }
}
