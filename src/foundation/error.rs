use std::path::PathBuf;

use crate::encode::format::OutputFormat;

/// Crate-wide result alias.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Coarse failure classes surfaced to the UI collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Width or height is zero or outside the configured bounds.
    InvalidDimensions,
    /// Export was requested from a non-interactive preview context.
    PreviewModeUnavailable,
    /// The request is malformed in a way other than its dimensions.
    InvalidRequest,
    /// Rasterization could not produce a pixel buffer.
    RenderFailure,
    /// The target container cannot be encoded on this platform.
    UnsupportedFormat,
    /// The destination file could not be created or written.
    WriteFailure,
}

#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    #[error("invalid dimensions: {width}x{height} (allowed {min}..={max})")]
    InvalidDimensions {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    #[error("export is unavailable in preview mode")]
    PreviewModeUnavailable,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("render failure: {0}")]
    RenderFailure(String),

    #[error("render failure: out of memory allocating {bytes} bytes for {width}x{height} pixels")]
    OutOfMemory { width: u32, height: u32, bytes: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(OutputFormat),

    #[error("write failure '{}': {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderFailure(msg.into())
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Taxonomy class of this error.
    ///
    /// `Other` only wraps unexpected internal failures and is reported as a render failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::PreviewModeUnavailable => ErrorKind::PreviewModeUnavailable,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::RenderFailure(_) | Self::OutOfMemory { .. } | Self::Other(_) => {
                ErrorKind::RenderFailure
            }
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
        }
    }

    /// Display-ready message for a single user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDimensions {
                width, height, min, max,
            } => {
                if *width == 0 || *height == 0 {
                    "Dimensions must be greater than zero.".to_owned()
                } else {
                    format!("Dimensions must be between {min} and {max} pixels.")
                }
            }
            Self::PreviewModeUnavailable => "File saving is not available in Preview.".to_owned(),
            Self::InvalidRequest(msg) => format!("Invalid export settings: {msg}."),
            Self::RenderFailure(_) | Self::OutOfMemory { .. } | Self::Other(_) => {
                "Failed to render the image.".to_owned()
            }
            Self::UnsupportedFormat(format) => {
                format!("{} is not supported on this system.", format.label())
            }
            Self::WriteFailure { path, source } => {
                format!("Could not write '{}': {source}", path.display())
            }
        }
    }
}
