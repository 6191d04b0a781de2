//! Error and warning types for styling and export

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::RenderError;
use crate::style::ConfigError;

/// Errors that abort a style change or an export
#[derive(Debug, Error)]
pub enum FigureError {
    /// The requested backend is not known to the renderer
    #[error("backend not supported: '{backend}'")]
    UnsupportedBackend { backend: String },

    /// A regular file occupies the output directory location
    #[error("a file exists at directory location: {}", path.display())]
    DirectoryIsFile { path: PathBuf },

    /// The output directory does not exist at write time
    #[error(
        "directory does not exist: {}; create it or enable directory creation",
        path.display()
    )]
    DirectoryNotFound { path: PathBuf },

    /// Access to the directory or file was denied
    #[error("permission denied for {}", describe_target(path, file.as_deref()))]
    PermissionDenied { path: PathBuf, file: Option<String> },

    /// The renderer cannot write the requested format
    #[error("unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// Export was requested without a base filename
    #[error("figure filename must not be empty")]
    EmptyFilename,

    /// Any other I/O failure while preparing the output directory
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer failed for a reason other than the classified ones
    #[error("failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// Style configuration could not be loaded
    #[error("style configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn describe_target(path: &std::path::Path, file: Option<&str>) -> String {
    match file {
        Some(file) => format!("file '{}' in directory {}", file, path.display()),
        None => format!("directory {}", path.display()),
    }
}

impl FigureError {
    /// Create an unsupported backend error
    pub fn unsupported_backend(backend: impl Into<String>) -> Self {
        Self::UnsupportedBackend {
            backend: backend.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Get the filesystem path involved, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryIsFile { path }
            | Self::DirectoryNotFound { path }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. }
            | Self::Render { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Non-fatal conditions reported alongside a successful result
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Computed figure height exceeded the maximum and was reduced
    HeightClamped { height: f64, max_height: f64 },
    /// There was no figure content to lay out before saving
    NoFigure,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::HeightClamped { height, max_height } => write!(
                f,
                "height too large at {} inches; will automatically reduce to {} inches",
                height, max_height
            ),
            Warning::NoFigure => write!(f, "no figures to save"),
        }
    }
}
