//! The "current figure" capability and its built-in implementation
//!
//! Exports and sessions only talk to a [`Renderer`]. [`Canvas`] is the
//! reference implementation: it keeps one current [`Figure`] and writes it
//! as SVG, PGF or PNG.

pub mod canvas;
pub mod config;
pub mod figure;
pub mod pgf;
pub mod png;
pub mod svg;

use std::path::Path;

use thiserror::Error;

use crate::geometry::FigureSize;
use crate::style::StyleState;

pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use figure::{Figure, Series};

/// Errors reported by a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing has been drawn on the current figure
    #[error("no figure content to lay out")]
    NoFigure,

    /// The renderer cannot produce this format
    #[error("unsupported format: '{0}'")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output could not be encoded
    #[error("encoding failed: {0}")]
    Encode(String),
}

/// Operations the exporter and session need from a plotting engine
pub trait Renderer {
    /// Shrink margins around the current figure's content
    fn tight_layout(&mut self, pad: f64) -> Result<(), RenderError>;

    /// Set the physical size of the current figure
    fn set_size_inches(&mut self, size: FigureSize);

    /// Write the current figure to `path` in `format` (an extension without dot)
    ///
    /// `style` carries the live parameters and the active backend name.
    fn save(&mut self, path: &Path, format: &str, style: &StyleState) -> Result<(), RenderError>;

    /// Release the current figure
    fn close(&mut self);
}

/// Output formats the built-in canvas can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Pgf,
    Png,
}

impl OutputFormat {
    /// Look up a format by file extension, ignoring case
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "pgf" => Some(Self::Pgf),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pgf => "pgf",
            Self::Png => "png",
        }
    }
}
