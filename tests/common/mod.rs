//! Shared test double: a renderer that records every call

#![allow(dead_code)]

use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use texfigure::{FigureSize, RenderError, Renderer, StyleState};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    TightLayout(f64),
    SetSize(FigureSize),
    Save(PathBuf, String),
    Close,
}

/// Records calls; `save` writes a small placeholder file
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    pub has_figure: bool,
    /// Formats rejected with `UnsupportedFormat`
    pub reject: Vec<String>,
    /// Fail every save with a permission error
    pub deny_writes: bool,
    /// `font.size` seen by each save
    pub saved_font_sizes: Vec<Option<f64>>,
    /// Backend seen by each save
    pub saved_backends: Vec<String>,
}

impl RecordingRenderer {
    pub fn with_figure() -> Self {
        Self {
            has_figure: true,
            ..Self::default()
        }
    }

    pub fn saves(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Save(path, _) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn tight_layout(&mut self, pad: f64) -> Result<(), RenderError> {
        self.calls.push(Call::TightLayout(pad));
        if self.has_figure {
            Ok(())
        } else {
            Err(RenderError::NoFigure)
        }
    }

    fn set_size_inches(&mut self, size: FigureSize) {
        self.calls.push(Call::SetSize(size));
    }

    fn save(&mut self, path: &Path, format: &str, style: &StyleState) -> Result<(), RenderError> {
        self.calls
            .push(Call::Save(path.to_path_buf(), format.to_string()));
        if self.reject.iter().any(|r| r == format) {
            return Err(RenderError::UnsupportedFormat(format.to_string()));
        }
        if self.deny_writes {
            return Err(Error::from(ErrorKind::PermissionDenied).into());
        }
        self.saved_font_sizes
            .push(style.params().number("font.size"));
        self.saved_backends.push(style.backend().to_string());
        std::fs::write(path, format.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) {
        self.calls.push(Call::Close);
        self.has_figure = false;
    }
}
