//! One figure's lifetime: size, draw, export, close
//!
//! A session resolves the figure size when it opens, lets the caller draw on
//! the renderer, then on [`finish`](FigureSession::finish) resizes the figure,
//! exports it and closes it. If drawing fails the session is dropped without
//! finishing, and the figure is left open and unsaved.
//!
//! ```rust,no_run
//! use texfigure::{figure, Canvas, FigureError, FigureOptions, StyleState};
//!
//! let mut canvas = Canvas::new();
//! let mut style = StyleState::default();
//! style.latexify()?;
//!
//! figure(&mut canvas, &style, &FigureOptions::new("line"), |c| {
//!     c.figure_mut().plot(&[0.0, 1.0], &[0.0, 1.0]);
//!     Ok::<_, FigureError>(())
//! })?;
//! # Ok::<(), FigureError>(())
//! ```

use std::path::PathBuf;

use crate::error::FigureError;
use crate::export::{export, ExportReport, ExportRequest, DEFAULT_DIRECTORY, DEFAULT_EXTENSIONS};
use crate::geometry::{figure_size, FigureSize, SizeOptions};
use crate::renderer::Renderer;
use crate::style::StyleState;

/// Options for a figure session
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub filename: String,
    pub directory: PathBuf,
    pub extensions: Vec<String>,
    /// Explicit size; computed with default [`SizeOptions`] when unset
    pub size: Option<FigureSize>,
    pub mkdir: bool,
}

impl FigureOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            size: None,
            mkdir: true,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_extensions<S: Into<String>>(
        mut self,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, size: impl Into<FigureSize>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_mkdir(mut self, mkdir: bool) -> Self {
        self.mkdir = mkdir;
        self
    }

    /// Same options for another file name
    ///
    /// Handy for reusing a directory and extension set across figures.
    pub fn renamed(&self, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..self.clone()
        }
    }

    fn export_request(&self) -> ExportRequest {
        ExportRequest::new(self.filename.clone())
            .with_directory(self.directory.clone())
            .with_extensions(self.extensions.iter().cloned())
            .with_mkdir(self.mkdir)
            .in_session(true)
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Opening,
    Drawing,
    Closing,
    Closed,
    Failed,
}

/// An open figure, exported when finished
pub struct FigureSession<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
    style: &'a StyleState,
    options: FigureOptions,
    size: FigureSize,
    state: SessionState,
}

impl<'a, R: Renderer + ?Sized> FigureSession<'a, R> {
    /// Resolve the size and start drawing
    pub fn open(renderer: &'a mut R, style: &'a StyleState, options: FigureOptions) -> Self {
        let mut session = Self {
            renderer,
            style,
            size: FigureSize::new(0.0, 0.0),
            options,
            state: SessionState::Opening,
        };

        session.size = match session.options.size {
            Some(size) => size,
            None => figure_size(&SizeOptions::default()),
        };

        log::info!("{}:", session.options.filename);
        log::info!("  Plotting...");
        session.state = SessionState::Drawing;
        session
    }

    /// The renderer to draw on
    pub fn renderer(&mut self) -> &mut R {
        self.renderer
    }

    pub fn size(&self) -> FigureSize {
        self.size
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Resize, export and close the figure
    ///
    /// On export failure the figure stays open and the error is returned.
    pub fn finish(mut self) -> Result<ExportReport, FigureError> {
        self.state = SessionState::Closing;
        self.renderer.set_size_inches(self.size);

        match export(self.renderer, self.style, &self.options.export_request()) {
            Ok(report) => {
                self.renderer.close();
                self.state = SessionState::Closed;
                Ok(report)
            }
            Err(e) => {
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }
}

impl<R: Renderer + ?Sized> Drop for FigureSession<'_, R> {
    fn drop(&mut self) {
        if self.state == SessionState::Drawing {
            log::debug!(
                "Session for {} ended while drawing; figure left open and unsaved",
                self.options.filename
            );
        }
    }
}

/// Draw a figure with `draw`, then size, export and close it
///
/// An error from `draw` is returned as-is and nothing is exported.
pub fn figure<R, T, E, F>(
    renderer: &mut R,
    style: &StyleState,
    options: &FigureOptions,
    draw: F,
) -> Result<T, E>
where
    R: Renderer + ?Sized,
    E: From<FigureError>,
    F: FnOnce(&mut R) -> Result<T, E>,
{
    let mut session = FigureSession::open(renderer, style, options.clone());
    let value = draw(session.renderer())?;
    session.finish()?;
    Ok(value)
}
