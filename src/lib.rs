//! texfigure - figures that match the typography of a LaTeX document
//!
//! This library sizes figures to a fraction of the document's text width,
//! switches the rendering style to LaTeX-compatible fonts and the PGF backend,
//! and exports each figure in several formats at once.
//!
//! # Example
//!
//! ```rust,no_run
//! use texfigure::{figure, Canvas, FigureError, FigureOptions, StyleState};
//!
//! let mut style = StyleState::default();
//! style.latexify()?;
//!
//! let mut canvas = Canvas::new();
//! let xs: Vec<f64> = (0..100).map(|i| f64::from(i) / 10.0).collect();
//! let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
//!
//! figure(&mut canvas, &style, &FigureOptions::new("sin"), |c| {
//!     let fig = c.figure_mut();
//!     fig.plot_labeled(&xs, &ys, "sin");
//!     fig.xlabel(r"$\theta$").ylabel("Value").legend();
//!     Ok::<_, FigureError>(())
//! })?;
//! # Ok::<(), FigureError>(())
//! ```

pub mod error;
pub mod export;
pub mod geometry;
pub mod renderer;
pub mod session;
pub mod style;

pub use error::{FigureError, Warning};
pub use export::{export, ExportReport, ExportRequest};
pub use geometry::{compute_size, figure_size, FigureSize, SizeOptions};
pub use renderer::{Canvas, CanvasConfig, Figure, RenderError, Renderer};
pub use session::{figure, FigureOptions, FigureSession};
pub use style::{
    ConfigError, StyleConfig, StyleGuard, StyleParameters, StyleState, StyleValue, TempStyle,
};
