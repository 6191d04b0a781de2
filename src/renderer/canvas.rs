//! Built-in renderer holding a single current figure

use std::path::Path;

use crate::geometry::FigureSize;
use crate::style::StyleState;

use super::figure::Figure;
use super::pgf::render_pgf;
use super::png::write_png;
use super::svg::render_svg;
use super::{CanvasConfig, OutputFormat, RenderError, Renderer};

/// A renderer with one "current figure" slot
///
/// The figure is created on first use, like a plotting library's implicit
/// current figure, and discarded by [`Renderer::close`].
#[derive(Debug, Default)]
pub struct Canvas {
    config: CanvasConfig,
    current: Option<Figure>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// The current figure, created if there is none
    pub fn figure_mut(&mut self) -> &mut Figure {
        let size = self.config.default_size;
        self.current.get_or_insert_with(|| Figure::new(size))
    }

    pub fn current(&self) -> Option<&Figure> {
        self.current.as_ref()
    }

    pub fn has_figure(&self) -> bool {
        self.current.is_some()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }
}

impl Renderer for Canvas {
    fn tight_layout(&mut self, pad: f64) -> Result<(), RenderError> {
        match self.current.as_mut() {
            Some(figure) if !figure.is_empty() => {
                figure.tight_pad = Some(pad);
                Ok(())
            }
            _ => Err(RenderError::NoFigure),
        }
    }

    fn set_size_inches(&mut self, size: FigureSize) {
        self.figure_mut().size = size;
    }

    fn save(&mut self, path: &Path, format: &str, style: &StyleState) -> Result<(), RenderError> {
        let format = OutputFormat::from_extension(format)
            .ok_or_else(|| RenderError::UnsupportedFormat(format.to_string()))?;

        let size = self.config.default_size;
        let figure = self.current.get_or_insert_with(|| Figure::new(size));
        let params = style.params();

        match format {
            OutputFormat::Svg => std::fs::write(path, render_svg(figure, params, &self.config))?,
            OutputFormat::Pgf => std::fs::write(path, render_pgf(figure, params))?,
            OutputFormat::Png => write_png(figure, params, path)?,
        }

        log::debug!(
            "Wrote {} ({}, backend {})",
            path.display(),
            format.extension(),
            style.backend()
        );
        Ok(())
    }

    fn close(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleParameters;

    #[test]
    fn test_figure_created_on_demand() {
        let mut canvas = Canvas::new();
        assert!(!canvas.has_figure());
        canvas.figure_mut().title("t");
        assert!(canvas.has_figure());
        assert_eq!(canvas.current().map(|f| f.size), Some(FigureSize::new(6.4, 4.8)));
    }

    #[test]
    fn test_tight_layout_without_content() {
        let mut canvas = Canvas::new();
        assert!(matches!(canvas.tight_layout(0.0), Err(RenderError::NoFigure)));
        canvas.figure_mut();
        assert!(matches!(canvas.tight_layout(0.0), Err(RenderError::NoFigure)));
        canvas.figure_mut().plot(&[0.0, 1.0], &[0.0, 1.0]);
        canvas.tight_layout(0.0).unwrap();
        assert_eq!(canvas.current().and_then(|f| f.tight_pad), Some(0.0));
    }

    #[test]
    fn test_set_size_and_close() {
        let config = CanvasConfig::new().with_default_size(FigureSize::new(1.0, 1.0));
        let mut canvas = Canvas::with_config(config);
        canvas.set_size_inches(FigureSize::new(3.0, 2.0));
        assert_eq!(canvas.current().map(|f| f.size), Some(FigureSize::new(3.0, 2.0)));
        canvas.close();
        assert!(!canvas.has_figure());
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.bogusext");
        let mut canvas = Canvas::new();
        let err = canvas
            .save(&path, "bogusext", &StyleState::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ref f) if f == "bogusext"));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_each_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut canvas = Canvas::new();
        canvas.figure_mut().plot(&[0.0, 1.0, 2.0], &[1.0, 0.0, 1.0]);
        let style = StyleState::new(StyleParameters::latex(), "pgf");
        for ext in ["svg", "pgf", "png"] {
            let path = dir.path().join(format!("f.{}", ext));
            canvas.save(&path, ext, &style).unwrap();
            assert!(path.metadata().unwrap().len() > 0, "{}", ext);
        }
        let png = std::fs::read(dir.path().join("f.png")).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
