//! Configuration for the built-in canvas

use crate::geometry::FigureSize;

/// Configuration options for [`Canvas`](super::Canvas) output
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Size given to newly created figures, in inches
    pub default_size: FigureSize,

    /// Whether SVG output starts with an XML declaration
    pub standalone: bool,

    /// Whether to format SVG output with indentation
    pub pretty_print: bool,

    /// Prefix for SVG class names (e.g., "tf-" for "tf-series")
    pub class_prefix: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_size: FigureSize::new(6.4, 4.8),
            standalone: true,
            pretty_print: true,
            class_prefix: Some("tf-".to_string()),
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size of new figures
    pub fn with_default_size(mut self, size: FigureSize) -> Self {
        self.default_size = size;
        self
    }

    /// Set whether SVG output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print SVG output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the SVG class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the SVG class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}
