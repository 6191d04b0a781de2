//! Figure dimensions derived from LaTeX document metrics
//!
//! LaTeX reports the text width in points (`\the\textwidth`). Figures are
//! sized as a fraction of that width, with the height following from an
//! aspect ratio or an explicit height.

use crate::error::Warning;

/// Inches per TeX point
pub const INCH_PER_POINT: f64 = 1.0 / 72.27;

/// Default height/width ratio, `(sqrt(5) - 1) / 2`
pub const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_8;

/// Default maximum figure height in inches
pub const MAX_HEIGHT_INCH: f64 = 8.0;

/// Default LaTeX text width in points
pub const DOC_WIDTH_POINTS: f64 = 345.0;

/// Physical figure size in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<(f64, f64)> for FigureSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// Inputs to the size computation
#[derive(Debug, Clone)]
pub struct SizeOptions {
    /// Width as a proportion of the text width, normally in (0, 1]
    pub width_fraction: f64,

    /// Height/width ratio; takes precedence over `height`
    pub ratio: Option<f64>,

    /// Explicit height in inches, used only when `ratio` is unset
    pub height: Option<f64>,

    /// Number of equally sized text columns
    pub n_columns: u32,

    /// Upper bound for the height in inches
    pub max_height: f64,

    /// Text width of the document in points
    pub doc_width_points: f64,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            width_fraction: 0.9,
            ratio: None,
            height: None,
            n_columns: 1,
            max_height: MAX_HEIGHT_INCH,
            doc_width_points: DOC_WIDTH_POINTS,
        }
    }
}

impl SizeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width as a proportion of the text width
    pub fn with_width_fraction(mut self, fraction: f64) -> Self {
        self.width_fraction = fraction;
        self
    }

    /// Set the height/width ratio
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Set an explicit height in inches
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the number of text columns
    pub fn with_columns(mut self, n_columns: u32) -> Self {
        self.n_columns = n_columns;
        self
    }

    /// Set the maximum height in inches
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = max_height;
        self
    }

    /// Set the document text width in points
    pub fn with_doc_width_points(mut self, points: f64) -> Self {
        self.doc_width_points = points;
        self
    }
}

/// Compute the figure size, returning a warning if the height was clamped
pub fn compute_size(options: &SizeOptions) -> (FigureSize, Option<Warning>) {
    let doc_width_in = options.doc_width_points * INCH_PER_POINT;
    let width = doc_width_in * options.width_fraction / f64::from(options.n_columns);

    let ratio = match (options.ratio, options.height) {
        (Some(ratio), _) => ratio,
        (None, Some(height)) => height / width,
        (None, None) => GOLDEN_RATIO,
    };

    let height = width * ratio;

    if height > options.max_height {
        let warning = Warning::HeightClamped {
            height,
            max_height: options.max_height,
        };
        return (FigureSize::new(width, options.max_height), Some(warning));
    }

    (FigureSize::new(width, height), None)
}

/// Compute the figure size, logging any clamp warning
pub fn figure_size(options: &SizeOptions) -> FigureSize {
    let (size, warning) = compute_size(options);
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    size
}
