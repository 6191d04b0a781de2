//! In-memory figure model shared by the output writers

use crate::geometry::FigureSize;
use crate::style::{keys, StyleParameters};

/// Default color cycle (`C0`..`C9`)
pub const COLOR_CYCLE: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

const POINTS_PER_INCH: f64 = 72.0;

/// A line series
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl Series {
    pub fn with_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Set the color as `#rrggbb`, `C0`..`C9` or a basic color name
    pub fn with_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(x, y)| (*x, *y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// A drawable figure: line series plus title and axis labels
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub size: FigureSize,
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub legend: bool,
    /// Padding from the last tight layout, in multiples of the font size
    pub tight_pad: Option<f64>,
}

impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Self {
            size,
            series: vec![],
            title: None,
            xlabel: None,
            ylabel: None,
            legend: false,
            tight_pad: None,
        }
    }

    /// Add a line through `(xs[i], ys[i])`; extra values on either side are ignored
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> &mut Series {
        let n = xs.len().min(ys.len());
        self.series.push(Series {
            xs: xs[..n].to_vec(),
            ys: ys[..n].to_vec(),
            label: None,
            color: None,
        });
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    /// Add a labeled line
    pub fn plot_labeled(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        label: impl Into<String>,
    ) -> &mut Series {
        self.plot(xs, ys).with_label(label)
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Show a legend for labeled series
    pub fn legend(&mut self) -> &mut Self {
        self.legend = true;
        self
    }

    /// True when nothing has been drawn
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.title.is_none()
            && self.xlabel.is_none()
            && self.ylabel.is_none()
    }

    /// Labeled series with their resolved colors, in drawing order
    pub fn legend_entries(&self) -> Vec<(&str, [u8; 3])> {
        if !self.legend {
            return vec![];
        }
        self.series
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.label.as_deref().map(|l| (l, series_color(s, i))))
            .collect()
    }

    /// Compute the plot frame in an output unit system
    ///
    /// `units_per_inch` is 72 for SVG points, 1 for PGF inches and the dpi
    /// for PNG pixels.
    pub fn frame(&self, style: &StyleParameters, units_per_inch: f64) -> Frame {
        let pt = units_per_inch / POINTS_PER_INCH;
        let base = style.font_size(keys::FONT_SIZE);
        let label = style.font_size(keys::AXES_LABELSIZE);
        let title = style.font_size(keys::AXES_TITLESIZE);
        let tick = style
            .font_size(keys::XTICK_LABELSIZE)
            .max(style.font_size(keys::YTICK_LABELSIZE));

        let mut left = 3.0 * tick;
        let mut bottom = 2.0 * tick;
        let mut top = 0.5 * base;
        let right = 0.5 * base;
        if self.ylabel.is_some() {
            left += 1.5 * label;
        }
        if self.xlabel.is_some() {
            bottom += 1.5 * label;
        }
        if self.title.is_some() {
            top += 1.8 * title;
        }

        let (scale, pad) = match self.tight_pad {
            Some(pad) => (1.0, pad * base),
            None => (1.5, 0.0),
        };
        let [left, bottom, top, right] =
            [left, bottom, top, right].map(|m| (m * scale + pad) * pt);

        let width = self.size.width * units_per_inch;
        let height = self.size.height * units_per_inch;

        Frame {
            unit: pt,
            width,
            height,
            left,
            bottom,
            plot_width: (width - left - right).max(0.0),
            plot_height: (height - bottom - top).max(0.0),
            x_range: self.data_range(|(x, _)| x),
            y_range: self.data_range(|(_, y)| y),
        }
    }

    fn data_range(&self, axis: impl Fn((f64, f64)) -> f64) -> (f64, f64) {
        let mut range: Option<(f64, f64)> = None;
        for value in self.series.iter().flat_map(|s| s.points()).map(&axis) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }
        match range {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        }
    }
}

/// Plot area placement in output units, y measured upward from the bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Output units per point
    pub unit: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub bottom: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Frame {
    /// Map a data point to output units (y up)
    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        (
            self.left + (x - x0) / (x1 - x0) * self.plot_width,
            self.bottom + (y - y0) / (y1 - y0) * self.plot_height,
        )
    }

    /// Mapped points of a series
    pub fn path(&self, series: &Series) -> Vec<(f64, f64)> {
        series.points().map(|(x, y)| self.map(x, y)).collect()
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.plot_width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.bottom + self.plot_height / 2.0
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.plot_height
    }

    pub fn right(&self) -> f64 {
        self.left + self.plot_width
    }

    /// Place legend rows in the top-right corner of the plot area
    pub fn legend_rows<'a>(
        &self,
        entries: &[(&'a str, [u8; 3])],
        font_size: f64,
    ) -> Vec<LegendRow<'a>> {
        let em = font_size * self.unit;
        let widest = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let text_x = self.right() - 0.5 * em - widest * 0.6 * em;

        entries
            .iter()
            .enumerate()
            .map(|(i, (label, color))| {
                let baseline = self.top() - (i as f64 + 1.0) * 1.4 * em;
                let line_y = baseline + 0.35 * em;
                LegendRow {
                    label: *label,
                    color: *color,
                    line: [(text_x - 2.5 * em, line_y), (text_x - 0.5 * em, line_y)],
                    text: (text_x, baseline),
                }
            })
            .collect()
    }
}

/// One legend entry placed in output units
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow<'a> {
    pub label: &'a str,
    pub color: [u8; 3],
    pub line: [(f64, f64); 2],
    pub text: (f64, f64),
}

/// Generic font family and the concrete face chosen for it
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub face: Option<String>,
    pub size: f64,
}

/// Resolve the font for a size key from `font.family` and its font list
pub fn resolve_font(style: &StyleParameters, size_key: &str) -> Font {
    let family = style
        .text(keys::FONT_FAMILY)
        .or_else(|| style.list(keys::FONT_FAMILY).and_then(|l| l.first().map(String::as_str)))
        .unwrap_or("sans-serif")
        .to_string();
    let face = match family.as_str() {
        "serif" => style.list(keys::FONT_SERIF),
        "sans-serif" => style.list(keys::FONT_SANS_SERIF),
        "monospace" => style.list(keys::FONT_MONOSPACE),
        _ => None,
    }
    .and_then(|faces| faces.first().cloned());

    Font {
        family,
        face,
        size: style.font_size(size_key),
    }
}

/// Line width in points
pub fn line_width(style: &StyleParameters) -> f64 {
    style.number(keys::LINES_LINEWIDTH).unwrap_or(1.5)
}

/// Resolved RGB color of the `index`-th series
pub fn series_color(series: &Series, index: usize) -> [u8; 3] {
    series
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(COLOR_CYCLE[index % COLOR_CYCLE.len()])
}

/// Parse `#rrggbb`, `#rgb`, `C0`..`C9` or a basic color name
pub fn parse_color(color: &str) -> Option<[u8; 3]> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(index) = color.strip_prefix('C').and_then(|n| n.parse::<usize>().ok()) {
        return Some(COLOR_CYCLE[index % COLOR_CYCLE.len()]);
    }
    match color.to_ascii_lowercase().as_str() {
        "black" | "k" => Some([0, 0, 0]),
        "white" | "w" => Some([255, 255, 255]),
        "red" | "r" => Some([255, 0, 0]),
        "green" | "g" => Some([0, 128, 0]),
        "blue" | "b" => Some([0, 0, 255]),
        "gray" | "grey" => Some([128, 128, 128]),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.is_ascii() {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Format a color as `#rrggbb`
pub fn hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
