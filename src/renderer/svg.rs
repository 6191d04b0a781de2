//! SVG output for figures

use crate::style::{keys, StyleParameters};

use super::figure::{hex_color, line_width, resolve_font, series_color, Figure, Font, Frame};
use super::CanvasConfig;

/// SVG user units per inch
const UNITS_PER_INCH: f64 = 72.0;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: CanvasConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    height: f64,
}

impl SvgBuilder {
    /// Create a builder for a canvas `height` units tall
    pub fn new(config: CanvasConfig, height: f64) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            height,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Flip a y-up coordinate into SVG's y-down space
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    /// Add the font family rule for text elements
    pub fn add_font(&mut self, font: &Font) {
        let prefix = self.prefix();
        let family = match &font.face {
            Some(face) => format!("'{}', {}", escape_xml(face), font.family),
            None => font.family.clone(),
        };
        self.styles
            .push(format!(".{}text {{ font-family: {}; }}", prefix, family));
    }

    /// Add the axes frame
    pub fn add_frame(&mut self, frame: &Frame) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r##"{}<rect class="{}axes" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000000" stroke-width="0.8"/>"##,
            self.indent_str(),
            prefix,
            fmt(frame.left),
            fmt(self.flip(frame.top())),
            fmt(frame.plot_width),
            fmt(frame.plot_height),
        ));
    }

    /// Add a polyline given y-up points
    pub fn add_polyline(&mut self, points: &[(f64, f64)], color: [u8; 3], width: f64, class: &str) {
        if points.is_empty() {
            return;
        }
        let prefix = self.prefix();
        let d = path_to_d(
            &points
                .iter()
                .map(|&(x, y)| (x, self.flip(y)))
                .collect::<Vec<_>>(),
        );
        self.elements.push(format!(
            r#"{}<path class="{}{}" d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            prefix,
            class,
            d,
            hex_color(color),
            fmt(width)
        ));
    }

    /// Add a text element at a y-up position, optionally rotated counter-clockwise
    pub fn add_text(
        &mut self,
        text: &str,
        (x, y): (f64, f64),
        anchor: TextAnchor,
        size: f64,
        rotate: Option<f64>,
    ) {
        let prefix = self.prefix();
        let anchor_str = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let y = self.flip(y);
        let transform = rotate
            .map(|deg| format!(r#" transform="rotate({} {} {})""#, fmt(-deg), fmt(x), fmt(y)))
            .unwrap_or_default();

        self.elements.push(format!(
            r#"{}<text class="{}text" x="{}" y="{}" text-anchor="{}" font-size="{}"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            fmt(x),
            fmt(y),
            anchor_str,
            fmt(size),
            transform,
            escape_xml(text)
        ));
    }

    /// Build the final SVG string for a canvas of `width` by `height` units
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}in" height="{}in" viewBox="0 0 {} {}">"#,
            fmt(width / UNITS_PER_INCH),
            fmt(height / UNITS_PER_INCH),
            fmt(width),
            fmt(height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str(self.indent_str());
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(self.indent_str());
                svg.push_str(self.indent_str());
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(self.indent_str());
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a figure to an SVG string
pub fn render_svg(figure: &Figure, style: &StyleParameters, config: &CanvasConfig) -> String {
    let frame = figure.frame(style, UNITS_PER_INCH);
    let mut builder = SvgBuilder::new(config.clone(), frame.height);

    builder.add_font(&resolve_font(style, keys::FONT_SIZE));
    builder.add_frame(&frame);

    let width = line_width(style);
    for (i, series) in figure.series.iter().enumerate() {
        builder.add_polyline(&frame.path(series), series_color(series, i), width, "series");
    }

    let title_size = style.font_size(keys::AXES_TITLESIZE);
    let label_size = style.font_size(keys::AXES_LABELSIZE);
    if let Some(title) = &figure.title {
        builder.add_text(
            title,
            (frame.center_x(), frame.top() + 0.6 * title_size * frame.unit),
            TextAnchor::Middle,
            title_size,
            None,
        );
    }
    if let Some(xlabel) = &figure.xlabel {
        builder.add_text(
            xlabel,
            (frame.center_x(), frame.bottom - 2.5 * label_size * frame.unit),
            TextAnchor::Middle,
            label_size,
            None,
        );
    }
    if let Some(ylabel) = &figure.ylabel {
        builder.add_text(
            ylabel,
            (frame.left - 2.5 * label_size * frame.unit, frame.center_y()),
            TextAnchor::Middle,
            label_size,
            Some(90.0),
        );
    }

    let legend_size = style.font_size(keys::LEGEND_FONTSIZE);
    for row in frame.legend_rows(&figure.legend_entries(), legend_size) {
        builder.add_polyline(&row.line, row.color, width, "legend");
        builder.add_text(row.label, row.text, TextAnchor::Start, legend_size, None);
    }

    builder.build(frame.width, frame.height)
}

/// Format a coordinate with at most two decimals
fn fmt(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Convert points to an SVG path d attribute
fn path_to_d(path: &[(f64, f64)]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", fmt(path[0].0), fmt(path[0].1));
    for (x, y) in &path[1..] {
        d.push_str(&format!(" L{} {}", fmt(*x), fmt(*y)));
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
