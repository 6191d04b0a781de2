//! PGF output, for inclusion in LaTeX documents with `\input{...}`
//!
//! Coordinates are written in inches. When `text.usetex` is set, labels are
//! passed to TeX verbatim so math such as `$\theta$` typesets; otherwise TeX
//! special characters are escaped.

use std::fmt::Write;

use crate::style::{keys, StyleParameters};

use super::figure::{line_width, resolve_font, series_color, Figure, Font};

/// Render a figure as a `pgfpicture`
pub fn render_pgf(figure: &Figure, style: &StyleParameters) -> String {
    let frame = figure.frame(style, 1.0);
    let usetex = style.flag(keys::TEXT_USETEX).unwrap_or(false);
    let mut out = String::new();

    write_header(&mut out, style);
    out.push_str("\\begingroup%\n\\makeatletter%\n\\begin{pgfpicture}%\n");
    let _ = writeln!(
        out,
        "\\pgfpathrectangle{{\\pgfpointorigin}}{{{}}}%",
        point(frame.width, frame.height)
    );
    out.push_str("\\pgfusepath{use as bounding box, clip}%\n");

    // Axes frame
    out.push_str("\\pgfsetlinewidth{0.8pt}%\n");
    out.push_str("\\definecolor{currentstroke}{rgb}{0,0,0}%\n");
    out.push_str("\\pgfsetstrokecolor{currentstroke}%\n");
    let _ = writeln!(
        out,
        "\\pgfpathrectangle{{{}}}{{{}}}%",
        point(frame.left, frame.bottom),
        point(frame.plot_width, frame.plot_height)
    );
    out.push_str("\\pgfusepath{stroke}%\n");

    let width = line_width(style);
    for (i, series) in figure.series.iter().enumerate() {
        write_path(&mut out, &frame.path(series), series_color(series, i), width);
    }

    let base_font = resolve_font(style, keys::FONT_SIZE);
    let title_font = Font {
        size: style.font_size(keys::AXES_TITLESIZE),
        ..base_font.clone()
    };
    let label_font = Font {
        size: style.font_size(keys::AXES_LABELSIZE),
        ..base_font.clone()
    };
    let legend_font = Font {
        size: style.font_size(keys::LEGEND_FONTSIZE),
        ..base_font
    };
    let inch = |pt: f64| pt * frame.unit;

    if let Some(title) = &figure.title {
        let at = (frame.center_x(), frame.top() + inch(0.6 * title_font.size));
        write_text(&mut out, title, at, "base", &title_font, usetex, None);
    }
    if let Some(xlabel) = &figure.xlabel {
        let at = (frame.center_x(), frame.bottom - inch(2.5 * label_font.size));
        write_text(&mut out, xlabel, at, "base", &label_font, usetex, None);
    }
    if let Some(ylabel) = &figure.ylabel {
        let at = (frame.left - inch(2.5 * label_font.size), frame.center_y());
        write_text(&mut out, ylabel, at, "base", &label_font, usetex, Some(90.0));
    }

    for row in frame.legend_rows(&figure.legend_entries(), legend_font.size) {
        write_path(&mut out, &row.line, row.color, width);
        write_text(&mut out, row.label, row.text, "left,base", &legend_font, usetex, None);
    }

    out.push_str("\\end{pgfpicture}%\n\\makeatother%\n\\endgroup%\n");
    out
}

fn write_header(out: &mut String, style: &StyleParameters) {
    out.push_str("%% Creator: texfigure\n");
    out.push_str("%%\n");
    out.push_str("%% To include the figure in your LaTeX document, write\n");
    out.push_str("%%   \\input{<filename>.pgf}\n");
    out.push_str("%%\n");
    out.push_str("%% Make sure the required packages are loaded in your preamble\n");
    out.push_str("%%   \\usepackage{pgf}\n");
    if let Some(preamble) = style.list(keys::PGF_PREAMBLE) {
        if !preamble.is_empty() {
            out.push_str("%%\n%% and the following lines from the style configuration\n");
            for line in preamble {
                let _ = writeln!(out, "%%   {}", line);
            }
        }
    }
    if let Some(texsystem) = style.text(keys::PGF_TEXSYSTEM) {
        out.push_str("%%\n");
        let _ = writeln!(out, "%% Intended TeX system: {}", texsystem);
    }
    out.push_str("%%\n");
}

fn write_path(out: &mut String, points: &[(f64, f64)], [r, g, b]: [u8; 3], width: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    let _ = writeln!(out, "\\pgfsetlinewidth{{{}pt}}%", num(width));
    let _ = writeln!(
        out,
        "\\definecolor{{currentstroke}}{{rgb}}{{{},{},{}}}%",
        num(f64::from(r) / 255.0),
        num(f64::from(g) / 255.0),
        num(f64::from(b) / 255.0)
    );
    out.push_str("\\pgfsetstrokecolor{currentstroke}%\n");
    let _ = writeln!(out, "\\pgfpathmoveto{{{}}}%", point(first.0, first.1));
    for (x, y) in rest {
        let _ = writeln!(out, "\\pgfpathlineto{{{}}}%", point(*x, *y));
    }
    out.push_str("\\pgfusepath{stroke}%\n");
}

fn write_text(
    out: &mut String,
    text: &str,
    (x, y): (f64, f64),
    align: &str,
    font: &Font,
    usetex: bool,
    rotate: Option<f64>,
) {
    let body = if usetex {
        text.to_string()
    } else {
        escape_tex(text)
    };
    let rotate = rotate
        .map(|deg| format!(",rotate={}", num(deg)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "\\pgftext[x={}in,y={}in,{}{}]{{{}\\fontsize{{{}}}{{{}}}\\selectfont {}}}%",
        num(x),
        num(y),
        align,
        rotate,
        family_command(&font.family),
        num(font.size),
        num(font.size * 1.2),
        body
    );
}

fn family_command(family: &str) -> &'static str {
    match family {
        "serif" => "\\rmfamily",
        "monospace" => "\\ttfamily",
        _ => "\\sffamily",
    }
}

fn point(x: f64, y: f64) -> String {
    format!("\\pgfqpoint{{{}in}}{{{}in}}", num(x), num(y))
}

/// Format a number with up to six decimals
fn num(value: f64) -> String {
    let s = format!("{:.6}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape characters with special meaning in TeX
pub fn escape_tex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
