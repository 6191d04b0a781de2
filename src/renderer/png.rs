//! Raster output
//!
//! Draws the axes frame, series and legend swatches at `savefig.dpi`. Text is
//! not rasterised.

use std::path::Path;

use image::{ImageError, ImageFormat, Rgb, RgbImage};

use crate::style::{keys, StyleParameters};

use super::figure::{line_width, series_color, Figure};
use super::RenderError;

/// Resolution used when `savefig.dpi` is unset
pub const DEFAULT_DPI: f64 = 100.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Rasterise a figure
pub fn render_png(figure: &Figure, style: &StyleParameters) -> RgbImage {
    let dpi = style
        .number(keys::SAVEFIG_DPI)
        .filter(|d| *d > 0.0)
        .unwrap_or(DEFAULT_DPI);
    let frame = figure.frame(style, dpi);
    let width = frame.width.round().max(1.0) as u32;
    let height = frame.height.round().max(1.0) as u32;
    let mut raster = Raster {
        image: RgbImage::from_pixel(width, height, WHITE),
    };

    let (l, b, r, t) = (frame.left, frame.bottom, frame.right(), frame.top());
    raster.polyline(&[(l, b), (r, b), (r, t), (l, t), (l, b)], BLACK, 1);

    let thickness = (line_width(style) * frame.unit).round().max(1.0) as u32;
    for (i, series) in figure.series.iter().enumerate() {
        raster.polyline(&frame.path(series), Rgb(series_color(series, i)), thickness);
    }

    let legend_size = style.font_size(keys::LEGEND_FONTSIZE);
    for row in frame.legend_rows(&figure.legend_entries(), legend_size) {
        raster.polyline(&row.line, Rgb(row.color), thickness);
    }

    raster.image
}

/// Rasterise a figure and write it as PNG
pub fn write_png(figure: &Figure, style: &StyleParameters, path: &Path) -> Result<(), RenderError> {
    render_png(figure, style)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(io) => RenderError::Io(io),
            other => RenderError::Encode(other.to_string()),
        })
}

struct Raster {
    image: RgbImage,
}

impl Raster {
    /// Draw connected segments given y-up coordinates
    fn polyline(&mut self, points: &[(f64, f64)], color: Rgb<u8>, thickness: u32) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1], color, thickness);
        }
    }

    /// Bresenham line with a square brush
    fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, thickness: u32) {
        let height = f64::from(self.image.height());
        let (mut x0, mut y0) = (from.0.round() as i64, (height - from.1).round() as i64);
        let (x1, y1) = (to.0.round() as i64, (height - to.1).round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x0, y0, color, thickness);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn stamp(&mut self, x: i64, y: i64, color: Rgb<u8>, thickness: u32) {
        let half = i64::from(thickness / 2);
        let (w, h) = (i64::from(self.image.width()), i64::from(self.image.height()));
        for py in (y - half)..(y - half + i64::from(thickness)) {
            for px in (x - half)..(x - half + i64::from(thickness)) {
                if (0..w).contains(&px) && (0..h).contains(&py) {
                    self.image.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FigureSize;

    #[test]
    fn test_pixel_size_follows_dpi() {
        let figure = Figure::new(FigureSize::new(2.0, 1.5));
        let style = StyleParameters::new().with(keys::SAVEFIG_DPI, 50.0);
        let image = render_png(&figure, &style);
        assert_eq!(image.dimensions(), (100, 75));
    }

    #[test]
    fn test_default_dpi() {
        let figure = Figure::new(FigureSize::new(1.0, 1.0));
        let image = render_png(&figure, &StyleParameters::new());
        assert_eq!(image.dimensions(), (100, 100));
    }

    #[test]
    fn test_series_pixels_use_series_color() {
        let mut figure = Figure::new(FigureSize::new(2.0, 2.0));
        figure.plot(&[0.0, 1.0], &[0.0, 1.0]).with_color("#ff0000");
        let image = render_png(&figure, &StyleParameters::engine_defaults());
        assert!(image.pixels().any(|p| *p == Rgb([255, 0, 0])));
        assert!(image.pixels().any(|p| *p == BLACK));
    }

    #[test]
    fn test_segment_clips_to_image() {
        let mut raster = Raster {
            image: RgbImage::from_pixel(10, 10, WHITE),
        };
        raster.segment((-5.0, 5.0), (50.0, 5.0), BLACK, 3);
        assert_eq!(*raster.image.get_pixel(0, 5), BLACK);
        assert_eq!(*raster.image.get_pixel(9, 5), BLACK);
    }

    #[test]
    fn test_write_png_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("f.png");
        let figure = Figure::new(FigureSize::new(1.0, 1.0));
        let err = write_png(&figure, &StyleParameters::new(), &path).unwrap_err();
        match err {
            RenderError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }
}
