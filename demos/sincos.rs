//! Generate sine and cosine figures with and without LaTeX styling
//!
//! Run with `RUST_LOG=info cargo run --example sincos`. Output goes to `img/`.

use std::error::Error;
use std::f64::consts::PI;

use texfigure::style::keys;
use texfigure::{
    figure, figure_size, Canvas, FigureError, FigureOptions, SizeOptions, StyleParameters,
    StyleState, TempStyle,
};

type Plot = fn(&mut Canvas, &[f64]);

fn plot_sin(canvas: &mut Canvas, xs: &[f64]) {
    let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let fig = canvas.figure_mut();
    fig.plot(xs, &ys);
    fig.title("Sine").xlabel(r"$\theta$").ylabel("Value");
}

fn plot_cos(canvas: &mut Canvas, xs: &[f64]) {
    let ys: Vec<f64> = xs.iter().map(|x| x.cos()).collect();
    let fig = canvas.figure_mut();
    fig.plot(xs, &ys).with_color("C1");
    fig.title("Cosine").xlabel(r"$\theta$").ylabel("Value");
}

fn plot_sin_and_cos(canvas: &mut Canvas, xs: &[f64]) {
    let sin: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let cos: Vec<f64> = xs.iter().map(|x| x.cos()).collect();
    let fig = canvas.figure_mut();
    fig.plot_labeled(xs, &sin, "sine");
    fig.plot_labeled(xs, &cos, "cosine");
    fig.title("Sine and cosine")
        .xlabel(r"$\theta$")
        .ylabel("Value")
        .legend();
}

const PLOTS: [(&str, Plot); 3] = [
    ("sin", plot_sin),
    ("cos", plot_cos),
    ("sincos", plot_sin_and_cos),
];

fn draw(
    canvas: &mut Canvas,
    style: &StyleState,
    options: &FigureOptions,
    plot: Plot,
    xs: &[f64],
) -> Result<(), FigureError> {
    figure(canvas, style, options, |c| {
        plot(c, xs);
        Ok(())
    })
}

fn generate_figures(
    canvas: &mut Canvas,
    style: &StyleState,
    base: &FigureOptions,
    suffix: &str,
    xs: &[f64],
) -> Result<(), FigureError> {
    for (name, plot) in PLOTS {
        let options = base.renamed(format!("{}{}", name, suffix));
        draw(canvas, style, &options, plot, xs)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let xs: Vec<f64> = (0..50).map(|i| -PI + 2.0 * PI * f64::from(i) / 49.0).collect();
    let base = FigureOptions::new("unnamed").with_directory("img");
    let mut canvas = Canvas::new();
    let mut style = StyleState::default();

    generate_figures(&mut canvas, &style, &base, "_no_latex", &xs)?;

    style.latexify()?;
    generate_figures(&mut canvas, &style, &base, "_with_latex", &xs)?;

    let defaults = base.renamed("sincos_defaults");
    draw(&mut canvas, &style, &defaults, plot_sin_and_cos, &xs)?;

    // Two-column layouts
    let half_width = SizeOptions::new().with_width_fraction(0.45);
    let small = base
        .renamed("sincos_small")
        .with_size(figure_size(&half_width));
    draw(&mut canvas, &style, &small, plot_sin_and_cos, &xs)?;

    let square = base
        .renamed("sincos_square")
        .with_size(figure_size(&SizeOptions::new().with_ratio(1.0)));
    draw(&mut canvas, &style, &square, plot_sin_and_cos, &xs)?;

    let stacked = SizeOptions::new().with_width_fraction(0.6).with_ratio(2.0);
    let tall = base.renamed("sincos_tall").with_size(figure_size(&stacked));
    draw(&mut canvas, &style, &tall, plot_sin_and_cos, &xs)?;

    {
        let big = style.temp_style(TempStyle::new().font_size(10.0));
        let options = base.renamed("sincos_big_font_temp");
        draw(&mut canvas, &big, &options, plot_sin_and_cos, &xs)?;
    }

    let mut bigger = StyleParameters::latex();
    for key in keys::FONT_SIZE_KEYS {
        bigger.set(key, 10.0);
    }
    style.apply(&bigger, None)?;
    let permanent = base.renamed("sincos_big_font_permanent");
    draw(&mut canvas, &style, &permanent, plot_sin_and_cos, &xs)?;

    style.revert();
    let reverted = base.renamed("sincos_after_revert");
    draw(&mut canvas, &style, &reverted, plot_sin_and_cos, &xs)?;

    style.latexify()?;
    let big_labels = TempStyle::new().font_size(10.0).params(
        StyleParameters::new()
            .with(keys::AXES_LABELSIZE, 12.0)
            .with(keys::AXES_TITLESIZE, 12.0),
    );
    let labeled = base.renamed("sincos_big_label_title");
    style.with_temp_style(big_labels, |s| {
        draw(&mut canvas, s, &labeled, plot_sin_and_cos, &xs)
    })?;

    Ok(())
}
