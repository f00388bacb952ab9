//! Draw a [`ChartSpec`] with plotters and encode it as PNG

use super::{fit_aspect, fonts, ChartSpec};
use crate::config::ChartStyle;
use crate::types::{ReportError, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// PNG signature, for callers checking rendered output
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Upper bound on labelled ticks per axis
pub const MAX_TICKS: usize = 10;

const MAX_DECIMALS: f64 = 15.0;
const MARGIN_PT: f64 = 12.0;
const LEGEND_SWATCH_PT: f64 = 14.0;

fn draw_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Render `spec` to PNG bytes
///
/// Text is drawn only when `style.draw_text` is set and a font for
/// `style.font_family` has been registered.
pub fn render_png(spec: &ChartSpec, style: &ChartStyle) -> Result<Vec<u8>> {
    style.validate()?;
    let (width, height) = style.figure_pixels(spec.figure_size.0, spec.figure_size.1);
    let text = style.draw_text && fonts::is_registered(&style.font_family);
    if style.draw_text && !text {
        log::debug!(
            "Font '{}' not registered, drawing '{}' without text",
            style.font_family,
            spec.title
        );
    }

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(&root, spec, style, text)?;
        root.present().map_err(draw_err)?;
    }

    encode_png(&pixels, width, height, style.dpi)
}

/// Pixel sizes of the areas around the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Layout {
    pub fn new(style: &ChartStyle, text: bool) -> Self {
        let margin = style.points_to_pixels(MARGIN_PT) as u32;
        if !text {
            return Self {
                margin,
                x_label_area: 0,
                y_label_area: 0,
            };
        }
        let tick_px = style.points_to_pixels(style.tick_size);
        let desc_px = style.points_to_pixels(style.label_size);
        Self {
            margin,
            x_label_area: (tick_px + desc_px * 2.0) as u32,
            y_label_area: (tick_px * 4.0 + desc_px * 2.0) as u32,
        }
    }

    /// Size of the plotting area inside a chart area of `(width, height)`
    pub fn plot_size(&self, (width, height): (u32, u32)) -> (u32, u32) {
        (
            width.saturating_sub(2 * self.margin + self.y_label_area),
            height.saturating_sub(2 * self.margin + self.x_label_area),
        )
    }
}

/// Axis ranges actually drawn for `spec` in a plot of `plot_size` pixels
pub fn plot_ranges(spec: &ChartSpec, (width, height): (u32, u32)) -> ((f64, f64), (f64, f64)) {
    let x_range = drawable_range(spec.x_range);
    let y_range = drawable_range(spec.y_range);
    if spec.equal_aspect && width > 0 && height > 0 {
        fit_aspect(x_range, y_range, width as f64 / height as f64)
    } else {
        (x_range, y_range)
    }
}

/// Draw `spec` onto any plotters drawing area
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    style: &ChartStyle,
    text: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(draw_err)?;

    let area = if text {
        root.titled(&spec.title, text_style(style, style.title_size))
            .map_err(draw_err)?
    } else {
        root.clone()
    };

    let layout = Layout::new(style, text);
    let (x_range, y_range) = plot_ranges(spec, layout.plot_size(area.dim_in_pixel()));

    let mut chart = ChartBuilder::on(&area)
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_err)?;

    let y_ticks = TickFormat::for_axis(y_range, spec.y_exponent, MAX_TICKS);
    draw_mesh(&mut chart, spec, style, text, y_ticks)?;
    draw_lines(&mut chart, spec, style, text)?;
    draw_markers(&mut chart, spec, style, text)?;
    if text && spec.legend {
        draw_legend(&mut chart, style)?;
    }
    Ok(())
}

fn text_style(style: &ChartStyle, points: f64) -> TextStyle<'_> {
    (style.font_family.as_str(), style.points_to_pixels(points))
        .into_font()
        .color(&BLACK)
}

fn draw_mesh<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2d<'a, DB>,
    spec: &ChartSpec,
    style: &ChartStyle,
    text: bool,
    y_ticks: TickFormat,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let x_formatter = |v: &f64| TickFormat::Plain.format(*v);
    let y_formatter = |v: &f64| y_ticks.format(*v);
    let y_desc = match y_ticks {
        TickFormat::Scaled { exponent, .. } => format!("{} [1e{}]", spec.y_label, exponent),
        TickFormat::Plain => spec.y_label.clone(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(MAX_TICKS)
        .y_labels(MAX_TICKS)
        .bold_line_style(BLACK.mix(0.2).stroke_width(1))
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .axis_style(BLACK.stroke_width(1));
    if text {
        mesh.x_desc(spec.x_label.as_str())
            .y_desc(y_desc)
            .label_style(text_style(style, style.tick_size))
            .axis_desc_style(text_style(style, style.label_size))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
    }
    mesh.draw().map_err(draw_err)?;
    Ok(())
}

fn draw_lines<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2d<'a, DB>,
    spec: &ChartSpec,
    style: &ChartStyle,
    text: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let swatch = style.points_to_pixels(LEGEND_SWATCH_PT) as i32;
    for line in &spec.lines {
        let color = line.color;
        let stroke = style.points_to_pixels(line.width).max(1.0) as u32;
        let anno = chart
            .draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(stroke),
            ))
            .map_err(draw_err)?;
        if text {
            anno.label(line.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], color.stroke_width(stroke))
            });
        }
    }
    Ok(())
}

fn draw_markers<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2d<'a, DB>,
    spec: &ChartSpec,
    style: &ChartStyle,
    text: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let markers = match &spec.markers {
        Some(markers) => markers,
        None => return Ok(()),
    };
    let color = markers.color;
    let radius = (style.points_to_pixels(markers.size) / 2.0).max(1.0) as i32;
    let swatch = style.points_to_pixels(LEGEND_SWATCH_PT) as i32;

    let anno = chart
        .draw_series(
            markers
                .points
                .iter()
                .map(|&p| Circle::new(p, radius, color.filled())),
        )
        .map_err(draw_err)?;
    if text {
        anno.label(markers.label.as_str())
            .legend(move |(x, y)| Circle::new((x + swatch / 2, y), radius, color.filled()));
    }
    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2d<'a, DB>,
    style: &ChartStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.5).stroke_width(1))
        .label_font(text_style(style, style.font_size))
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

/// Axis range plotters can map; a zero-width range is opened up around its value
pub fn drawable_range((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if hi > lo {
        return (lo, hi);
    }
    let delta = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
    (lo - delta, lo + delta)
}

/// Smallest 1-2-5 step that covers `range` in at most `max_ticks` intervals
pub fn tick_step((lo, hi): (f64, f64), max_ticks: usize) -> f64 {
    let rough = (hi - lo) / max_ticks.max(1) as f64;
    if !rough.is_finite() || rough <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(rough.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= rough)
        .unwrap_or(10.0 * magnitude)
}

/// How tick values on one axis are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// Decimal, switching to `e` notation for large and tiny magnitudes
    Plain,
    /// Multiple of `10^exponent`, with enough decimals to tell ticks apart
    Scaled { exponent: i32, decimals: usize },
}

impl TickFormat {
    /// Format for an axis over `range` with at most `max_ticks` labels
    ///
    /// The number of decimals follows the tick spacing. plotters may settle on
    /// one more tick than requested, so the step is taken for `max_ticks + 1`.
    pub fn for_axis(range: (f64, f64), exponent: Option<i32>, max_ticks: usize) -> Self {
        let exponent = match exponent {
            Some(exponent) => exponent,
            None => return TickFormat::Plain,
        };
        let step = tick_step(range, max_ticks + 1) / 10f64.powi(exponent);
        let decimals = (-step.log10() - 1e-9).ceil().clamp(0.0, MAX_DECIMALS) as usize;
        TickFormat::Scaled { exponent, decimals }
    }

    pub fn format(&self, value: f64) -> String {
        match *self {
            TickFormat::Scaled { exponent, decimals } => {
                without_negative_zero(format!("{:.*}", decimals, value / 10f64.powi(exponent)))
            }
            TickFormat::Plain => {
                let magnitude = value.abs();
                if magnitude >= 1e5 || (magnitude > 0.0 && magnitude < 1e-3) {
                    format!("{:.1e}", value)
                } else {
                    let fixed = format!("{:.3}", value);
                    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
                    without_negative_zero(trimmed.to_string())
                }
            }
        }
    }
}

fn without_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

fn encode_png(pixels: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let per_meter = (dpi as f64 / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: per_meter,
            yppu: per_meter,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
        writer.finish()?;
    }
    Ok(out)
}
