//! Chart descriptions and PNG rendering
//!
//! Charts are built in two steps. The `distance` and `orbit` modules turn
//! series into a [`ChartSpec`], a plain description of what to draw. The
//! `render` module draws a spec with plotters and encodes it as PNG bytes.
//! Neither step touches the filesystem.

pub mod distance;
pub mod fonts;
pub mod orbit;
pub mod render;

pub use distance::{distance_chart, distance_file_name, render_distance_chart};
pub use orbit::{
    combined_orbit_chart, orbit_chart, orbit_file_name, render_combined_orbit_chart,
    render_orbit_chart, COMBINED_FILE_NAME,
};
pub use render::render_png;

use plotters::style::RGBColor;

/// Ten-color categorical palette (tab10), cycled per planet
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Marker color of the reference body
pub const SUN_COLOR: RGBColor = RGBColor(255, 165, 0);

pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// A polyline through data points
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    /// Stroke width in points
    pub width: f64,
}

/// Filled circles at data points, drawn as a single legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    /// Marker diameter in points
    pub size: f64,
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub lines: Vec<LineSeries>,
    pub markers: Option<MarkerSeries>,
    /// Fixed power of ten for y tick labels (scientific notation)
    pub y_exponent: Option<i32>,
    /// Draw a legend in the upper right corner
    pub legend: bool,
    /// Stretch the ranges so both axes have the same units per pixel
    pub equal_aspect: bool,
}

/// (min, max) over a sequence, or None if it is empty
pub fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Limits widened by `fraction` of the span on both sides
///
/// A zero span gives zero padding, so a constant series yields `(v, v)`.
pub fn padded_limits(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let pad = (max - min) * fraction;
    (min - pad, max + pad)
}

/// Axis ranges that show every point with equal units per pixel on both axes
///
/// `aspect` is the plot width divided by its height.
pub fn equal_aspect_ranges(
    points: &[(f64, f64)],
    aspect: f64,
    margin: f64,
) -> ((f64, f64), (f64, f64)) {
    let (x_min, x_max) = extent(points.iter().map(|p| p.0)).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = extent(points.iter().map(|p| p.1)).unwrap_or((-1.0, 1.0));

    let x_pad = (x_max - x_min) * margin;
    let y_pad = (y_max - y_min) * margin;
    let mut x_range = (x_min - x_pad, x_max + x_pad);
    let mut y_range = (y_min - y_pad, y_max + y_pad);
    if x_range.1 <= x_range.0 && y_range.1 <= y_range.0 {
        let half = x_min.abs().max(y_min.abs()).max(1.0) * 0.05;
        x_range = (x_min - half, x_max + half);
        y_range = (y_min - half, y_max + half);
    }

    fit_aspect(x_range, y_range, aspect)
}

/// Widen the shorter range around its center until `x span / y span == aspect`
pub fn fit_aspect(
    x_range: (f64, f64),
    y_range: (f64, f64),
    aspect: f64,
) -> ((f64, f64), (f64, f64)) {
    let mut x_span = x_range.1 - x_range.0;
    let mut y_span = y_range.1 - y_range.0;
    if x_span < y_span * aspect {
        x_span = y_span * aspect;
    } else {
        y_span = x_span / aspect;
    }

    let x_center = (x_range.0 + x_range.1) / 2.0;
    let y_center = (y_range.0 + y_range.1) / 2.0;
    (
        (x_center - x_span / 2.0, x_center + x_span / 2.0),
        (y_center - y_span / 2.0, y_center + y_span / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_padded_limits() {
        assert_eq!(padded_limits(0.0, 100.0, 0.01), (-1.0, 101.0));
        assert_eq!(padded_limits(5.0, 5.0, 0.01), (5.0, 5.0));
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3.0, -1.0, 2.0].into_iter()), Some((-1.0, 3.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn test_equal_aspect_square() {
        let points = [(-2.0, -1.0), (2.0, 1.0)];
        let ((x0, x1), (y0, y1)) = equal_aspect_ranges(&points, 1.0, 0.0);
        assert_approx_eq!(x1 - x0, 4.0);
        assert_approx_eq!(y1 - y0, 4.0);
        assert_approx_eq!((y0 + y1) / 2.0, 0.0);
    }

    #[test]
    fn test_equal_aspect_wide_plot() {
        let points = [(0.0, 0.0), (1.0, 1.0)];
        let ((x0, x1), (y0, y1)) = equal_aspect_ranges(&points, 2.0, 0.0);
        assert_approx_eq!((x1 - x0) / (y1 - y0), 2.0);
        assert!(x0 <= 0.0 && x1 >= 1.0 && y0 <= 0.0 && y1 >= 1.0);
    }

    #[test]
    fn test_equal_aspect_single_point() {
        let ((x0, x1), (y0, y1)) = equal_aspect_ranges(&[(0.0, 0.0)], 1.0, 0.05);
        assert!(x1 > x0);
        assert!(y1 > y0);
        assert!(x0 < 0.0 && x1 > 0.0);
    }

    #[test]
    fn test_fit_aspect_keeps_data_inside() {
        let ((x0, x1), (y0, y1)) = fit_aspect((-1.0, 1.0), (-1.0, 1.0), 1.25);
        assert_approx_eq!((x1 - x0) / (y1 - y0), 1.25);
        assert_approx_eq!(y0, -1.0);
        assert_approx_eq!(x0, -1.25);

        let ((x0, x1), (y0, y1)) = fit_aspect((0.0, 4.0), (0.0, 1.0), 0.5);
        assert_approx_eq!(x1 - x0, 4.0);
        assert_approx_eq!(y1 - y0, 8.0);
        assert_approx_eq!((y0 + y1) / 2.0, 0.5);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(10));
        assert_ne!(palette_color(0), palette_color(1));
    }
}
