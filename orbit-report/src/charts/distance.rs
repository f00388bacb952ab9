//! Distance-to-reference line chart

use super::{padded_limits, palette_color, ChartSpec, LineSeries};
use crate::config::ChartStyle;
use crate::types::Result;

/// Figure size of a distance chart (inches)
pub const DISTANCE_FIGURE: (f64, f64) = (12.0, 6.0);
/// Fraction of the distance span added above and below the curve
pub const DISTANCE_PADDING: f64 = 0.01;
/// Power of ten used for y tick labels
pub const DISTANCE_EXPONENT: i32 = 11;

const LINE_WIDTH: f64 = 2.0;

pub fn distance_file_name(planet: &str) -> String {
    format!("{planet}_distance_to_sun.png")
}

/// Describe the distance chart of one planet
pub fn distance_chart(planet: &str, days: &[f64], distances: &[f64]) -> ChartSpec {
    let points: Vec<(f64, f64)> = days
        .iter()
        .copied()
        .zip(distances.iter().copied())
        .collect();

    let (min_d, max_d) = super::extent(distances.iter().copied()).unwrap_or((0.0, 0.0));
    let y_range = padded_limits(min_d, max_d, DISTANCE_PADDING);
    let x_range = super::extent(days.iter().copied()).unwrap_or((0.0, 0.0));

    ChartSpec {
        figure_size: DISTANCE_FIGURE,
        title: format!("{planet} - Distance to the Sun Over Time"),
        x_label: "Day".to_string(),
        y_label: "Distance (m)".to_string(),
        x_range,
        y_range,
        lines: vec![LineSeries {
            label: planet.to_string(),
            points,
            color: palette_color(0),
            width: LINE_WIDTH,
        }],
        markers: None,
        y_exponent: Some(DISTANCE_EXPONENT),
        legend: false,
        equal_aspect: false,
    }
}

/// Render the distance chart of one planet to PNG bytes
pub fn render_distance_chart(
    planet: &str,
    days: &[f64],
    distances: &[f64],
    style: &ChartStyle,
) -> Result<Vec<u8>> {
    super::render_png(&distance_chart(planet, days, distances), style)
}
