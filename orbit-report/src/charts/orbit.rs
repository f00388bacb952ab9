//! XY orbit charts, per planet and combined

use super::{
    equal_aspect_ranges, palette_color, ChartSpec, LineSeries, MarkerSeries, SUN_COLOR,
};
use crate::config::ChartStyle;
use crate::types::Result;

/// Figure size of a single-planet orbit chart (inches)
pub const ORBIT_FIGURE: (f64, f64) = (8.0, 8.0);
/// Figure size of the combined orbit chart (inches)
pub const COMBINED_FIGURE: (f64, f64) = (10.0, 10.0);

const ORBIT_LINE_WIDTH: f64 = 1.5;
const COMBINED_LINE_WIDTH: f64 = 1.2;
const SUN_MARKER_SIZE: f64 = 8.0;
const COMBINED_SUN_MARKER_SIZE: f64 = 10.0;
const RANGE_MARGIN: f64 = 0.05;

pub const COMBINED_FILE_NAME: &str = "all_orbits_xy.png";

pub fn orbit_file_name(planet: &str) -> String {
    format!("{planet}_orbit_xy.png")
}

fn sun_markers(sun_xy: &[(f64, f64)], size: f64) -> MarkerSeries {
    MarkerSeries {
        label: "Sun".to_string(),
        points: sun_xy.to_vec(),
        color: SUN_COLOR,
        size,
    }
}

/// Starting ranges at the figure's aspect; rendering refits them to the plot area
fn ranges_for(
    lines: &[LineSeries],
    markers: &MarkerSeries,
    figure: (f64, f64),
) -> ((f64, f64), (f64, f64)) {
    let all: Vec<(f64, f64)> = lines
        .iter()
        .flat_map(|l| l.points.iter().copied())
        .chain(markers.points.iter().copied())
        .collect();
    equal_aspect_ranges(&all, figure.0 / figure.1, RANGE_MARGIN)
}

/// Describe the orbit chart of one planet
///
/// `color_index` picks the palette entry so a planet keeps its color across
/// the single and combined charts.
pub fn orbit_chart(
    planet: &str,
    planet_xy: &[(f64, f64)],
    sun_xy: &[(f64, f64)],
    color_index: usize,
) -> ChartSpec {
    let lines = vec![LineSeries {
        label: planet.to_string(),
        points: planet_xy.to_vec(),
        color: palette_color(color_index),
        width: ORBIT_LINE_WIDTH,
    }];
    let markers = sun_markers(sun_xy, SUN_MARKER_SIZE);
    let (x_range, y_range) = ranges_for(&lines, &markers, ORBIT_FIGURE);

    ChartSpec {
        figure_size: ORBIT_FIGURE,
        title: format!("{planet} - 2D Orbital Path (XY Plane)"),
        x_label: "X Position (m)".to_string(),
        y_label: "Y Position (m)".to_string(),
        x_range,
        y_range,
        lines,
        markers: Some(markers),
        y_exponent: None,
        legend: true,
        equal_aspect: true,
    }
}

/// Describe the chart overlaying every planet's trajectory
pub fn combined_orbit_chart(
    planets: &[(&str, Vec<(f64, f64)>)],
    sun_xy: &[(f64, f64)],
) -> ChartSpec {
    let lines: Vec<LineSeries> = planets
        .iter()
        .enumerate()
        .map(|(i, (name, xy))| LineSeries {
            label: name.to_string(),
            points: xy.clone(),
            color: palette_color(i),
            width: COMBINED_LINE_WIDTH,
        })
        .collect();
    let markers = sun_markers(sun_xy, COMBINED_SUN_MARKER_SIZE);
    let (x_range, y_range) = ranges_for(&lines, &markers, COMBINED_FIGURE);

    ChartSpec {
        figure_size: COMBINED_FIGURE,
        title: "All Bodies - 2D Orbital Paths (XY Plane)".to_string(),
        x_label: "X Position (m)".to_string(),
        y_label: "Y Position (m)".to_string(),
        x_range,
        y_range,
        lines,
        markers: Some(markers),
        y_exponent: None,
        legend: true,
        equal_aspect: true,
    }
}

pub fn render_orbit_chart(
    planet: &str,
    planet_xy: &[(f64, f64)],
    sun_xy: &[(f64, f64)],
    color_index: usize,
    style: &ChartStyle,
) -> Result<Vec<u8>> {
    super::render_png(&orbit_chart(planet, planet_xy, sun_xy, color_index), style)
}

pub fn render_combined_orbit_chart(
    planets: &[(&str, Vec<(f64, f64)>)],
    sun_xy: &[(f64, f64)],
    style: &ChartStyle,
) -> Result<Vec<u8>> {
    super::render_png(&combined_orbit_chart(planets, sun_xy), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_path() -> Vec<(f64, f64)> {
        vec![(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]
    }

    #[test]
    fn test_orbit_chart_layout() {
        let spec = orbit_chart("Earth", &earth_path(), &[(0.0, 0.0)], 2);
        assert_eq!(spec.title, "Earth - 2D Orbital Path (XY Plane)");
        assert_eq!(spec.x_label, "X Position (m)");
        assert_eq!(spec.y_label, "Y Position (m)");
        assert_eq!(spec.figure_size, (8.0, 8.0));
        assert_eq!(spec.lines.len(), 1);
        assert_eq!(spec.lines[0].points.len(), 3);
        assert_eq!(spec.lines[0].color, palette_color(2));

        let markers = spec.markers.as_ref().unwrap();
        assert_eq!(markers.label, "Sun");
        assert_eq!(markers.color, SUN_COLOR);
        assert_eq!(markers.points, vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_orbit_chart_has_equal_spans() {
        let spec = orbit_chart("Earth", &earth_path(), &[(0.0, 0.0)], 0);
        let x_span = spec.x_range.1 - spec.x_range.0;
        let y_span = spec.y_range.1 - spec.y_range.0;
        assert!((x_span - y_span).abs() < 1e-12);
        assert!(spec.x_range.0 < -1.0 && spec.x_range.1 > 1.0);
    }

    #[test]
    fn test_combined_chart_series_count() {
        let planets = vec![
            ("Mercury", vec![(0.4, 0.0), (0.0, 0.4)]),
            ("Venus", vec![(0.7, 0.0), (0.0, 0.7)]),
            ("Earth", earth_path()),
        ];
        let spec = combined_orbit_chart(&planets, &[(0.0, 0.0), (0.01, 0.0)]);
        assert_eq!(spec.title, "All Bodies - 2D Orbital Paths (XY Plane)");
        assert_eq!(spec.figure_size, (10.0, 10.0));
        assert_eq!(spec.lines.len(), 3);
        assert_eq!(spec.lines[1].label, "Venus");
        assert!(spec.legend);
        assert!(spec.equal_aspect);
        assert!(spec.markers.is_some());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(orbit_file_name("Mars"), "Mars_orbit_xy.png");
        assert_eq!(COMBINED_FILE_NAME, "all_orbits_xy.png");
    }
}
