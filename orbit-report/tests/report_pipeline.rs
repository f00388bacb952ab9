// End-to-end runs of the report pipeline on small tables
use orbit_report::charts::render::PNG_SIGNATURE;
use orbit_report::{
    distance_series, simulate_to_file, Alignment, ChartStyle, ReportConfig, ReportError,
    ReportGenerator, SampleTable, SimulationConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EARTH_TABLE: &str = "\
Body,Day,PosX,PosY,PosZ
Sun,0,0,0,0
Earth,0,1,0,0
Sun,1,0,0,0
Earth,1,0,1,0
Sun,2,0,0,0
Earth,2,-1,0,0
";

fn config_for(dir: &Path, table: &str) -> ReportConfig {
    let input = dir.join("simulation_output.csv");
    fs::write(&input, table).unwrap();
    ReportConfig::new()
        .with_input(input)
        .with_output_root(dir)
        .with_style(ChartStyle::new().with_dpi(16).with_text(false))
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("{:?}: {}", path, e));
    assert_eq!(bytes[..8], PNG_SIGNATURE, "{:?} is not a PNG", path);
}

#[test]
fn earth_around_fixed_sun() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), EARTH_TABLE);

    let table = SampleTable::load(&config.input).unwrap();
    let partition = table.partition("Sun").unwrap();
    let distances =
        distance_series(&partition.planets[0], &partition.reference, Alignment::Day).unwrap();
    assert_eq!(distances.distances, vec![1.0, 1.0, 1.0]);

    let summary = ReportGenerator::new(config).unwrap().run().unwrap();
    assert_eq!(summary.planets, vec!["Earth"]);

    let distance_png = dir.path().join("planet_distance_graphs/Earth_distance_to_sun.png");
    let orbit_png = dir.path().join("planet_orbits/Earth_orbit_xy.png");
    let combined_png = dir.path().join("planet_orbits/all_orbits_xy.png");
    for path in [&distance_png, &orbit_png, &combined_png] {
        assert_png(path);
    }
    assert_eq!(summary.files().len(), 3);
}

#[test]
fn one_distance_and_one_orbit_chart_per_planet() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), "");
    let simulation = SimulationConfig {
        days: 3,
        steps_per_day: 2,
        bodies: Vec::new(),
    };
    simulate_to_file(&simulation, &config.input).unwrap();

    let summary = ReportGenerator::new(config.clone().with_parallel(true))
        .unwrap()
        .run()
        .unwrap();

    let planets = summary.planets.len();
    assert_eq!(planets, 8);
    assert_eq!(fs::read_dir(&config.distance_dir).unwrap().count(), planets);
    assert_eq!(fs::read_dir(&config.orbit_dir).unwrap().count(), planets + 1);
    for file in summary.files() {
        assert_png(file);
    }
}

#[test]
fn rerun_overwrites_outputs() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), EARTH_TABLE);
    let generator = ReportGenerator::new(config.clone()).unwrap();
    let first = generator.run().unwrap();
    let second = generator.run().unwrap();
    assert_eq!(first.files(), second.files());
    assert_eq!(fs::read_dir(&config.orbit_dir).unwrap().count(), 2);
}

#[test]
fn missing_sun_is_reported() {
    let dir = TempDir::new().unwrap();
    let table = "Body,Day,PosX,PosY,PosZ\nEarth,0,1,0,0\nEarth,1,0,1,0\n";
    let config = config_for(dir.path(), table);
    let err = ReportGenerator::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, ReportError::MissingReference(ref name) if name == "Sun"));
    assert_eq!(err.to_string(), "Reference body 'Sun' has no samples");
}

#[test]
fn misaligned_days_abort_the_run() {
    let dir = TempDir::new().unwrap();
    let table = "Body,Day,PosX,PosY,PosZ\nSun,0,0,0,0\nEarth,0,1,0,0\nEarth,1,0,1,0\n";
    let config = config_for(dir.path(), table);
    let err = ReportGenerator::new(config.clone()).unwrap().run().unwrap_err();
    assert!(matches!(err, ReportError::MissingDay { day, .. } if day == 1.0));

    let err = ReportGenerator::new(config.with_alignment(Alignment::Row))
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, ReportError::LengthMismatch { expected: 1, actual: 2, .. }));
}

#[test]
fn missing_input_file() {
    let dir = TempDir::new().unwrap();
    let config = ReportConfig::new()
        .with_input(dir.path().join("absent.csv"))
        .with_output_root(dir.path())
        .with_style(ChartStyle::new().with_text(false));
    let err = ReportGenerator::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
}
