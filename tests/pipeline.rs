use geojson::{GeoJson, JsonValue, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use riskpie::ChartError;
use riskpie::chart::ChartParams;
use riskpie::config::{CliOverrides, RunConfig};
use riskpie::pipeline::{chart_collection, run};
use riskpie::table::{DEFAULT_SITE_LABEL, parse_table};

const COMPASS: &str = "\
Area,Risk,Lon,Lat
Site,,10.0,45.0
N_R1,High,,
N_R2,Medium,,
E_R1,Low,,
E_R2,Low,,
S_R1,Medium,,
S_R2,High,,
W_R1,Low,,
W_R2,Medium,,
";

fn config_for(dir: &Path, csv: &str) -> RunConfig {
    let input = dir.join("input.csv");
    fs::write(&input, csv).unwrap();

    RunConfig::resolve(
        CliOverrides {
            input: Some(input),
            output: Some(dir.join("chart.geojson")),
            ..Default::default()
        },
        None,
    )
}

fn ring(value: &Value) -> &Vec<Vec<f64>> {
    match value {
        Value::Polygon(rings) => {
            assert_eq!(rings.len(), 1, "sector polygons have no holes");
            &rings[0]
        }
        other => panic!("expected polygon, got {:?}", other),
    }
}

#[test]
fn test_compass_chart_end_to_end() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path(), COMPASS);

    let summary = run(&config).unwrap();
    assert_eq!(summary.directions, 4);
    assert_eq!(summary.features, 8);

    let contents = fs::read_to_string(&config.output).unwrap();
    assert_eq!(summary.bytes, contents.len());
    let collection = match contents.parse::<GeoJson>().unwrap() {
        GeoJson::FeatureCollection(fc) => fc,
        other => panic!("expected feature collection, got {:?}", other),
    };

    let areas: Vec<&str> = collection
        .features
        .iter()
        .filter_map(|f| f.property("Area").and_then(JsonValue::as_str))
        .collect();
    assert_eq!(
        areas,
        vec!["N_R1", "E_R1", "S_R1", "W_R1", "N_R2", "E_R2", "S_R2", "W_R2"]
    );

    let north = &collection.features[0];
    assert_eq!(north.property("Risk"), Some(&JsonValue::from("High")));

    // Every inner ring opens and closes on the site
    for feature in &collection.features[..4] {
        let ring = ring(&feature.geometry.as_ref().unwrap().value);
        for vertex in [ring.first().unwrap(), ring.last().unwrap()] {
            assert!((vertex[0] - 10.0).abs() < 1e-9);
            assert!((vertex[1] - 45.0).abs() < 1e-9);
        }
    }

    // No outer ring touches the site
    for feature in &collection.features[4..] {
        let ring = ring(&feature.geometry.as_ref().unwrap().value);
        assert_eq!(ring.first(), ring.last());
        assert!(
            ring.iter()
                .all(|v| (v[0] - 10.0).abs() > 1e-7 || (v[1] - 45.0).abs() > 1e-7)
        );
    }
}

#[test]
fn test_north_sector_points_north() {
    let table = parse_table(COMPASS.as_bytes(), DEFAULT_SITE_LABEL).unwrap();
    let params = ChartParams::default().with_arc_points(6);
    let collection = chart_collection(&table, &params).unwrap();

    let north = ring(&collection.features[0].geometry.as_ref().unwrap().value);
    // [center, arc(0°..90°), center]: the arc stays in the north-east quadrant
    assert_eq!(north.len(), 9);
    assert!((north[1][0] - 10.0).abs() < 1e-12 && north[1][1] > 45.0);
    for vertex in &north[1..north.len() - 1] {
        assert!(vertex[0] >= 10.0 - 1e-12);
        // the great circle heading east dips a hair south of the site latitude
        assert!(vertex[1] >= 45.0 - 1e-6);
    }
}

#[test]
fn test_missing_site_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path(), "Area,Risk\nN_R1,High\nN_R2,Low\n");

    let err = run(&config).unwrap_err();
    assert!(matches!(err, ChartError::MissingCenter { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!config.output.exists());
}

#[test]
fn test_incomplete_tier_fails_at_load_by_default() {
    let dir = tempdir().unwrap();
    let csv = format!("{}NW_R1,High,,\n", COMPASS);
    let config = config_for(dir.path(), &csv);

    match run(&config) {
        Err(ChartError::MissingRisk { direction, .. }) => assert_eq!(direction, "NW"),
        other => panic!("expected MissingRisk, got {:?}", other),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_incomplete_tier_fails_at_assembly_when_lenient() {
    let csv = format!("{}NW_R1,High,,\n", COMPASS);
    let table = parse_table(csv.as_bytes(), DEFAULT_SITE_LABEL).unwrap();

    let err = chart_collection(&table, &ChartParams::default()).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.to_string(), "no outer risk recorded for direction `NW`");
}

#[test]
fn test_table_without_trailing_coordinate_fields() {
    let dir = tempdir().unwrap();
    let csv = "Area,Risk,Lon_NO,Lat_NO\nSite,,10.0,45.0\nN_R1,High\nN_R2,Low\nS_R1,Low\nS_R2,Low\n";
    let config = config_for(dir.path(), csv);

    let summary = run(&config).unwrap();
    assert_eq!(summary.directions, 2);
    assert_eq!(summary.features, 4);
}

#[test]
fn test_malformed_row_reports_line() {
    let dir = tempdir().unwrap();
    let csv = "Area,Risk,Lon,Lat\nSite,,10.0,45.0\nN_R1,High,,\nNorth,Low,,\n";
    let config = config_for(dir.path(), csv);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, ChartError::MalformedRow { line: 4, .. }));
    assert!(err.to_string().contains("North"));
}
