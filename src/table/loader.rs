use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{Center, RiskTable, Tier};
use crate::error::{ChartError, Result};

/// Area value that marks the row carrying the site coordinates
pub const DEFAULT_SITE_LABEL: &str = "Site";

/// A single CSV row; unknown columns are ignored
#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "Risk", default)]
    risk: Option<String>,
    #[serde(rename = "Lon", alias = "Lon_NO", default)]
    lon: Option<String>,
    #[serde(rename = "Lat", alias = "Lat_NO", default)]
    lat: Option<String>,
}

/// Everything the chart needs from the input table
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub center: Center,
    pub risks: RiskTable,
}

/// Load and parse a risk table from a CSV file
pub fn load_table(path: &Path, site_label: &str) -> Result<LoadedTable> {
    let file = File::open(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(file, site_label)
}

/// Parse a risk table from any CSV source
///
/// # Algorithm
/// 1. The row whose Area equals `site_label` supplies the center from Lon/Lat
/// 2. Every other Area splits at its last `_R` into direction and tier number
/// 3. Directions are kept in order of first appearance
///
/// Rows may stop after the Risk column; absent trailing fields read as empty.
/// Tier completeness is not checked here; see [`RiskTable::ensure_complete`].
pub fn parse_table<R: Read>(source: R, site_label: &str) -> Result<LoadedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut center: Option<Center> = None;
    let mut risks = RiskTable::new();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: TableRow = record.deserialize(Some(&headers))?;

        if row.area == site_label {
            if center.is_some() {
                return Err(malformed(line, format!("duplicate `{}` row", site_label)));
            }
            center = Some(parse_center(&row, line)?);
            continue;
        }

        let (direction, tier) = split_area(&row.area).ok_or_else(|| {
            malformed(
                line,
                format!("Area `{}` is not of the form <direction>_R1 or <direction>_R2", row.area),
            )
        })?;

        let risk = row
            .risk
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| malformed(line, format!("Area `{}` has no Risk value", row.area)))?;

        risks.insert(tier, direction, risk);
    }

    let center = center.ok_or_else(|| ChartError::MissingCenter {
        label: site_label.to_string(),
    })?;

    Ok(LoadedTable { center, risks })
}

fn split_area(area: &str) -> Option<(&str, Tier)> {
    let (direction, number) = area.rsplit_once("_R")?;
    if direction.is_empty() {
        return None;
    }
    Some((direction, Tier::from_number(number)?))
}

fn parse_center(row: &TableRow, line: u64) -> Result<Center> {
    let lon = parse_coordinate(row.lon.as_deref(), "Lon", line)?;
    let lat = parse_coordinate(row.lat.as_deref(), "Lat", line)?;

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(malformed(
            line,
            format!("site coordinate ({}, {}) out of range", lon, lat),
        ));
    }

    Ok(Center::new(lon, lat))
}

fn parse_coordinate(value: Option<&str>, field: &str, line: u64) -> Result<f64> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| malformed(line, format!("site row has no {} value", field)))?;

    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(line, format!("site {} `{}` is not a number", field, value)))
}

fn malformed(line: u64, reason: String) -> ChartError {
    ChartError::MalformedRow { line, reason }
}
