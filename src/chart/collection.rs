use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::NestedChart;
use crate::domain::SectorPolygon;
use crate::error::{ChartError, Result};

/// Convert one sector into a GeoJSON feature with `Area` and `Risk` properties
pub fn sector_feature(sector: &SectorPolygon) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("Area".to_string(), JsonValue::from(sector.area()));
    properties.insert("Risk".to_string(), JsonValue::from(sector.risk.clone()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&sector.polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Merge both tiers into one collection, all inner features first
pub fn merge_features(chart: &NestedChart) -> FeatureCollection {
    let features = chart
        .inner
        .iter()
        .chain(chart.outer.iter())
        .map(sector_feature)
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write a feature collection as GeoJSON
///
/// The document is fully serialized before anything touches the disk, then
/// written to a sibling temporary file and renamed over `path`, so a failed run
/// never leaves a truncated file behind.
///
/// # Returns
/// * Number of bytes written
pub fn write_geojson(path: &Path, collection: &FeatureCollection, pretty: bool) -> Result<usize> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(collection)?
    } else {
        serde_json::to_vec(collection)?
    };

    let tmp_path = temporary_sibling(path);
    fs::write(&tmp_path, &bytes).map_err(io_error(&tmp_path))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path)(e));
    }

    Ok(bytes.len())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ChartError {
    let path = path.to_path_buf();
    move |source| ChartError::Io { path, source }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
