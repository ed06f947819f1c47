use geojson::FeatureCollection;

use crate::chart::{ChartParams, build_chart, merge_features, write_geojson};
use crate::config::RunConfig;
use crate::error::Result;
use crate::geometry::AzimuthalEquidistant;
use crate::table::{LoadedTable, load_table};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub directions: usize,
    pub features: usize,
    pub bytes: usize,
}

/// Load the configured table, checking tier completeness unless `lenient`
pub fn load(config: &RunConfig) -> Result<LoadedTable> {
    let table = load_table(&config.input, &config.site_label)?;
    if !config.lenient {
        table.risks.ensure_complete()?;
    }
    Ok(table)
}

/// Project the table around its site and build the merged feature collection
pub fn chart_collection(table: &LoadedTable, params: &ChartParams) -> Result<FeatureCollection> {
    let projection = AzimuthalEquidistant::new(table.center);
    let chart = build_chart(&table.risks, &projection, params)?;
    Ok(merge_features(&chart))
}

/// Load, build and write in one go
///
/// Nothing is written unless every earlier stage succeeds.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let table = load(config)?;
    let collection = chart_collection(&table, &config.params)?;
    let bytes = write_geojson(&config.output, &collection, config.pretty)?;

    Ok(RunSummary {
        directions: table.risks.directions().len(),
        features: collection.features.len(),
        bytes,
    })
}
