pub mod collection;
pub mod sector;

pub use collection::{merge_features, sector_feature, write_geojson};
pub use sector::{
    ChartParams, DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS, NestedChart, build_chart,
    sector_span,
};
