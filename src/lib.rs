//! riskpie - Generate nested risk pie-chart GeoJSON around a site from a CSV table

pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod table;

pub use error::{ChartError, Result};
