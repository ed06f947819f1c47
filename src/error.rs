use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Tier;

/// Errors raised while loading the risk table or assembling the chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no `{label}` row found; the table must contain exactly one site row with Lon/Lat")]
    MissingCenter { label: String },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("no {tier} risk recorded for direction `{direction}`")]
    MissingRisk { direction: String, tier: Tier },

    #[error("invalid chart parameters: {0}")]
    InvalidParameters(String),

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to serialize GeoJSON")]
    Json(#[from] serde_json::Error),
}

impl ChartError {
    /// Process exit code for this failure
    ///
    /// * 2 - the input table is unusable
    /// * 3 - the chart could not be assembled
    /// * 1 - anything else (I/O, serialization)
    pub fn exit_code(&self) -> u8 {
        match self {
            ChartError::MissingCenter { .. } | ChartError::MalformedRow { .. } => 2,
            ChartError::Csv(_) => 2,
            ChartError::MissingRisk { .. } | ChartError::InvalidParameters(_) => 3,
            ChartError::Io { .. } | ChartError::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
