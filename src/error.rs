use crate::charts::error::ChartError;
use crate::observations::error::ObservationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObsPlotError {
    #[error(transparent)]
    Observations(#[from] ObservationError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Failed to read config file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
