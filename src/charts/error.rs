use crate::observations::error::ObservationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No observations to plot")]
    NoObservations,

    #[error("Failed to read observations for plotting")]
    Observations(#[from] ObservationError),

    #[error("Failed to write chart to '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),
}
