use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Failed to read observations file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("No header row containing a 'Date' column found in '{source_name}'")]
    HeaderNotFound { source_name: String },

    // Errors raised by the polars CSV reader
    #[error("Parsing error processing CSV data from '{source_name}'")]
    CsvRead {
        source_name: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{source_name}'")]
    MissingColumn { source_name: String, column: String },

    #[error("Column '{column}' has an unexpected type")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid month {year:04}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}
