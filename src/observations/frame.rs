//! Contains the `DailyObservations` structure wrapping a cleaned table of daily
//! weather observations.

use crate::observations::cleaning::clean_observations;
use crate::observations::error::ObservationError;
use crate::observations::loader::ObservationLoader;
use crate::types::columns::{ColumnKind, ObservationColumn};
use chrono::{Duration, NaiveDate};
use log::info;
use polars::prelude::{col, lit, DataFrame, Expr, IntoLazy};
use std::path::Path;

/// A cleaned table of daily weather observations, one row per day.
///
/// The `Date` column is a polars `Date`, numeric columns are `Float64` and each
/// wind direction column has a derived angle column in degrees (see
/// [`ObservationColumn::angle_column`]).
///
/// # Examples
///
/// ```no_run
/// use obsplot::{DailyObservations, ObservationColumn};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let observations = DailyObservations::from_csv_path("IDCJDW2037.202403.csv")?;
/// let rainfall = observations.values(ObservationColumn::Rainfall);
/// println!("{} days, rainfall: {:?}", observations.len(), rainfall);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DailyObservations {
    /// The underlying cleaned DataFrame.
    pub frame: DataFrame,
}

impl DailyObservations {
    /// Wraps an already cleaned frame.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Loads and cleans an observations CSV from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationError::FileRead`] if the file cannot be read,
    /// [`ObservationError::HeaderNotFound`] if no header row with a `Date` column
    /// exists, and [`ObservationError::MissingColumn`] if the date column is absent
    /// after header resolution.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ObservationError> {
        let path = path.as_ref();
        let raw = ObservationLoader::read_path(path)?;
        let frame = clean_observations(raw, &path.display().to_string())?;
        info!("Loaded {} daily observations from {}", frame.height(), path.display());
        Ok(Self::new(frame))
    }

    /// Loads and cleans observations from in-memory CSV bytes.
    pub fn from_csv_bytes(bytes: &[u8], source_name: &str) -> Result<Self, ObservationError> {
        let raw = ObservationLoader::read_bytes(bytes, source_name)?;
        Ok(Self::new(clean_observations(raw, source_name)?))
    }

    /// Filters rows with an arbitrary polars predicate.
    pub fn filter(&self, predicate: Expr) -> Result<Self, ObservationError> {
        let frame = self.frame.clone().lazy().filter(predicate).collect()?;
        Ok(Self::new(frame))
    }

    /// Keeps the rows between `start` and `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationError::InvalidDateRange`] if `start` is after `end`.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Self, ObservationError> {
        if start > end {
            return Err(ObservationError::InvalidDateRange { start, end });
        }
        let date = ObservationColumn::Date.header();
        self.filter(
            col(date)
                .gt_eq(lit(start))
                .and(col(date).lt_eq(lit(end))),
        )
    }

    /// Keeps the rows of one calendar month.
    pub fn get_for_month(&self, year: i32, month: u32) -> Result<Self, ObservationError> {
        let invalid = || ObservationError::InvalidMonth { year, month };
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        self.get_range(start, next - Duration::days(1))
    }

    /// The observation dates, in row order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, ObservationError> {
        let column = self.frame.column(ObservationColumn::Date.header())?;
        let dates = column.date().map_err(|e| ObservationError::ColumnType {
            column: ObservationColumn::Date.header().to_string(),
            source: e,
        })?;
        Ok(dates.as_date_iter().flatten().collect())
    }

    /// Values of a numeric or angle column, or `None` if the file had no such column.
    pub fn values(&self, column: ObservationColumn) -> Option<Vec<Option<f64>>> {
        if !matches!(column.kind(), ColumnKind::Numeric | ColumnKind::Angle) {
            return None;
        }
        let values = self.frame.column(column.header()).ok()?.f64().ok()?;
        Some(values.into_iter().collect())
    }

    /// Whether the cleaned frame has the given column.
    pub fn has_column(&self, column: ObservationColumn) -> bool {
        self.frame.column(column.header()).is_ok()
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}
