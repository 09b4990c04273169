//! The cleaning pass: turns the all-string frame produced by the loader into
//! typed columns ready for plotting.

use crate::observations::error::ObservationError;
use crate::types::columns::{ColumnKind, ObservationColumn};
use crate::types::compass::{is_calm, WindDirection};
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use polars::prelude::*;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the polars `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Applies date parsing, calm normalisation, numeric coercion and compass
/// angle derivation to a frame read by [`crate::observations::loader::ObservationLoader`].
///
/// Rows whose date cannot be parsed are dropped; every other row is kept in file order.
pub fn clean_observations(
    mut df: DataFrame,
    source_name: &str,
) -> Result<DataFrame, ObservationError> {
    let date_header = ObservationColumn::Date.header();
    if df.column(date_header).is_err() {
        return Err(ObservationError::MissingColumn {
            source_name: source_name.to_string(),
            column: date_header.to_string(),
        });
    }

    let dates = parse_date_column(string_column(&df, date_header)?)?;
    df.with_column(dates)?;

    for column in ObservationColumn::ALL {
        let header = column.header();
        if df.column(header).is_err() {
            continue;
        }
        match column.kind() {
            ColumnKind::Numeric => {
                let numeric = coerce_numeric(string_column(&df, header)?);
                df.with_column(numeric)?;
            }
            ColumnKind::Direction => {
                if let Some(angle_column) = column.angle_column() {
                    let angles = direction_angles(string_column(&df, header)?, angle_column);
                    df.with_column(angles)?;
                }
            }
            ColumnKind::Date | ColumnKind::Text | ColumnKind::Angle => {}
        }
    }

    // Angles are derived above, so direction text can be normalised too.
    let text_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().to_string())
        .collect();
    for name in text_columns {
        let replaced = replace_calm(string_column(&df, &name)?);
        if let Some(replaced) = replaced {
            df.with_column(replaced)?;
        }
    }

    let before = df.height();
    let df = df
        .lazy()
        .filter(col(date_header).is_not_null())
        .collect()?;
    let dropped = before - df.height();
    if dropped > 0 {
        warn!(
            "Dropped {} rows with an unparseable date from {}",
            dropped, source_name
        );
    }
    debug!("Cleaned {} rows from {}", df.height(), source_name);
    Ok(df)
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, ObservationError> {
    df.column(name)?
        .str()
        .map_err(|e| ObservationError::ColumnType {
            column: name.to_string(),
            source: e,
        })
}

/// Parses a date cell, trying each supported format in turn.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_date_column(values: &StringChunked) -> Result<Series, ObservationError> {
    let days = Int32Chunked::from_iter_options(
        values.name().clone(),
        values.into_iter().map(|value| {
            value
                .and_then(parse_date)
                .map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        }),
    );
    Ok(days.into_series().cast(&DataType::Date)?)
}

/// Parses a numeric cell. `Calm` counts as zero; anything unparseable is `None`.
pub fn parse_numeric(value: &str) -> Option<f64> {
    if is_calm(value) {
        return Some(0.0);
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn coerce_numeric(values: &StringChunked) -> Series {
    let mut unparseable = 0usize;
    let numbers = Float64Chunked::from_iter_options(
        values.name().clone(),
        values.into_iter().map(|value| {
            let value = value?;
            let parsed = parse_numeric(value);
            if parsed.is_none() && !value.trim().is_empty() {
                unparseable += 1;
            }
            parsed
        }),
    );
    if unparseable > 0 {
        debug!(
            "Coerced {} unparseable values to null in '{}'",
            unparseable,
            values.name()
        );
    }
    numbers.into_series()
}

/// Replaces `Calm` cells with `"0"`. Returns `None` when the column has none.
fn replace_calm(values: &StringChunked) -> Option<Series> {
    let calm = values.into_iter().flatten().filter(|v| is_calm(v)).count();
    if calm == 0 {
        return None;
    }
    debug!("Replaced {} Calm cells in '{}'", calm, values.name());
    let replaced = StringChunked::from_iter_options(
        values.name().clone(),
        values
            .into_iter()
            .map(|value| value.map(|v| if is_calm(v) { "0" } else { v })),
    );
    Some(replaced.into_series())
}

fn direction_angles(values: &StringChunked, angle_column: ObservationColumn) -> Series {
    Float64Chunked::from_iter_options(
        angle_column.header().into(),
        values
            .into_iter()
            .map(|value| value.and_then(WindDirection::parse).map(|d| d.degrees())),
    )
    .into_series()
}
