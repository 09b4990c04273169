//! Defines the columns found in daily weather observation files and how their
//! headers are recognised.

use std::fmt;

/// How a column is treated by the cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// The observation date, parsed into a polars `Date`.
    Date,
    /// Coerced to `f64`, with unparseable values becoming null.
    Numeric,
    /// A compass label, left as text but used to derive an [`ColumnKind::Angle`] column.
    Direction,
    /// Kept as text.
    Text,
    /// Derived from a direction column during cleaning.
    Angle,
}

/// A column of a daily weather observations file.
///
/// Headers are matched loosely (see [`ObservationColumn::from_header`]) so that
/// files using `(C)` instead of `(°C)`, or decoded with the wrong character set,
/// still resolve to the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationColumn {
    Date,
    MinTemperature,
    MaxTemperature,
    Rainfall,
    Evaporation,
    Sunshine,
    GustDirection,
    GustSpeed,
    GustTime,
    Temperature9am,
    Humidity9am,
    Cloud9am,
    WindDirection9am,
    WindSpeed9am,
    Pressure9am,
    Temperature3pm,
    Humidity3pm,
    Cloud3pm,
    WindDirection3pm,
    WindSpeed3pm,
    Pressure3pm,
    WindAngle9am,
    WindAngle3pm,
    GustAngle,
}

impl ObservationColumn {
    pub const ALL: [ObservationColumn; 24] = [
        ObservationColumn::Date,
        ObservationColumn::MinTemperature,
        ObservationColumn::MaxTemperature,
        ObservationColumn::Rainfall,
        ObservationColumn::Evaporation,
        ObservationColumn::Sunshine,
        ObservationColumn::GustDirection,
        ObservationColumn::GustSpeed,
        ObservationColumn::GustTime,
        ObservationColumn::Temperature9am,
        ObservationColumn::Humidity9am,
        ObservationColumn::Cloud9am,
        ObservationColumn::WindDirection9am,
        ObservationColumn::WindSpeed9am,
        ObservationColumn::Pressure9am,
        ObservationColumn::Temperature3pm,
        ObservationColumn::Humidity3pm,
        ObservationColumn::Cloud3pm,
        ObservationColumn::WindDirection3pm,
        ObservationColumn::WindSpeed3pm,
        ObservationColumn::Pressure3pm,
        ObservationColumn::WindAngle9am,
        ObservationColumn::WindAngle3pm,
        ObservationColumn::GustAngle,
    ];

    /// The canonical header name, as used for the column in a cleaned frame.
    pub fn header(&self) -> &'static str {
        match self {
            ObservationColumn::Date => "Date",
            ObservationColumn::MinTemperature => "Minimum temperature (°C)",
            ObservationColumn::MaxTemperature => "Maximum temperature (°C)",
            ObservationColumn::Rainfall => "Rainfall (mm)",
            ObservationColumn::Evaporation => "Evaporation (mm)",
            ObservationColumn::Sunshine => "Sunshine (hours)",
            ObservationColumn::GustDirection => "Direction of maximum wind gust",
            ObservationColumn::GustSpeed => "Speed of maximum wind gust (km/h)",
            ObservationColumn::GustTime => "Time of maximum wind gust",
            ObservationColumn::Temperature9am => "9am Temperature (°C)",
            ObservationColumn::Humidity9am => "9am relative humidity (%)",
            ObservationColumn::Cloud9am => "9am cloud amount (oktas)",
            ObservationColumn::WindDirection9am => "9am wind direction",
            ObservationColumn::WindSpeed9am => "9am wind speed (km/h)",
            ObservationColumn::Pressure9am => "9am MSL pressure (hPa)",
            ObservationColumn::Temperature3pm => "3pm Temperature (°C)",
            ObservationColumn::Humidity3pm => "3pm relative humidity (%)",
            ObservationColumn::Cloud3pm => "3pm cloud amount (oktas)",
            ObservationColumn::WindDirection3pm => "3pm wind direction",
            ObservationColumn::WindSpeed3pm => "3pm wind speed (km/h)",
            ObservationColumn::Pressure3pm => "3pm MSL pressure (hPa)",
            ObservationColumn::WindAngle9am => "9am wind angle",
            ObservationColumn::WindAngle3pm => "3pm wind angle",
            ObservationColumn::GustAngle => "Max wind gust angle",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ObservationColumn::Date => ColumnKind::Date,
            ObservationColumn::GustDirection
            | ObservationColumn::WindDirection9am
            | ObservationColumn::WindDirection3pm => ColumnKind::Direction,
            ObservationColumn::GustTime => ColumnKind::Text,
            ObservationColumn::WindAngle9am
            | ObservationColumn::WindAngle3pm
            | ObservationColumn::GustAngle => ColumnKind::Angle,
            _ => ColumnKind::Numeric,
        }
    }

    /// For a direction column, the angle column derived from it.
    pub fn angle_column(&self) -> Option<ObservationColumn> {
        match self {
            ObservationColumn::WindDirection9am => Some(ObservationColumn::WindAngle9am),
            ObservationColumn::WindDirection3pm => Some(ObservationColumn::WindAngle3pm),
            ObservationColumn::GustDirection => Some(ObservationColumn::GustAngle),
            _ => None,
        }
    }

    /// Resolves a raw header to a known column.
    ///
    /// # Examples
    ///
    /// ```
    /// use obsplot::ObservationColumn;
    ///
    /// let column = ObservationColumn::from_header("Minimum temperature (C)");
    /// assert_eq!(column, Some(ObservationColumn::MinTemperature));
    /// assert_eq!(ObservationColumn::from_header("Station name"), None);
    /// ```
    pub fn from_header(header: &str) -> Option<Self> {
        let key = header_key(header);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|column| header_key(column.header()) == key)
    }
}

impl fmt::Display for ObservationColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Lower-cases and drops everything but ASCII alphanumerics and `(`, `)`, `%`,
/// so that unit spellings like `°C`, `C` and `Â°C` compare equal.
fn header_key(header: &str) -> String {
    header
        .trim()
        .trim_matches('"')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | '%'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
