//! Chart configuration, loadable from a JSON file.

use crate::error::ObsPlotError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scaling factor applied to wind speeds (km/h) when drawing quiver arrows:
/// a speed equal to the factor spans one day on the x axis.
pub const DEFAULT_ARROW_SCALE: f64 = 22.0;

/// Conversion specifiers that chrono and plotly's d3 time format read the same way.
const PORTABLE_SPECIFIERS: &str = "aAbBdeHIjmMpSUwWyY%";

/// Presentation settings for [`crate::WeatherChart`].
///
/// Every field has a default, so a JSON file only needs the fields it overrides:
///
/// ```
/// use obsplot::PlotConfig;
///
/// let config: PlotConfig = serde_json::from_str(r#"{ "arrow_scale": 30.0 }"#).unwrap();
/// assert_eq!(config.arrow_scale, 30.0);
/// assert_eq!(config.width, 1500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure title. Takes precedence over a title derived from the input file name.
    pub title: Option<String>,
    pub arrow_scale: f64,
    /// Figure width in pixels.
    pub width: usize,
    /// Figure height in pixels.
    pub height: usize,
    /// Format for date ticks. Formats the quiver labels with chrono and the
    /// date axes in the browser, so only specifiers both understand are accepted.
    pub date_tick_format: String,
    /// Tick label rotation in degrees, counter-clockwise.
    pub tick_angle: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: None,
            arrow_scale: DEFAULT_ARROW_SCALE,
            width: 1500,
            height: 2400,
            date_tick_format: "%m-%d".to_string(),
            tick_angle: 45.0,
        }
    }
}

impl PlotConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ObsPlotError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ObsPlotError::ConfigRead(path.to_path_buf(), e))?;
        let config: PlotConfig = serde_json::from_str(&contents)
            .map_err(|e| ObsPlotError::ConfigParse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would fail while rendering.
    pub fn validate(&self) -> Result<(), ObsPlotError> {
        if !(self.arrow_scale.is_finite() && self.arrow_scale > 0.0) {
            return Err(ObsPlotError::InvalidConfig(format!(
                "arrow_scale must be a positive number, got {}",
                self.arrow_scale
            )));
        }
        if StrftimeItems::new(&self.date_tick_format).any(|item| item == Item::Error) {
            return Err(ObsPlotError::InvalidConfig(format!(
                "date_tick_format '{}' is not a valid strftime format",
                self.date_tick_format
            )));
        }
        if !is_portable_date_format(&self.date_tick_format) {
            return Err(ObsPlotError::InvalidConfig(format!(
                "date_tick_format '{}' uses a specifier plotly cannot render",
                self.date_tick_format
            )));
        }
        Ok(())
    }
}

/// Accepts `%` specifiers from [`PORTABLE_SPECIFIERS`], optionally padded with `-`, `_` or `0`.
fn is_portable_date_format(format: &str) -> bool {
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let specifier = match chars.next() {
            Some('-' | '_' | '0') => chars.next(),
            other => other,
        };
        match specifier {
            Some(specifier) if PORTABLE_SPECIFIERS.contains(specifier) => {}
            _ => return false,
        }
    }
    true
}
