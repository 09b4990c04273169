//! The fixed stack of six panels drawn for a month of observations.

use crate::types::columns::ObservationColumn;

/// Line style of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dash,
    Dot,
}

/// How a panel draws its series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    Line,
    /// Bars drawn with the given opacity.
    Bar { opacity: f64 },
    /// Arrows built from an angle column and a speed column.
    Quiver {
        angle: ObservationColumn,
        speed: ObservationColumn,
    },
}

/// One plotted series: a column and its legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSeries {
    pub column: ObservationColumn,
    pub label: &'static str,
    pub style: LineStyle,
}

impl PanelSeries {
    const fn new(column: ObservationColumn, label: &'static str, style: LineStyle) -> Self {
        Self {
            column,
            label,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub y_title: &'static str,
    pub kind: PanelKind,
    /// Empty for quiver panels, which take their columns from [`PanelKind::Quiver`].
    pub series: Vec<PanelSeries>,
    /// Name used for the quiver trace.
    pub label: Option<&'static str>,
}

impl Panel {
    /// Every column this panel reads.
    pub fn columns(&self) -> Vec<ObservationColumn> {
        match self.kind {
            PanelKind::Quiver { angle, speed } => vec![angle, speed],
            _ => self.series.iter().map(|s| s.column).collect(),
        }
    }
}

/// Temperature, rainfall, wind speed, humidity, pressure and 9am wind direction, top to bottom.
pub fn standard_panels() -> Vec<Panel> {
    use LineStyle::*;
    use ObservationColumn::*;

    vec![
        Panel {
            y_title: "Temperature (°C)",
            kind: PanelKind::Line,
            series: vec![
                PanelSeries::new(MinTemperature, "Minimum Temperature (°C)", Solid),
                PanelSeries::new(MaxTemperature, "Maximum Temperature (°C)", Solid),
            ],
            label: None,
        },
        Panel {
            y_title: "Rainfall (mm)",
            kind: PanelKind::Bar { opacity: 0.5 },
            series: vec![PanelSeries::new(Rainfall, "Rainfall (mm)", Solid)],
            label: None,
        },
        Panel {
            y_title: "Wind Speed (km/h)",
            kind: PanelKind::Line,
            series: vec![
                PanelSeries::new(GustSpeed, "Max Wind Gust Speed (km/h)", Solid),
                PanelSeries::new(WindSpeed9am, "9am Wind Speed (km/h)", Dash),
                PanelSeries::new(WindSpeed3pm, "3pm Wind Speed (km/h)", Dot),
            ],
            label: None,
        },
        Panel {
            y_title: "Relative Humidity (%)",
            kind: PanelKind::Line,
            series: vec![
                PanelSeries::new(Humidity9am, "9am Relative Humidity (%)", Dash),
                PanelSeries::new(Humidity3pm, "3pm Relative Humidity (%)", Dot),
            ],
            label: None,
        },
        Panel {
            y_title: "MSL Pressure (hPa)",
            kind: PanelKind::Line,
            series: vec![
                PanelSeries::new(Pressure9am, "9am MSL Pressure (hPa)", Dash),
                PanelSeries::new(Pressure3pm, "3pm MSL Pressure (hPa)", Dot),
            ],
            label: None,
        },
        Panel {
            y_title: "Wind Direction (9am)",
            kind: PanelKind::Quiver {
                angle: WindAngle9am,
                speed: WindSpeed9am,
            },
            series: Vec::new(),
            label: Some("9am Wind Direction and Speed"),
        },
    ]
}
