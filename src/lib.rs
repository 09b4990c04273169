mod charts;
mod config;
mod error;
mod observations;
mod types;

pub use config::{PlotConfig, DEFAULT_ARROW_SCALE};
pub use error::ObsPlotError;

pub use charts::error::ChartError;
pub use charts::panels::{standard_panels, LineStyle, Panel, PanelKind, PanelSeries};
pub use charts::quiver::{arrows, polyline, Arrow};
pub use charts::render::WeatherChart;

pub use observations::cleaning::{clean_observations, parse_date, parse_numeric};
pub use observations::error::ObservationError;
pub use observations::frame::DailyObservations;
pub use observations::loader::ObservationLoader;

pub use types::columns::{ColumnKind, ObservationColumn};
pub use types::compass::{CompassPoint, WindDirection, CALM_TOKEN};
