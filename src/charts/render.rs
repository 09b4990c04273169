//! Assembles the six stacked panels into a single plotly figure.

use crate::charts::error::ChartError;
use crate::charts::panels::{standard_panels, LineStyle, Panel, PanelKind};
use crate::charts::quiver;
use crate::config::PlotConfig;
use crate::observations::frame::DailyObservations;
use crate::types::columns::ObservationColumn;
use bon::bon;
use log::{debug, info, warn};
use plotly::color::Rgba;
use plotly::common::{DashType, Line, Mode, TickMode};
use plotly::layout::{Axis, AxisType, GridPattern, Layout, LayoutGrid, RowOrder};
use plotly::{Bar, Plot, Scatter};
use std::path::Path;

const ONE_DAY_MS: f64 = 86_400_000.0;

/// Renders [`DailyObservations`] as six vertically stacked charts sharing the same days.
///
/// # Examples
///
/// ```no_run
/// use obsplot::{DailyObservations, WeatherChart};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let observations = DailyObservations::from_csv_path("IDCJDW2037.202403.csv")?;
/// let chart = WeatherChart::builder()
///     .title("Daily Weather Observations for Cowra, NSW (March 2024)")
///     .build();
/// chart.write_html(&observations, "cowra-2024-03.html")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherChart {
    title: String,
    config: PlotConfig,
    panels: Vec<Panel>,
}

#[bon]
impl WeatherChart {
    #[builder]
    pub fn new(#[builder(into)] title: String, #[builder(default)] config: PlotConfig) -> Self {
        Self {
            title,
            config,
            panels: standard_panels(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Builds the figure.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NoObservations`] when there are no rows to plot.
    pub fn build_plot(&self, observations: &DailyObservations) -> Result<Plot, ChartError> {
        if observations.is_empty() {
            return Err(ChartError::NoObservations);
        }
        let dates = observations.dates()?;
        let day_labels: Vec<String> = dates
            .iter()
            .map(|d| d.format(&self.config.date_tick_format).to_string())
            .collect();
        let x_dates: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

        let mut plot = Plot::new();
        let mut layout = Layout::new()
            .title(self.title.as_str())
            .width(self.config.width)
            .height(self.config.height)
            .grid(
                LayoutGrid::new()
                    .rows(self.panels.len())
                    .columns(1)
                    .pattern(GridPattern::Independent)
                    .row_order(RowOrder::TopToBottom),
            );

        for (index, panel) in self.panels.iter().enumerate() {
            let (x_id, y_id) = axis_ids(index);
            if let PanelKind::Quiver { angle, speed } = panel.kind {
                self.add_quiver(&mut plot, observations, panel, (angle, speed), (&x_id, &y_id));
                layout = set_axes(
                    layout,
                    index,
                    self.index_axis(&day_labels),
                    self.quiver_y_axis(panel),
                );
                continue;
            }

            for series in &panel.series {
                let Some(values) = observations.values(series.column) else {
                    warn!("Column '{}' not found, skipping '{}'", series.column, series.label);
                    continue;
                };
                match panel.kind {
                    PanelKind::Bar { opacity } => plot.add_trace(
                        Bar::new(x_dates.clone(), values)
                            .name(series.label)
                            .opacity(opacity)
                            .x_axis(x_id.as_str())
                            .y_axis(y_id.as_str()),
                    ),
                    _ => plot.add_trace(
                        Scatter::new(x_dates.clone(), values)
                            .name(series.label)
                            .mode(Mode::Lines)
                            .line(Line::new().dash(dash_type(series.style)))
                            .x_axis(x_id.as_str())
                            .y_axis(y_id.as_str()),
                    ),
                }
            }
            layout = set_axes(layout, index, self.date_axis(), Axis::new().title(panel.y_title));
        }

        plot.set_layout(layout);
        Ok(plot)
    }

    /// Renders the figure as a standalone HTML document.
    pub fn to_html(&self, observations: &DailyObservations) -> Result<String, ChartError> {
        Ok(self.build_plot(observations)?.to_html())
    }

    /// Renders the figure as plotly JSON.
    pub fn to_json(&self, observations: &DailyObservations) -> Result<String, ChartError> {
        Ok(self.build_plot(observations)?.to_json())
    }

    pub fn write_html(
        &self,
        observations: &DailyObservations,
        path: impl AsRef<Path>,
    ) -> Result<(), ChartError> {
        let path = path.as_ref();
        let html = self.to_html(observations)?;
        std::fs::write(path, html).map_err(|e| ChartError::OutputWrite(path.to_path_buf(), e))?;
        info!("Wrote chart to {}", path.display());
        Ok(())
    }

    /// Opens the figure in the default browser.
    pub fn show(&self, observations: &DailyObservations) -> Result<(), ChartError> {
        self.build_plot(observations)?.show();
        Ok(())
    }

    fn add_quiver(
        &self,
        plot: &mut Plot,
        observations: &DailyObservations,
        panel: &Panel,
        (angle, speed): (ObservationColumn, ObservationColumn),
        (x_id, y_id): (&str, &str),
    ) {
        let (Some(angles), Some(speeds)) = (observations.values(angle), observations.values(speed))
        else {
            warn!("Skipping wind arrows: missing '{}' or '{}'", angle, speed);
            return;
        };
        let arrows = quiver::arrows(&angles, &speeds, self.config.arrow_scale);
        debug!("Drawing {} wind arrows", arrows.len());
        let (xs, ys) = quiver::polyline(&arrows);
        plot.add_trace(
            Scatter::new(xs, ys)
                .name(panel.label.unwrap_or(panel.y_title))
                .mode(Mode::Lines)
                .connect_gaps(false)
                .line(Line::new().color(Rgba::new(0, 0, 255, 0.7)).width(1.5))
                .x_axis(x_id)
                .y_axis(y_id),
        );
    }

    fn date_axis(&self) -> Axis {
        Axis::new()
            .type_(AxisType::Date)
            .tick_format(self.config.date_tick_format.as_str())
            .dtick(ONE_DAY_MS)
            .tick_angle(-self.config.tick_angle)
    }

    /// Axis with one tick per row, labelled with the row's date.
    fn index_axis(&self, day_labels: &[String]) -> Axis {
        let last = day_labels.len().saturating_sub(1) as f64;
        Axis::new()
            .tick_mode(TickMode::Array)
            .tick_values((0..day_labels.len()).map(|i| i as f64).collect())
            .tick_text(day_labels.to_vec())
            .tick_angle(-self.config.tick_angle)
            .range(vec![-0.5, last + 0.5])
    }

    fn quiver_y_axis(&self, panel: &Panel) -> Axis {
        Axis::new()
            .title(panel.y_title)
            .range(vec![-1.0, 1.0])
            .zero_line(true)
    }
}

fn dash_type(style: LineStyle) -> DashType {
    match style {
        LineStyle::Solid => DashType::Solid,
        LineStyle::Dash => DashType::Dash,
        LineStyle::Dot => DashType::Dot,
    }
}

/// Trace axis references for the panel at `index`; the first panel uses the bare `x`/`y`.
fn axis_ids(index: usize) -> (String, String) {
    if index == 0 {
        ("x".to_string(), "y".to_string())
    } else {
        (format!("x{}", index + 1), format!("y{}", index + 1))
    }
}

fn set_axes(layout: Layout, index: usize, x: Axis, y: Axis) -> Layout {
    match index {
        0 => layout.x_axis(x).y_axis(y),
        1 => layout.x_axis2(x).y_axis2(y),
        2 => layout.x_axis3(x).y_axis3(y),
        3 => layout.x_axis4(x).y_axis4(y),
        4 => layout.x_axis5(x).y_axis5(y),
        5 => layout.x_axis6(x).y_axis6(y),
        6 => layout.x_axis7(x).y_axis7(y),
        7 => layout.x_axis8(x).y_axis8(y),
        _ => {
            warn!("No layout axis for panel {}", index);
            layout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONTH: &str = "Date,Minimum temperature (°C),Maximum temperature (°C),Rainfall (mm),Speed of maximum wind gust (km/h),9am relative humidity (%),9am wind direction,9am wind speed (km/h),9am MSL pressure (hPa),3pm relative humidity (%),3pm wind speed (km/h),3pm MSL pressure (hPa)\n\
2024-03-01,12.1,27.4,0,39,71,NNE,13,1016.2,38,20,1012.9\n\
2024-03-02,14.0,29.9,3.2,46,65,Calm,Calm,1014.0,33,17,1011.1\n\
2024-03-03,11.5,24.3,0.2,31,80,SW,9,1019.8,45,11,1017.4\n";

    fn observations() -> DailyObservations {
        DailyObservations::from_csv_bytes(MONTH.as_bytes(), "memory").unwrap()
    }

    fn chart() -> WeatherChart {
        WeatherChart::builder().title("Cowra, March 2024").build()
    }

    #[test]
    fn test_axis_ids() {
        assert_eq!(axis_ids(0), ("x".to_string(), "y".to_string()));
        assert_eq!(axis_ids(5), ("x6".to_string(), "y6".to_string()));
    }

    #[test]
    fn test_builder_defaults() {
        let chart = chart();
        assert_eq!(chart.title(), "Cowra, March 2024");
        assert_eq!(chart.config(), &PlotConfig::default());
    }

    #[test]
    fn test_json_contains_every_panel() -> Result<(), ChartError> {
        let json = chart().to_json(&observations())?;
        for axis in ["yaxis", "yaxis2", "yaxis3", "yaxis4", "yaxis5", "yaxis6"] {
            assert!(json.contains(&format!("\"{}\"", axis)), "missing {}", axis);
        }
        for label in [
            "Minimum Temperature (°C)",
            "Rainfall (mm)",
            "Max Wind Gust Speed (km/h)",
            "3pm Relative Humidity (%)",
            "9am MSL Pressure (hPa)",
            "9am Wind Direction and Speed",
        ] {
            assert!(json.contains(label), "missing trace {}", label);
        }
        assert!(json.contains("Cowra, March 2024"));
        assert!(json.contains("2024-03-02"));
        Ok(())
    }

    #[test]
    fn test_panel_styling() -> Result<(), ChartError> {
        let json = chart().to_json(&observations())?;
        assert!(json.contains("\"opacity\":0.5"), "rainfall bar opacity");
        assert!(json.contains("\"dash\":\"dash\""));
        assert!(json.contains("\"dash\":\"dot\""));
        assert!(json.contains("\"range\":[-1.0,1.0]"), "quiver y range");
        assert!(json.contains("\"width\":1500"));
        assert!(json.contains("\"height\":2400"));
        assert!(json.contains("\"tickangle\":-45.0"));
        assert!(json.contains("\"tickformat\":\"%m-%d\""));
        Ok(())
    }

    #[test]
    fn test_config_overrides_size() -> Result<(), ChartError> {
        let config = PlotConfig {
            width: 900,
            height: 1200,
            ..PlotConfig::default()
        };
        let json = WeatherChart::builder()
            .title("Cowra")
            .config(config)
            .build()
            .to_json(&observations())?;
        assert!(json.contains("\"width\":900"));
        assert!(json.contains("\"height\":1200"));
        Ok(())
    }

    #[test]
    fn test_unsorted_rows_keep_file_order() -> Result<(), ChartError> {
        let observations = DailyObservations::from_csv_bytes(
            b"Date,Rainfall (mm)\n2024-03-02,5.0\n2024-03-01,1.0\n",
            "memory",
        )?;
        let json = chart().to_json(&observations)?;
        let later = json.find("2024-03-02").unwrap();
        let earlier = json.find("2024-03-01").unwrap();
        assert!(later < earlier);
        Ok(())
    }

    #[test]
    fn test_missing_columns_are_skipped() -> Result<(), ChartError> {
        let observations = DailyObservations::from_csv_bytes(
            b"Date,Rainfall (mm)\n2024-03-01,1.0\n2024-03-02,0\n",
            "memory",
        )?;
        let plot = chart().build_plot(&observations)?;
        let json = plot.to_json();
        assert!(json.contains("Rainfall (mm)"));
        assert!(!json.contains("Max Wind Gust Speed (km/h)"));
        assert!(!json.contains("9am Wind Direction and Speed"));
        Ok(())
    }

    #[test]
    fn test_empty_observations_are_rejected() -> Result<(), ChartError> {
        let observations =
            DailyObservations::from_csv_bytes(b"Date,Rainfall (mm)\nsoon,1.0\n", "memory")?;
        assert!(matches!(
            chart().build_plot(&observations),
            Err(ChartError::NoObservations)
        ));
        Ok(())
    }

    #[test]
    fn test_write_html() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("chart.html");
        chart().write_html(&observations(), &path)?;
        let html = std::fs::read_to_string(&path)?;
        assert!(html.contains("Cowra, March 2024"));
        Ok(())
    }

    #[test]
    fn test_write_html_to_missing_directory() {
        let result = chart().write_html(&observations(), "/no/such/dir/chart.html");
        assert!(matches!(result, Err(ChartError::OutputWrite(_, _))));
    }
}
