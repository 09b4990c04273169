use chrono::{Datelike, NaiveDate};
use clap::Parser;
use log::info;
use obsplot::{DailyObservations, ObsPlotError, PlotConfig, WeatherChart};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Render a month of daily weather observations as six stacked charts.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Daily observations CSV (Bureau of Meteorology layout).
    input: PathBuf,

    /// Where to write the HTML chart. Defaults to the input path with an .html extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Figure title. Overrides the title from --config.
    #[arg(short, long)]
    title: Option<String>,

    /// JSON file with chart settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First day to plot (YYYY-MM-DD), inclusive.
    #[arg(long, value_parser = parse_day)]
    from: Option<NaiveDate>,

    /// Last day to plot (YYYY-MM-DD), inclusive.
    #[arg(long, value_parser = parse_day)]
    to: Option<NaiveDate>,

    /// Only plot this month (YYYY-MM).
    #[arg(long, value_parser = parse_month, conflicts_with_all = ["from", "to"])]
    month: Option<YearMonth>,

    /// Open the chart in a browser instead of writing it to disk.
    #[arg(long, conflicts_with = "output")]
    show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearMonth {
    year: i32,
    month: u32,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value}: {e}"))
}

fn parse_month(value: &str) -> Result<YearMonth, String> {
    let day = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|e| format!("{value}: expected YYYY-MM ({e})"))?;
    Ok(YearMonth {
        year: day.year(),
        month: day.month(),
    })
}

fn default_title(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    format!("Daily Weather Observations ({stem})")
}

fn run(cli: Cli) -> Result<(), ObsPlotError> {
    let config = match &cli.config {
        Some(path) => PlotConfig::from_json_file(path)?,
        None => PlotConfig::default(),
    };

    let mut observations = DailyObservations::from_csv_path(&cli.input)?;
    if let Some(YearMonth { year, month }) = cli.month {
        observations = observations.get_for_month(year, month)?;
    } else if cli.from.is_some() || cli.to.is_some() {
        let dates = observations.dates()?;
        let start = cli.from.or_else(|| dates.iter().min().copied());
        let end = cli.to.or_else(|| dates.iter().max().copied());
        if let (Some(start), Some(end)) = (start, end) {
            observations = observations.get_range(start, end)?;
        }
    }
    info!("Plotting {} days", observations.len());

    let title = cli
        .title
        .or_else(|| config.title.clone())
        .unwrap_or_else(|| default_title(&cli.input));
    let chart = WeatherChart::builder().title(title).config(config).build();

    if cli.show {
        chart.show(&observations)?;
    } else {
        let output = cli
            .output
            .unwrap_or_else(|| cli.input.with_extension("html"));
        chart.write_html(&observations, &output)?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-03"),
            Ok(YearMonth {
                year: 2024,
                month: 3
            })
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_month_conflicts_with_range() {
        let result = Cli::try_parse_from([
            "obsplot",
            "in.csv",
            "--month",
            "2024-03",
            "--from",
            "2024-03-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_conflicts_with_output() {
        let result = Cli::try_parse_from(["obsplot", "in.csv", "--show", "-o", "out.html"]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["obsplot", "in.csv", "--show"]).is_ok());
    }

    #[test]
    fn test_default_title_uses_file_stem() {
        assert_eq!(
            default_title(Path::new("data/IDCJDW2037.202403.csv")),
            "Daily Weather Observations (IDCJDW2037.202403)"
        );
    }
}
