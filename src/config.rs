use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::analysis::weather_impact::DEFAULT_POOR_LABEL;

/// Air quality and weather conditions dashboard.
#[derive(Parser, Debug, Clone)]
#[command(name = "aq-dashboard", version, about)]
pub struct Args {
    /// CSV file with hourly air-quality and weather observations
    #[arg(value_name = "PATH", env = "AQ_DATA", default_value = "all_data.csv")]
    pub data: PathBuf,

    /// First day of the initial date range (YYYY-MM-DD); defaults to the earliest date
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the initial date range (YYYY-MM-DD); defaults to the latest date
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Air Quality label counted as a poor day
    #[arg(long, default_value = DEFAULT_POOR_LABEL)]
    pub poor_label: String,

    /// Print the analysis report as JSON and exit instead of opening a window
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["aq-dashboard"]).unwrap();
        assert_eq!(args.poor_label, "Poor");
        assert!(!args.summary);
        assert!(args.start.is_none());
    }

    #[test]
    fn parses_dates_and_path() {
        let args = Args::try_parse_from([
            "aq-dashboard",
            "data/stations.csv",
            "--start",
            "2013-03-01",
            "--end",
            "2013-06-30",
            "--summary",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("data/stations.csv"));
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2013, 3, 1));
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2013, 6, 30));
        assert!(args.summary);
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Args::try_parse_from(["aq-dashboard", "--start", "2013-13-01"]).is_err());
    }
}
