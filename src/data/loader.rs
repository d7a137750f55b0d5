use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::error::DataError;
use super::model::{AirQualityDataset, Observation};

/// Headers that must be present; anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "No",
    "year",
    "month",
    "day",
    "hour",
    "PM2.5",
    "PM10",
    "SO2",
    "NO2",
    "CO",
    "O3",
    "TEMP",
    "PRES",
    "DEWP",
    "WSPM",
    "Air Quality",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an air-quality dataset from a CSV file.
///
/// Each record becomes one [`Observation`] whose timestamp combines the
/// `year`, `month`, `day` and `hour` columns. `No` and `hour` are not kept.
pub fn load_file(path: &Path) -> Result<AirQualityDataset> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    load_reader(reader)
}

/// Load from any CSV reader. Split out so tests can feed in-memory text.
pub fn load_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<AirQualityDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required.to_string()).into());
        }
    }

    let mut observations = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let timestamp = raw.timestamp(row_no)?;
        observations.push(raw.into_observation(timestamp));
    }

    Ok(AirQualityDataset::from_observations(observations))
}

// ---------------------------------------------------------------------------
// Record layout
// ---------------------------------------------------------------------------

/// One CSV record as written on disk.
#[derive(Debug, Deserialize)]
struct RawRecord {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    #[serde(default)]
    station: Option<String>,
    #[serde(rename = "PM2.5", deserialize_with = "lenient_f64")]
    pm25: f64,
    #[serde(rename = "PM10", deserialize_with = "lenient_f64")]
    pm10: f64,
    #[serde(rename = "SO2", deserialize_with = "lenient_f64")]
    so2: f64,
    #[serde(rename = "NO2", deserialize_with = "lenient_f64")]
    no2: f64,
    #[serde(rename = "CO", deserialize_with = "lenient_f64")]
    co: f64,
    #[serde(rename = "O3", deserialize_with = "lenient_f64")]
    o3: f64,
    #[serde(rename = "TEMP", deserialize_with = "lenient_f64")]
    temp: f64,
    #[serde(rename = "PRES", deserialize_with = "lenient_f64")]
    pres: f64,
    #[serde(rename = "DEWP", deserialize_with = "lenient_f64")]
    dewp: f64,
    #[serde(rename = "WSPM", deserialize_with = "lenient_f64")]
    wspm: f64,
    #[serde(rename = "Air Quality")]
    air_quality: String,
}

impl RawRecord {
    fn timestamp(&self, row: usize) -> Result<NaiveDateTime, DataError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, 0, 0))
            .ok_or(DataError::InvalidTimestamp {
                row,
                year: self.year,
                month: self.month,
                day: self.day,
                hour: self.hour,
            })
    }

    fn into_observation(self, timestamp: NaiveDateTime) -> Observation {
        Observation {
            timestamp,
            year: self.year,
            month: self.month,
            day: self.day,
            station: self.station.filter(|s| !s.is_empty()),
            pm25: self.pm25,
            pm10: self.pm10,
            so2: self.so2,
            no2: self.no2,
            co: self.co,
            o3: self.o3,
            temp: self.temp,
            pres: self.pres,
            dewp: self.dewp,
            wspm: self.wspm,
            air_quality: self.air_quality,
        }
    }
}

/// Numeric cell where empty, `NA` and `NaN` mean "missing".
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,Air Quality";

    fn from_text(text: &str) -> Result<AirQualityDataset> {
        load_reader(csv::Reader::from_reader(text.as_bytes()))
    }

    #[test]
    fn loads_one_observation_per_record() {
        let text = format!(
            "{HEADER}\n\
             1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin,Good\n\
             2,2013,3,1,1,8,8,4,7,300,77,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin,Good\n\
             3,2013,3,1,2,NA,,5,10,300,73,-1.1,1023.5,-18.2,0,NNW,5.6,Aotizhongxin,Poor\n"
        );
        let ds = from_text(&text).unwrap();
        assert_eq!(ds.len(), 3);

        let third = &ds.observations[2];
        assert_eq!(
            third.timestamp,
            NaiveDate::from_ymd_opt(2013, 3, 1).unwrap().and_hms_opt(2, 0, 0).unwrap()
        );
        assert!(third.pm25.is_nan());
        assert!(third.pm10.is_nan());
        assert_eq!(third.so2, 5.0);
        assert_eq!(third.air_quality, "Poor");
        assert_eq!(third.station.as_deref(), Some("Aotizhongxin"));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "No,year,month,day,hour,PM2.5\n1,2013,3,1,0,4\n";
        let err = from_text(text).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::MissingColumn("PM10".to_string()))
        );
    }

    #[test]
    fn invalid_date_fails_with_row_number() {
        let text = format!("{HEADER}\n1,2013,2,30,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,Good\n");
        let err = from_text(&text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InvalidTimestamp { row: 0, month: 2, day: 30, .. })
        ));
    }

    #[test]
    fn hour_out_of_range_is_invalid() {
        let text = format!("{HEADER}\n1,2013,3,1,24,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,Good\n");
        assert!(from_text(&text).is_err());
    }

    #[test]
    fn malformed_number_is_an_error() {
        let text = format!("{HEADER}\n1,2013,3,1,0,abc,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,A,Good\n");
        let err = from_text(&text).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn station_column_is_optional() {
        let text = "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,WSPM,Air Quality\n\
                    1,2013,3,1,5,10,10,1,1,1,1,1,1,1,1,Good\n";
        let ds = from_text(text).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(ds.observations[0].station.is_none());
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,2014,12,31,23,1,2,3,4,5,6,7,8,9,0,N,1.5,B,Good").unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.observations[0].o3, 6.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/tmp/does-not-exist-aq-dashboard.csv")).is_err());
    }
}
