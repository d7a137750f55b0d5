use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Measured variables
// ---------------------------------------------------------------------------

/// Pollutant columns, in the order the source file lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column header in the CSV file.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }
}

/// Weather columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weather {
    #[serde(rename = "TEMP")]
    Temp,
    #[serde(rename = "PRES")]
    Pres,
    #[serde(rename = "DEWP")]
    Dewp,
    #[serde(rename = "WSPM")]
    Wspm,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Temp, Weather::Pres, Weather::Dewp, Weather::Wspm];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Temp => "TEMP",
            Weather::Pres => "PRES",
            Weather::Dewp => "DEWP",
            Weather::Wspm => "WSPM",
        }
    }
}

/// Either kind of numeric column; used where both appear side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Variable {
    Weather(Weather),
    Pollutant(Pollutant),
}

impl Variable {
    pub fn label(self) -> &'static str {
        match self {
            Variable::Weather(w) => w.label(),
            Variable::Pollutant(p) => p.label(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the source file
// ---------------------------------------------------------------------------

/// One timestamped measurement. Missing numeric cells are `NaN`.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(rename = "PM2.5")]
    pub pm25: f64,
    #[serde(rename = "PM10")]
    pub pm10: f64,
    #[serde(rename = "SO2")]
    pub so2: f64,
    #[serde(rename = "NO2")]
    pub no2: f64,
    #[serde(rename = "CO")]
    pub co: f64,
    #[serde(rename = "O3")]
    pub o3: f64,
    #[serde(rename = "TEMP")]
    pub temp: f64,
    #[serde(rename = "PRES")]
    pub pres: f64,
    #[serde(rename = "DEWP")]
    pub dewp: f64,
    #[serde(rename = "WSPM")]
    pub wspm: f64,
    #[serde(rename = "Air Quality")]
    pub air_quality: String,
}

impl Observation {
    pub fn pollutant(&self, p: Pollutant) -> f64 {
        match p {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    pub fn weather(&self, w: Weather) -> f64 {
        match w {
            Weather::Temp => self.temp,
            Weather::Pres => self.pres,
            Weather::Dewp => self.dewp,
            Weather::Wspm => self.wspm,
        }
    }

    pub fn value(&self, v: Variable) -> f64 {
        match v {
            Variable::Weather(w) => self.weather(w),
            Variable::Pollutant(p) => self.pollutant(p),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ---------------------------------------------------------------------------
// AirQualityDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset plus its date span.
#[derive(Debug, Clone)]
pub struct AirQualityDataset {
    /// All observations, in file order.
    pub observations: Vec<Observation>,
    /// Earliest and latest observation date (None when empty).
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl AirQualityDataset {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let date_span = observations.iter().map(Observation::date).fold(None, |span, d| {
            Some(match span {
                None => (d, d),
                Some((lo, hi)) => (d.min(lo), d.max(hi)),
            })
        });
        AirQualityDataset {
            observations,
            date_span,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Resolve a list of row indices into observation references.
    pub fn rows<'a>(&'a self, indices: &[usize]) -> Vec<&'a Observation> {
        indices
            .iter()
            .filter_map(|&i| self.observations.get(i))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an observation with every pollutant set to `level` and weather zeroed.
    pub fn observation(date: (i32, u32, u32), hour: u32, level: f64) -> Observation {
        let (year, month, day) = date;
        let timestamp = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap();
        Observation {
            timestamp,
            year,
            month,
            day,
            station: None,
            pm25: level,
            pm10: level,
            so2: level,
            no2: level,
            co: level,
            o3: level,
            temp: 0.0,
            pres: 0.0,
            dewp: 0.0,
            wspm: 0.0,
            air_quality: "Good".to_string(),
        }
    }

    #[test]
    fn date_span_covers_min_and_max() {
        let ds = AirQualityDataset::from_observations(vec![
            observation((2013, 5, 2), 0, 1.0),
            observation((2013, 3, 1), 23, 1.0),
            observation((2014, 1, 9), 4, 1.0),
        ]);
        let (lo, hi) = ds.date_span.unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2013, 3, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2014, 1, 9).unwrap());
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = AirQualityDataset::from_observations(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.date_span.is_none());
    }

    #[test]
    fn value_dispatches_by_variable() {
        let mut obs = observation((2013, 3, 1), 0, 2.0);
        obs.pres = 1015.0;
        assert_eq!(obs.value(Variable::Weather(Weather::Pres)), 1015.0);
        assert_eq!(obs.value(Variable::Pollutant(Pollutant::O3)), 2.0);
    }
}
