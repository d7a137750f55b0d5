use serde::Serialize;

use super::stats::pearson;
use crate::data::model::{AirQualityDataset, Weather};

/// Label treated as the positive class unless configured otherwise.
pub const DEFAULT_POOR_LABEL: &str = "Poor";

/// Correlation of one weather field with the poor-air-quality indicator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeatherCorrelation {
    pub feature: Weather,
    pub correlation: f64,
}

/// One entry per [`Weather::ALL`] field, always in that order.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherImpact {
    pub poor_label: String,
    pub correlations: Vec<WeatherCorrelation>,
}

/// Static reading notes shown under the bar chart.
pub const INTERPRETATION: [(&str, &str); 4] = [
    (
        "Temperature (TEMP)",
        "If the correlation is high, this means that temperature fluctuations are associated with changes in air quality.",
    ),
    (
        "Pressure (PRES)",
        "Similarly, pressure can play a role in atmospheric stability, impacting pollution dispersion.",
    ),
    (
        "Dew Point (DEWP)",
        "Dew point indicates moisture in the air, and high moisture can affect pollution accumulation.",
    ),
    (
        "Wind Speed (WSPM)",
        "Wind speed influences the dispersion of pollutants. High wind speeds tend to disperse pollutants, while low wind speeds can result in poor air quality.",
    ),
];

/// Correlate each weather field with a 0/1 target that is 1 when the
/// air-quality label equals `poor_label`.
///
/// Runs over the whole dataset, not the date-filtered subset.
pub fn weather_impact(dataset: &AirQualityDataset, poor_label: &str) -> WeatherImpact {
    let target: Vec<f64> = dataset
        .observations
        .iter()
        .map(|obs| if obs.air_quality == poor_label { 1.0 } else { 0.0 })
        .collect();

    let correlations = Weather::ALL
        .iter()
        .map(|&feature| WeatherCorrelation {
            feature,
            correlation: pearson(
                dataset
                    .observations
                    .iter()
                    .zip(&target)
                    .map(|(obs, &t)| (obs.weather(feature), t)),
            ),
        })
        .collect();

    WeatherImpact {
        poor_label: poor_label.to_string(),
        correlations,
    }
}
