use serde::Serialize;

use super::correlation::{correlation_matrix, CorrelationMatrix, MATRIX_VARIABLES};
use super::peak_hour::{hourly_profile, HourlyProfile};
use super::seasonal::{monthly_averages, MonthlyAverage};
use super::weather_impact::{weather_impact, WeatherImpact};
use crate::data::filter::{filtered_indices, DateRange};
use crate::data::model::{AirQualityDataset, Observation};

/// Rows shown in the dataset overview table.
pub const OVERVIEW_ROWS: usize = 5;

/// Every derived view for one `(dataset, date range)` pair.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    pub total_rows: usize,
    pub row_count: usize,
    /// Indices of the rows inside `range`; not part of the JSON summary.
    #[serde(skip)]
    pub indices: Vec<usize>,
    pub overview: Vec<Observation>,
    pub correlation: CorrelationMatrix,
    pub monthly: Vec<MonthlyAverage>,
    pub hourly: HourlyProfile,
    pub weather_impact: WeatherImpact,
}

impl DashboardReport {
    /// Recompute all views. Pure: the same inputs always give the same report.
    pub fn compute(dataset: &AirQualityDataset, range: DateRange, poor_label: &str) -> Self {
        let indices = filtered_indices(dataset, &range);
        let rows = dataset.rows(&indices);
        log::debug!(
            "Computing report for {}..={} ({} of {} rows)",
            range.start,
            range.end,
            rows.len(),
            dataset.len()
        );
        if rows.is_empty() {
            log::warn!("No observations between {} and {}", range.start, range.end);
        }

        DashboardReport {
            range,
            total_rows: dataset.len(),
            row_count: rows.len(),
            overview: rows.iter().take(OVERVIEW_ROWS).map(|&obs| obs.clone()).collect(),
            correlation: correlation_matrix(&rows, &MATRIX_VARIABLES),
            monthly: monthly_averages(&rows),
            hourly: hourly_profile(&rows),
            weather_impact: weather_impact(dataset, poor_label),
            indices,
        }
    }

    /// Resolve the filtered indices back into observations.
    pub fn rows<'a>(&self, dataset: &'a AirQualityDataset) -> Vec<&'a Observation> {
        dataset.rows(&self.indices)
    }
}
