use chrono::NaiveDate;
use serde::Serialize;

use super::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Date range predicate
// ---------------------------------------------------------------------------

/// Inclusive calendar-date range. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Full span of the dataset, or None when it has no rows.
    pub fn covering(dataset: &AirQualityDataset) -> Option<Self> {
        dataset
            .date_span
            .map(|(start, end)| DateRange { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Return indices of observations whose date falls within `range`.
///
/// Both ends are inclusive at day granularity, so every hour of the end date
/// is kept.
pub fn filtered_indices(dataset: &AirQualityDataset, range: &DateRange) -> Vec<usize> {
    dataset
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| range.contains(obs.date()))
        .map(|(i, _)| i)
        .collect()
}
