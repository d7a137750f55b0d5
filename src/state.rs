use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::analysis::report::DashboardReport;
use crate::data::cache;
use crate::data::filter::DateRange;
use crate::data::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Path of the currently loaded file.
    pub data_path: PathBuf,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<AirQualityDataset>>,

    /// Selected inclusive date range.
    pub range: Option<DateRange>,

    /// Views for the current (dataset, range); rebuilt only when either changes.
    pub report: Option<DashboardReport>,

    /// Label counted as a poor air-quality day.
    pub poor_label: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf, poor_label: String) -> Self {
        Self {
            data_path,
            dataset: None,
            range: None,
            report: None,
            poor_label,
            status_message: None,
        }
    }

    /// Load `path` through the dataset cache and make it current.
    pub fn load(&mut self, path: &Path) {
        match cache::load_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} observations from {} spanning {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.date_span
                );
                self.data_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Drop the cached copy of the current file and read it again.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        cache::invalidate(&path);
        self.load(&path);
    }

    /// Ingest a dataset and reset the range to its full span.
    pub fn set_dataset(&mut self, dataset: Arc<AirQualityDataset>) {
        self.range = DateRange::covering(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Override either end of the range; `None` keeps the current value.
    pub fn set_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        let Some(current) = self.range else {
            return;
        };
        let next = DateRange::new(start.unwrap_or(current.start), end.unwrap_or(current.end));
        if next != current {
            self.range = Some(next);
            self.recompute();
        }
    }

    /// Rebuild the report from the current dataset and range.
    pub fn recompute(&mut self) {
        self.report = match (&self.dataset, self.range) {
            (Some(ds), Some(range)) => Some(DashboardReport::compute(ds, range, &self.poor_label)),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::observation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> AppState {
        let mut state = AppState::new(PathBuf::from("all_data.csv"), "Poor".to_string());
        state.set_dataset(Arc::new(AirQualityDataset::from_observations(vec![
            observation((2013, 3, 1), 5, 10.0),
            observation((2013, 3, 9), 7, 12.0),
            observation((2013, 4, 2), 9, 14.0),
        ])));
        state
    }

    #[test]
    fn dataset_sets_full_range() {
        let state = state();
        assert_eq!(state.range, Some(DateRange::new(date(2013, 3, 1), date(2013, 4, 2))));
        assert_eq!(state.report.as_ref().map(|r| r.row_count), Some(3));
    }

    #[test]
    fn narrowing_range_recomputes_report() {
        let mut state = state();
        state.set_range(Some(date(2013, 3, 2)), None);
        assert_eq!(state.report.as_ref().map(|r| r.row_count), Some(2));
        state.set_range(None, Some(date(2013, 3, 31)));
        assert_eq!(state.report.as_ref().map(|r| r.row_count), Some(1));
    }

    #[test]
    fn inverted_range_gives_empty_report() {
        let mut state = state();
        state.set_range(Some(date(2013, 4, 2)), Some(date(2013, 3, 1)));
        assert_eq!(state.report.as_ref().map(|r| r.row_count), Some(0));
    }

    #[test]
    fn failed_load_sets_status() {
        let mut state = AppState::new(PathBuf::from("x.csv"), "Poor".to_string());
        state.load(Path::new("/tmp/does-not-exist-aq-state.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }
}
