/// Analysis views: stateless transformations over a filtered subset.
///
/// ```text
///   AirQualityDataset + DateRange
///        │
///        ▼
///   ┌──────────┐   correlation · scatter · seasonal · peak_hour
///   │  report   │──▶
///   └──────────┘   weather_impact (always the full dataset)
/// ```

pub mod correlation;
pub mod peak_hour;
pub mod report;
pub mod scatter;
pub mod seasonal;
pub mod stats;
pub mod weather_impact;
