/// Data layer: core types, loading, caching and date filtering.
///
/// Architecture:
/// ```text
///     all_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → AirQualityDataset (derived timestamp)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<AirQualityDataset> keyed by (path, mtime)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date range → row indices
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
