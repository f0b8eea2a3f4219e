/// Data layer: summary table types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → MetricTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ MetricTable  │  Vec<MetricRecord>, distinct depths
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Accuracy > 0, (metric, round) → RoundSeries
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
