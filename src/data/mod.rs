/// Data layer: core types and the file collaborators at the pipeline boundary.
///
/// Architecture:
/// ```text
///  chart export (.json / .csv)      reference files (.csv)
///        │                                │
///        ▼                                ▼
///   ┌──────────┐                    ┌──────────┐
///   │  reader   │ → Vec<ChartSeries> │  reader   │ → ReferenceCurve ×2
///   └──────────┘                    └──────────┘
///        │                                │
///        └────────────┬───────────────────┘
///                     ▼
///              ┌─────────────┐
///              │ align::run  │ → Tables (joint / original / result)
///              └─────────────┘
///                     │
///                     ▼
///               ┌──────────┐
///               │  writer   │ → chart_data.csv, chart_original_data.csv,
///               └──────────┘    chart_result.csv
/// ```
pub mod model;
pub mod reader;
pub mod writer;
