//! Data layer: table loading, series extraction, alerts and statistics.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse bytes → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  series   │  column 0 → TimeAxis, rest → Vec<Series>
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐  ┌──────────┐
//!   │  alerts   │  │ summary  │  max > 120 mg/dL ; mean/max/min/std
//!   └──────────┘  └──────────┘
//!
//!   export: Table → CSV bytes (download)
//!   analysis: runs the whole chain once per loaded file
//! ```

pub mod alerts;
pub mod analysis;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod series;
pub mod summary;
