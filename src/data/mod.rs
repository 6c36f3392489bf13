//! Data layer: record store, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!   avocado.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse CSV → RecordStore (sorted by date)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ RecordStore  │  Vec<Record>, distinct regions/types, date range
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  region / type / date window → &Record subset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  group by region / type / year → sum or mean
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
