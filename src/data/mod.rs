/// Data layer: core types, loading, and the two chart computations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │  Arc, read-only
///   ┌────┴──────────────┐
///   ▼                   ▼
/// ┌───────────┐   ┌──────────┐
/// │ aggregate │   │  filter   │
/// └───────────┘   └──────────┘
///   site → pie      range → scatter
/// ```

pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
