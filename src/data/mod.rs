/// Data layer: result rows, loading and writing.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResultSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ ResultSet │  Vec<ResultRow>, ranges, error summary
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
