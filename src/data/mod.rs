/// Data layer: table model, CSV I/O, filtering and sorting.
///
/// Architecture:
/// ```text
///   file / stdin
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Table (row 0 = header)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep rows whose column contains a substring
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  stable numeric / text reorder by one column
///   └──────────┘
///        │
///        ▼
///   loader::write_table → stdout
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
