/// Data layer: core types, parsing, and category filtering.
///
/// Architecture:
/// ```text
///  .csv text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse text → Dataset (schema resolves header aliases)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, category index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category → ActiveSubset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
