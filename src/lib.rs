//! Core of the k-NN scatter explorer.
//!
//! ```text
//!   delimited text
//!         │
//!         ▼
//!   ┌──────────┐
//!   │  loader   │  parse → Dataset
//!   └──────────┘
//!         │
//!         ▼
//!   ┌──────────┐
//!   │  filter   │  category → ActiveSubset (falls back to the full Dataset)
//!   └──────────┘
//!         │
//!    ┌────┴─────┐
//!    ▼          ▼
//! ┌───────┐ ┌───────┐
//! │ scale │ │  knn  │  axis ranges / neighbours + prediction
//! └───────┘ └───────┘
//!    └────┬─────┘
//!         ▼
//!   ┌──────────┐
//!   │ pipeline  │  Snapshot handed to the presentation layer
//!   └──────────┘
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod knn;
pub mod pipeline;
pub mod scale;

pub use config::ExplorerConfig;
pub use data::filter::{ActiveSubset, clamp_k, filter_by_category, valid_k_range};
pub use data::loader::{DataSource, load_source, parse, serialize};
pub use data::model::{Dataset, Record};
pub use error::{ConfigError, LoadError};
pub use knn::{Estimate, Neighbor, estimate};
pub use pipeline::{Explorer, Selection, Snapshot};
pub use scale::{Axis, AxisRange, AxisSpec, DrawArea, to_draw_coordinate};
