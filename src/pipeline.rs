//! Recompute pipeline: every input change produces a fresh [`Snapshot`].
//!
//! ```text
//!  Selection ──► filter ──► ActiveSubset ──┬──► AxisRange (x, y)
//!                                          └──► estimate (query, k)
//! ```
//!
//! Nothing is carried over between snapshots; the presentation layer reads
//! a snapshot and never writes back into it.

use std::ops::RangeInclusive;

use crate::config::ExplorerConfig;
use crate::data::filter::{ActiveSubset, clamp_k, filter_by_category, valid_k_range};
use crate::data::model::{Dataset, Record};
use crate::knn::{Estimate, Neighbor, estimate};
use crate::scale::{Axis, AxisRange, DrawArea};

// ---------------------------------------------------------------------------
// User inputs
// ---------------------------------------------------------------------------

/// The three user inputs that drive a recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: String,
    pub query_x: f64,
    pub k: usize,
}

// ---------------------------------------------------------------------------
// Explorer: owns the loaded dataset
// ---------------------------------------------------------------------------

/// Loaded dataset plus the settings used to derive views of it.
#[derive(Debug, Clone)]
pub struct Explorer {
    dataset: Dataset,
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(dataset: Dataset, config: ExplorerConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.dataset.categories().iter().map(String::as_str)
    }

    /// Initial inputs: the first row's category and the configured query and k.
    pub fn default_selection(&self) -> Selection {
        let category = self
            .dataset
            .records()
            .first()
            .map(|r| r.category.clone())
            .unwrap_or_default();
        let selection = Selection {
            category,
            query_x: self.config.default_query,
            k: self.config.default_k,
        };
        self.reclamp(selection)
    }

    /// Replace the category and bring k back into the new subset's legal range.
    pub fn with_category(&self, selection: &Selection, category: &str) -> Selection {
        self.reclamp(Selection {
            category: category.to_string(),
            ..selection.clone()
        })
    }

    fn reclamp(&self, mut selection: Selection) -> Selection {
        let n = filter_by_category(&self.dataset, &selection.category).len();
        selection.k = clamp_k(selection.k, n, self.config.max_k);
        selection
    }

    /// Run filter, axis ranges and estimator from scratch for `selection`.
    pub fn snapshot(&self, selection: &Selection) -> Snapshot<'_> {
        let subset = filter_by_category(&self.dataset, &selection.category);
        let x_range = AxisRange::for_records(subset.records(), Axis::X, &self.config.x_axis);
        let y_range = AxisRange::for_records(subset.records(), Axis::Y, &self.config.y_axis);
        let valid_k = valid_k_range(subset.len(), self.config.max_k);
        let estimate = estimate(subset.records(), selection.query_x, selection.k);

        log::debug!(
            "snapshot: category={:?} subset={} k={} query={} prediction={:.2}",
            selection.category,
            subset.len(),
            selection.k,
            selection.query_x,
            estimate.prediction
        );

        Snapshot {
            subset,
            x_range,
            y_range,
            valid_k,
            query_x: selection.query_x,
            estimate,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot: derived state handed to presentation
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs for one frame of input.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    subset: ActiveSubset<'a>,
    x_range: AxisRange,
    y_range: AxisRange,
    valid_k: RangeInclusive<usize>,
    query_x: f64,
    estimate: Estimate<'a>,
}

impl<'a> Snapshot<'a> {
    pub fn active_subset(&self) -> &[&'a Record] {
        self.subset.records()
    }

    /// Whether the category matched nothing and all records are shown.
    pub fn fell_back(&self) -> bool {
        self.subset.fell_back()
    }

    pub fn axis_range(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x_range,
            Axis::Y => self.y_range,
        }
    }

    /// Map a data value on `axis` into `area`.
    pub fn map_to_draw(&self, value: f64, axis: Axis, area: &DrawArea) -> f64 {
        area.map(value, axis, &self.axis_range(axis))
    }

    /// Screen position of a record.
    pub fn project(&self, record: &Record, area: &DrawArea) -> (f64, f64) {
        (
            self.map_to_draw(record.x, Axis::X, area),
            self.map_to_draw(record.y, Axis::Y, area),
        )
    }

    /// Screen position of the query drawn at its predicted value.
    pub fn query_point(&self, area: &DrawArea) -> (f64, f64) {
        (
            self.map_to_draw(self.query_x, Axis::X, area),
            self.map_to_draw(self.estimate.prediction, Axis::Y, area),
        )
    }

    pub fn query_x(&self) -> f64 {
        self.query_x
    }

    pub fn neighbors(&self) -> &[Neighbor<'a>] {
        &self.estimate.neighbors
    }

    pub fn prediction(&self) -> f64 {
        self.estimate.prediction
    }

    pub fn valid_k_range(&self) -> RangeInclusive<usize> {
        self.valid_k.clone()
    }
}
