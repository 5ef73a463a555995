//! Linear mapping from data values to drawing coordinates.
//!
//! Ranges are recomputed from the active subset on every snapshot; nothing
//! here is cached or mutates records.

use serde::{Deserialize, Serialize};

use crate::data::model::Record;

/// Plot axis. `X` carries the record's `x`, `Y` its `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Axis::X => record.x,
            Axis::Y => record.y,
        }
    }
}

// ---------------------------------------------------------------------------
// Axis padding rules
// ---------------------------------------------------------------------------

/// How an axis range is widened around the data extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Minimum padding on each side, in data units.
    pub padding_floor: f64,
    /// Padding as a fraction of the extent, rounded to a whole number.
    pub padding_fraction: f64,
    /// The padded low end never drops below this.
    pub lower_bound: Option<f64>,
}

impl AxisSpec {
    /// Independent-variable axis: at least 5 units of padding, unbounded.
    pub const X_DEFAULT: AxisSpec = AxisSpec {
        padding_floor: 5.0,
        padding_fraction: 0.08,
        lower_bound: None,
    };

    /// Dependent-variable axis: at least 1 unit of padding, never below 0.
    pub const Y_DEFAULT: AxisSpec = AxisSpec {
        padding_floor: 1.0,
        padding_fraction: 0.08,
        lower_bound: Some(0.0),
    };
}

// ---------------------------------------------------------------------------
// AxisRange
// ---------------------------------------------------------------------------

/// Padded `[low, high]` data interval for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
}

impl AxisRange {
    /// Range over `axis` for the given records, or the padded zero extent when there are none.
    pub fn for_records(records: &[&Record], axis: Axis, spec: &AxisSpec) -> Self {
        let (min, max) = extent(records.iter().map(|r| axis.value(r))).unwrap_or((0.0, 0.0));
        Self::padded(min, max, spec)
    }

    /// Widen `[min, max]` by `max(floor, round(fraction * (max - min)))` on both sides.
    ///
    /// NaN anywhere yields NaN bounds.
    pub fn padded(min: f64, max: f64, spec: &AxisSpec) -> Self {
        let pad = nan_max(spec.padding_floor, (spec.padding_fraction * (max - min)).round());
        let mut low = min - pad;
        if let Some(bound) = spec.lower_bound {
            low = nan_max(bound, low);
        }
        AxisRange {
            low,
            high: max + pad,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    /// `divisions + 1` evenly spaced values from `low` to `high`.
    pub fn ticks(&self, divisions: usize) -> Vec<f64> {
        if divisions == 0 {
            return vec![self.low];
        }
        (0..=divisions)
            .map(|i| self.low + (i as f64 / divisions as f64) * (self.high - self.low))
            .collect()
    }
}

/// `(min, max)` of the values; NaN if any value is NaN, `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((nan_min(lo, v), nan_max(hi, v))),
    })
}

// `f64::min`/`max` discard NaN; these keep it.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

// ---------------------------------------------------------------------------
// Drawing area
// ---------------------------------------------------------------------------

/// Target rectangle in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DrawArea {
    /// `(draw_low, draw_high)` for an axis. Y runs bottom → top so larger values draw higher.
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.bottom, self.top),
        }
    }

    pub fn map(&self, value: f64, axis: Axis, range: &AxisRange) -> f64 {
        let (draw_low, draw_high) = self.span(axis);
        to_draw_coordinate(value, range.low, range.high, draw_low, draw_high)
    }
}

/// Linear interpolation from `[range_low, range_high]` onto `[draw_low, draw_high]`.
///
/// A single-valued range maps everything to the middle of the draw range.
pub fn to_draw_coordinate(
    value: f64,
    range_low: f64,
    range_high: f64,
    draw_low: f64,
    draw_high: f64,
) -> f64 {
    if range_high == range_low {
        return (draw_low + draw_high) / 2.0;
    }
    draw_low + (value - range_low) / (range_high - range_low) * (draw_high - draw_low)
}
