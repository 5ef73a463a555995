//! One-dimensional k-nearest-neighbours estimate.
//!
//! ## Invariants
//!
//! * Neighbours are ordered by non-decreasing distance; equal distances keep
//!   the subset order (stable sort), so highlights and the displayed value
//!   are deterministic.
//! * Exactly `min(k, n)` neighbours are returned; `k = 0` gives none.
//! * NaN distances sort after every number and keep their relative order.
//!
//! No clamping happens here; callers bound `k` with `clamp_k`.

use std::cmp::Ordering;

use crate::data::model::Record;

/// A record selected as neighbour, with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub record: &'a Record,
    pub distance: f64,
    /// Position of the record within the subset it was drawn from.
    pub position: usize,
}

/// Neighbours and the mean of their `y` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate<'a> {
    pub neighbors: Vec<Neighbor<'a>>,
    pub prediction: f64,
}

/// Find the `k` records closest to `query_x` by `|x - query_x|` and average their `y`.
///
/// The prediction is 0 when no neighbour is selected.
pub fn estimate<'a>(subset: &[&'a Record], query_x: f64, k: usize) -> Estimate<'a> {
    let mut ranked: Vec<Neighbor<'a>> = subset
        .iter()
        .enumerate()
        .map(|(position, &record)| Neighbor {
            record,
            distance: (record.x - query_x).abs(),
            position,
        })
        .collect();

    ranked.sort_by(|a, b| by_distance(a.distance, b.distance));
    ranked.truncate(k.min(subset.len()));

    let prediction = mean_y(&ranked);
    Estimate {
        neighbors: ranked,
        prediction,
    }
}

/// Total order on distances: numbers ascending, then every NaN as one equal class.
fn by_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

fn mean_y(neighbors: &[Neighbor<'_>]) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    let sum: f64 = neighbors.iter().map(|n| n.record.y).sum();
    sum / neighbors.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(label: &str, x: f64, y: f64) -> Record {
        Record {
            category: "2021".to_string(),
            label: label.to_string(),
            x,
            y,
            aux: None,
        }
    }

    fn labels<'a>(est: &Estimate<'a>) -> Vec<&'a str> {
        est.neighbors.iter().map(|n| n.record.label.as_str()).collect()
    }

    #[test]
    fn nearest_single_neighbour() {
        let data = [rec("Ann", 10.0, 3.0), rec("Bob", 20.0, 5.0)];
        let subset: Vec<&Record> = data.iter().collect();
        let est = estimate(&subset, 12.0, 1);
        assert_eq!(labels(&est), ["Ann"]);
        assert_eq!(est.neighbors[0].distance, 2.0);
        assert_eq!(est.prediction, 3.0);
    }

    #[test]
    fn ties_keep_subset_order() {
        let data = [
            rec("a", 14.0, 1.0),
            rec("b", 6.0, 2.0),
            rec("c", 10.0, 3.0),
            rec("d", 14.0, 4.0),
            rec("e", 6.0, 5.0),
        ];
        let subset: Vec<&Record> = data.iter().collect();
        let est = estimate(&subset, 10.0, 5);
        assert_eq!(labels(&est), ["c", "a", "b", "d", "e"]);
        let positions: Vec<usize> = est.neighbors.iter().map(|n| n.position).collect();
        assert_eq!(positions, [2, 0, 1, 3, 4]);
    }

    #[test]
    fn mean_of_three_nearest() {
        let data = [
            rec("far", 100.0, 50.0),
            rec("a", 9.0, 2.0),
            rec("b", 10.0, 4.0),
            rec("c", 11.0, 6.0),
        ];
        let subset: Vec<&Record> = data.iter().collect();
        let est = estimate(&subset, 10.0, 3);
        assert_eq!(est.neighbors.len(), 3);
        assert_eq!(est.prediction, 4.0);
        assert_eq!(format!("{:.2}", est.prediction), "4.00");
    }

    #[test]
    fn k_bounds_are_graceful() {
        let data = [rec("a", 1.0, 1.0), rec("b", 2.0, 3.0)];
        let subset: Vec<&Record> = data.iter().collect();

        let none = estimate(&subset, 1.0, 0);
        assert!(none.neighbors.is_empty());
        assert_eq!(none.prediction, 0.0);

        let all = estimate(&subset, 1.0, 50);
        assert_eq!(all.neighbors.len(), 2);
        assert_eq!(all.prediction, 2.0);
    }

    #[test]
    fn empty_subset_predicts_zero() {
        let est = estimate(&[], 5.0, 3);
        assert!(est.neighbors.is_empty());
        assert_eq!(est.prediction, 0.0);
    }

    #[test]
    fn nan_x_sorts_last_and_nan_y_contaminates_mean() {
        let data = [
            rec("nan-x", f64::NAN, 1.0),
            rec("far", 30.0, 2.0),
            rec("near", 11.0, f64::NAN),
        ];
        let subset: Vec<&Record> = data.iter().collect();

        let est = estimate(&subset, 10.0, 3);
        assert_eq!(labels(&est), ["near", "far", "nan-x"]);
        assert!(est.neighbors[2].distance.is_nan());
        assert!(est.prediction.is_nan());

        let est = estimate(&subset, 25.0, 1);
        assert_eq!(labels(&est), ["far"]);
        assert_eq!(est.prediction, 2.0);
    }

    #[test]
    fn nan_query_keeps_subset_order() {
        let data = [rec("a", 1.0, 1.0), rec("b", 2.0, 3.0), rec("c", 3.0, 5.0)];
        let subset: Vec<&Record> = data.iter().collect();
        let est = estimate(&subset, f64::NAN, 2);
        assert_eq!(labels(&est), ["a", "b"]);
        assert_eq!(est.prediction, 2.0);
    }
}
