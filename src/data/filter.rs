use std::ops::RangeInclusive;

use super::model::{Dataset, Record};

/// Upper bound on the neighbour count offered to the user.
pub const MAX_K: usize = 15;

// ---------------------------------------------------------------------------
// Active subset: the records currently shown and used for estimation
// ---------------------------------------------------------------------------

/// Non-owning view of the records matching the selected category, in source order.
#[derive(Debug, Clone)]
pub struct ActiveSubset<'a> {
    records: Vec<&'a Record>,
    fell_back: bool,
}

impl<'a> ActiveSubset<'a> {
    /// A view over every record of the dataset.
    pub fn all(dataset: &'a Dataset) -> Self {
        ActiveSubset {
            records: dataset.records().iter().collect(),
            fell_back: false,
        }
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    /// True when no record matched the category and the full dataset is shown instead.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Select the records whose category equals `category` exactly.
///
/// If nothing matches, the whole dataset is returned, so the subset is only
/// empty when the dataset is.
pub fn filter_by_category<'a>(dataset: &'a Dataset, category: &str) -> ActiveSubset<'a> {
    let records: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| r.category == category)
        .collect();

    if records.is_empty() {
        if !dataset.is_empty() {
            log::debug!("no records in category {category:?}, showing all {}", dataset.len());
        }
        return ActiveSubset {
            fell_back: !dataset.is_empty(),
            ..ActiveSubset::all(dataset)
        };
    }

    ActiveSubset {
        records,
        fell_back: false,
    }
}

// ---------------------------------------------------------------------------
// Neighbour-count bounds
// ---------------------------------------------------------------------------

/// Legal k values for a subset of `subset_len` records: `1..=min(max_k, subset_len)`.
/// Empty when the subset is empty.
pub fn valid_k_range(subset_len: usize, max_k: usize) -> RangeInclusive<usize> {
    1..=max_k.min(subset_len)
}

/// Clamp a requested k into [`valid_k_range`]; yields 1 when that range is empty.
pub fn clamp_k(requested: usize, subset_len: usize, max_k: usize) -> usize {
    let upper = max_k.min(subset_len).max(1);
    requested.clamp(1, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse;

    fn roster() -> Dataset {
        parse("year,player,sh,g\n2021,Ann,10,3\n2022,Cid,15,4\n2021,Bob,20,5\n")
    }

    #[test]
    fn keeps_matching_rows_in_source_order() {
        let ds = roster();
        let subset = filter_by_category(&ds, "2021");
        let names: Vec<&str> = subset.records().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob"]);
        assert!(!subset.fell_back());
    }

    #[test]
    fn no_match_falls_back_to_everything() {
        let ds = roster();
        let subset = filter_by_category(&ds, "2099");
        assert_eq!(subset.len(), 3);
        assert!(subset.fell_back());
    }

    #[test]
    fn match_is_exact() {
        let ds = roster();
        assert!(filter_by_category(&ds, " 2021").fell_back());
        assert!(filter_by_category(&ds, "2021.0").fell_back());
    }

    #[test]
    fn empty_dataset_stays_empty() {
        let ds = Dataset::default();
        let subset = filter_by_category(&ds, "2021");
        assert!(subset.is_empty());
        assert!(!subset.fell_back());
    }

    #[test]
    fn k_range_is_bounded_by_subset_and_cap() {
        assert_eq!(valid_k_range(40, MAX_K), 1..=15);
        assert_eq!(valid_k_range(4, MAX_K), 1..=4);
        assert!(valid_k_range(0, MAX_K).is_empty());
    }

    #[test]
    fn clamp_k_stays_in_range() {
        assert_eq!(clamp_k(0, 10, MAX_K), 1);
        assert_eq!(clamp_k(3, 10, MAX_K), 3);
        assert_eq!(clamp_k(12, 10, MAX_K), 10);
        assert_eq!(clamp_k(99, 40, MAX_K), 15);
        assert_eq!(clamp_k(5, 0, MAX_K), 1);
    }
}
