use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single observation (one data row of the source table).
///
/// Numeric fields that could not be read hold `f64::NAN`, so downstream
/// arithmetic propagates the gap instead of dropping the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Filter key (season / year label), compared by exact string equality.
    pub category: String,
    /// Free-text identifier shown in tooltips; may be empty.
    pub label: String,
    /// Independent variable (e.g. shots): plotted horizontally, used for distance.
    pub x: f64,
    /// Dependent variable (e.g. goals): plotted vertically, averaged for the prediction.
    pub y: f64,
    /// Auxiliary text column, `None` when the source has no such column.
    pub aux: Option<String>,
}

impl Record {
    /// Field-wise equality where NaN matches NaN.
    pub fn same_values(&self, other: &Record) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        self.category == other.category
            && self.label == other.label
            && same(self.x, other.x)
            && same(self.y, other.y)
            && self.aux == other.aux
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; row order is source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Sorted set of distinct category values.
    categories: BTreeSet<String>,
}

impl Dataset {
    /// Build the category index from the parsed records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let categories = records.iter().map(|r| r.category.clone()).collect();
        Dataset {
            records,
            categories,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value equality over records, treating NaN fields as equal.
    pub fn same_values(&self, other: &Dataset) -> bool {
        self.len() == other.len()
            && self
                .records
                .iter()
                .zip(&other.records)
                .all(|(a, b)| a.same_values(b))
    }
}
