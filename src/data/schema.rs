//! Header-to-field mapping.
//!
//! Each logical field owns an ordered alias list; the first alias present in
//! the (trimmed, lower-cased) header row wins. Resolution happens once per
//! parse, rows are then read by column index.

use csv::StringRecord;

use super::model::Record;

/// A logical column of the record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Label,
    X,
    Y,
    Aux,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Category, Field::Label, Field::X, Field::Y, Field::Aux];

    /// Accepted header spellings, in lookup order.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Category => &["year", "season", "category"],
            Field::Label => &["player", "name", "label"],
            Field::X => &["sh", "shots", "attempts"],
            Field::Y => &["g", "goals", "successes"],
            Field::Aux => &["usage", "notes"],
        }
    }

    /// Header written by `serialize`.
    pub fn canonical_name(self) -> &'static str {
        self.aliases()[0]
    }
}

/// Normalise a raw header cell into a lookup key.
pub fn header_key(cell: &str) -> String {
    cell.trim().to_lowercase()
}

/// Column index per logical field, resolved against one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub category: Option<usize>,
    pub label: Option<usize>,
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub aux: Option<usize>,
}

impl ColumnMap {
    /// Resolve every field against normalised header keys.
    pub fn resolve(header: &[String]) -> Self {
        let find = |field: Field| {
            field
                .aliases()
                .iter()
                .find_map(|alias| header.iter().position(|h| h == alias))
        };
        ColumnMap {
            category: find(Field::Category),
            label: find(Field::Label),
            x: find(Field::X),
            y: find(Field::Y),
            aux: find(Field::Aux),
        }
    }

    /// Build a record from one data row. Short rows read missing cells as "".
    pub fn record(&self, row: &StringRecord) -> Record {
        let text = |idx: Option<usize>| idx.map(|i| row.get(i).unwrap_or("").to_string());
        Record {
            category: text(self.category).unwrap_or_default(),
            label: text(self.label).unwrap_or_default(),
            x: parse_number(text(self.x).as_deref().unwrap_or("")),
            y: parse_number(text(self.y).as_deref().unwrap_or("")),
            aux: text(self.aux),
        }
    }
}

/// Convert a cell to a finite number, or NaN when it is not one.
pub fn parse_number(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}
