use std::path::{Path, PathBuf};

use crate::error::LoadError;

use super::model::{Dataset, Record};
use super::schema::{ColumnMap, Field, header_key};

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Where the dataset text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` / `https://` locations are URLs, anything else a file path.
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the whole source once and parse it.
pub fn load_source(source: &DataSource) -> Result<Dataset, LoadError> {
    let bytes = match source {
        DataSource::File(path) => read_file(path)?,
        DataSource::Url(url) => fetch(url)?,
    };
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{source} is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    let dataset = parse(&text);
    log::info!(
        "Loaded {} records in {} categories from {source}",
        dataset.len(),
        dataset.categories().len()
    );
    Ok(dataset)
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "remote")]
fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http = |e: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };
    let response = reqwest::blocking::get(url).map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().map_err(http)?.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    Err(LoadError::RemoteUnsupported(url.to_string()))
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

/// Parse comma-separated text into a [`Dataset`].
///
/// The first row is the header. Quoted fields may hold commas, line breaks
/// and `""` escapes; records end at `\n`, `\r\n` or a bare `\r`. A trailing
/// row without a terminator is still read. Never fails: unreadable numbers
/// become NaN and short rows read missing cells as empty.
pub fn parse(text: &str) -> Dataset {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = strip_field_lead(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = reader
        .records()
        .enumerate()
        .filter_map(|(row_no, result)| match result {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("skipping unreadable CSV row {row_no}: {e}");
                None
            }
        });

    let Some(header) = rows.next() else {
        return Dataset::default();
    };
    let header: Vec<String> = header.iter().map(header_key).collect();
    let columns = ColumnMap::resolve(&header);
    log::debug!("resolved columns {columns:?} from header {header:?}");

    let records: Vec<Record> = rows.map(|row| columns.record(&row)).collect();
    Dataset::from_records(records)
}

/// Drop spaces and tabs at the start of every unquoted field.
///
/// The csv tokenizer only opens a quote on a field's first byte, so
/// `2021, "Smith, Bob"` would otherwise split inside the quotes. Quoted
/// content, including `""` escapes, is copied untouched.
fn strip_field_lead(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            out.push(c);
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    out.push('"');
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        if field_start && (c == ' ' || c == '\t') {
            continue;
        }
        if field_start && c == '"' {
            in_quotes = true;
            field_start = false;
            out.push(c);
            continue;
        }
        out.push(c);
        field_start = matches!(c, ',' | '\n' | '\r');
    }
    out
}

/// Write a dataset back as comma-separated text with canonical headers.
///
/// The auxiliary column is only written when some record carries it, so
/// `parse(&serialize(ds))` yields the same values as `ds`.
pub fn serialize(dataset: &Dataset) -> String {
    let with_aux = dataset.records().iter().any(|r| r.aux.is_some());
    let fields: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| with_aux || *f != Field::Aux)
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(dataset.len() + 1);
    rows.push(fields.iter().map(|f| f.canonical_name().to_string()).collect());
    for record in dataset.records() {
        rows.push(
            fields
                .iter()
                .map(|f| match f {
                    Field::Category => record.category.clone(),
                    Field::Label => record.label.clone(),
                    Field::X => record.x.to_string(),
                    Field::Y => record.y.to_string(),
                    Field::Aux => record.aux.clone().unwrap_or_default(),
                })
                .collect(),
        );
    }

    for row in &rows {
        // Writing into a Vec cannot fail.
        if let Err(e) = writer.write_record(row) {
            log::error!("failed to serialize row: {e}");
        }
    }
    match writer.into_inner() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::error!("failed to flush serialized dataset: {e}");
            String::new()
        }
    }
}
