//! Tests for reading datasets from their source.
//!
//! These tests verify the single bulk read that precedes parsing:
//! - Local files are read whole and parsed
//! - Missing files surface as an I/O load error carrying the path
//! - Invalid UTF-8 is decoded lossily instead of failing

use std::io::Write;
use std::path::PathBuf;

use knn_scatter::{DataSource, LoadError, load_source};

/// A file on disk loads into the same dataset as its text.
#[test]
fn test_load_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"year,player,sh,g\r\n2021,Ann,10,3\r\n2022,Cid,15,4")
        .unwrap();

    let ds = load_source(&DataSource::File(file.path().to_path_buf())).unwrap();

    assert_eq!(ds.len(), 2);
    let cats: Vec<&str> = ds.categories().iter().map(String::as_str).collect();
    assert_eq!(cats, ["2021", "2022"]);
}

/// A missing file is a load failure naming the path.
#[test]
fn test_missing_file() {
    let path = PathBuf::from("/nonexistent/dir/roster.csv");
    let err = load_source(&DataSource::File(path.clone())).unwrap_err();

    match &err {
        LoadError::Io { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(err.to_string().contains("roster.csv"));
}

/// Bytes that are not UTF-8 are replaced, the rest of the file still loads.
#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"year,player,sh,g\n2021,Ren\xe9e,10,3\n").unwrap();

    let ds = load_source(&DataSource::File(file.path().to_path_buf())).unwrap();

    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records()[0].label, "Ren\u{fffd}e");
    assert_eq!(ds.records()[0].y, 3.0);
}

/// Location strings pick the right source kind.
#[test]
fn test_source_from_location() {
    assert!(matches!(
        DataSource::from_location("https://example.org/roster.csv"),
        DataSource::Url(_)
    ));
    assert!(matches!(
        DataSource::from_location("roster.csv"),
        DataSource::File(_)
    ));
}
