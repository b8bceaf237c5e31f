//! Corpus files: pretty-printed UTF-8 JSON arrays of records

use crate::error::{CorpusError, Result};
use crate::record::CorpusRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a corpus file
///
/// # Errors
/// Fails if the file is missing, is not JSON, is not an array, or holds a
/// record without a text field
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusRecord>> {
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| CorpusError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !value.is_array() {
        return Err(CorpusError::NotAList(path.to_path_buf()));
    }

    let records: Vec<CorpusRecord> =
        serde_json::from_value(value).map_err(|e| CorpusError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Sibling path used while writing `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a corpus file, replacing the target atomically
///
/// The records are written to a sibling temporary file which is then
/// renamed over `path`, so an interrupted write never leaves a truncated
/// corpus behind.
pub fn save_corpus(path: &Path, records: &[CorpusRecord]) -> Result<()> {
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(records).map_err(|e| CorpusError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;

    debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventframe_domain::Label;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("corpus.json");
        let records = vec![
            CorpusRecord::labeled("Żółw przeszedł przez ulicę.", Label::NoEvent),
            CorpusRecord::new("Bez etykiety."),
        ];

        save_corpus(&path, &records).unwrap();
        assert!(!temp_path(&path).exists());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Żółw"), "non-ASCII must not be escaped");
        assert!(raw.contains("\n  "), "output is pretty-printed");

        assert_eq!(load_corpus(&path).unwrap(), records);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.json");
        save_corpus(&path, &[CorpusRecord::new("a"), CorpusRecord::new("b")]).unwrap();
        save_corpus(&path, &[CorpusRecord::new("c")]).unwrap();
        assert_eq!(load_corpus(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_corpus(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(CorpusError::NotFound(_))));
    }

    #[test]
    fn test_not_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(matches!(load_corpus(&path), Err(CorpusError::Json { .. })));
    }

    #[test]
    fn test_not_a_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obj.json");
        fs::write(&path, r#"{"text": "one"}"#).unwrap();
        assert!(matches!(load_corpus(&path), Err(CorpusError::NotAList(_))));
    }

    #[test]
    fn test_record_without_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notext.json");
        fs::write(&path, r#"[{"label": "CRIME"}]"#).unwrap();
        assert!(matches!(load_corpus(&path), Err(CorpusError::Json { .. })));
    }
}
