//! Durable state: the learned value table and aggregate game statistics,
//! both stored as JSON.
//!
//! Writes go to a temporary sibling file that is then renamed over the
//! target, so a crash mid-save never leaves a truncated file behind. Loads
//! used at start-up are fail-soft: a missing or unreadable file yields the
//! default value and a log line instead of an error.

mod stats;
mod values;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub use stats::{GameStats, ModeStats};
pub use values::ValueTable;

/// Where the learner's files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub values_path: PathBuf,
    pub stats_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            values_path: PathBuf::from("td_values.json"),
            stats_path: PathBuf::from("td_stats.json"),
        }
    }
}

/// Serialize `value` and atomically replace `path` with it.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_vec(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, json).map_err(|source| StorageError::Write {
        path: tmp.to_path_buf(),
        source,
    })?;
    if let Err(source) = fs::rename(tmp, path) {
        // Leave no temp file behind
        let _ = fs::remove_file(tmp);
        return Err(StorageError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON file, falling back to `T::default()` when it is missing or
/// cannot be parsed.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(StorageError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            info!("{} not found, starting fresh", path.display());
            T::default()
        }
        Err(e) => {
            warn!("{e}; resetting to defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let data: BTreeMap<String, u32> = [("a".to_string(), 1), ("b".to_string(), 2)].into();

        write_json(&path, &data).unwrap();
        let loaded: BTreeMap<String, u32> = read_json(&path).unwrap();
        assert_eq!(loaded, data);
        assert!(!dir.path().join("nested").join("data.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target path makes the rename fail
        let path = dir.path().join("data.json");
        fs::create_dir(&path).unwrap();

        let err = write_json(&path, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<BTreeMap<String, u32>>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }), "got {err}");
    }

    #[test]
    fn test_read_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"\x80not json").unwrap();
        let err = read_json::<BTreeMap<String, u32>>(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }), "got {err}");
    }

    #[test]
    fn test_or_default_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let missing: BTreeMap<String, u32> = read_json_or_default(&dir.path().join("nope.json"));
        assert!(missing.is_empty());

        let path = dir.path().join("bad.json");
        fs::write(&path, "{ truncated").unwrap();
        let corrupt: BTreeMap<String, u32> = read_json_or_default(&path);
        assert!(corrupt.is_empty());
    }
}
