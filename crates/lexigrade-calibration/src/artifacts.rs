//! JSON artifact reading and writing.

use std::fs;
use std::path::Path;

use lexigrade_core::{LexigradeError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Writes `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!(event = "artifact_written", path = %path.display());
    Ok(())
}

/// Reads a JSON artifact; failures are reported as resource errors.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).map_err(|e| LexigradeError::resource(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| LexigradeError::resource(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("english").join("out.json");
        let value: BTreeMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();

        write_json(&path, &value).unwrap();
        let back: BTreeMap<String, u32> = read_json(&path).unwrap();
        assert_eq!(back["b"], 2);
    }

    #[test]
    fn test_missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<BTreeMap<String, u32>>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LexigradeError::Resource { .. }));
    }
}
