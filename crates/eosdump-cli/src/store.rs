//! Flat JSON persistence for parameter files, the OAuth cache, and the
//! extracted documents.

use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::error::CliError;

/// Load a JSON document.
pub fn load_json(path: &Path) -> Result<Value, CliError> {
    tracing::info!(path = %path.display(), "loading");
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(file).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a JSON document, pretty-printed, creating parent directories.
pub fn save_json(path: &Path, document: &Value) -> Result<(), CliError> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    tracing::debug!(path = %path.display(), "saving");
    let file = File::create(path).map_err(io_err)?;
    serde_json::to_writer_pretty(file, document).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_trip_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("eosdump_store_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested/doc.json");

        let document = json!({"a": 1, "b": ["x", "y"]});
        save_json(&path, &document).unwrap();
        assert_eq!(load_json(&path).unwrap(), document);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_json(Path::new("/nonexistent/params.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
