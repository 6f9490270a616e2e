//! JSON file-based location storage.
//!
//! Writes go to a temporary file that is then renamed over the target, so a
//! crash never leaves a half-written record behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "fragment": "#pkg%2Fx.go",
//!   "updated_at": 1760745600
//! }
//! ```

use crate::domain::error::{Result, ZearchError};
use crate::storage::backend::LocationStore;
use crate::storage::models::{LocationRecord, LOCATION_VERSION};
use std::path::{Path, PathBuf};

/// Name of the location file inside the data directory.
pub const LOCATION_FILE: &str = "location.json";

/// JSON file storage for the last location.
#[derive(Debug)]
pub struct JsonLocationStore {
    file_path: PathBuf,
}

impl JsonLocationStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// The file itself is only created on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing location storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Opens `location.json` inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(LOCATION_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl LocationStore for JsonLocationStore {
    fn load(&self) -> Result<Option<LocationRecord>> {
        if !self.file_path.exists() {
            tracing::debug!("no stored location");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let record: LocationRecord = serde_json::from_str(&contents)
            .map_err(|e| ZearchError::Storage(format!("failed to parse JSON: {e}")))?;

        if record.version != LOCATION_VERSION {
            return Err(ZearchError::Storage(format!(
                "unsupported location format version {}",
                record.version
            )));
        }

        tracing::debug!(fragment = %record.fragment, "loaded stored location");
        Ok(Some(record))
    }

    fn save(&mut self, fragment: &str) -> Result<()> {
        let record = LocationRecord::new(fragment);
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| ZearchError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(fragment, "location saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonLocationStore::in_dir(dir.path()).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonLocationStore::in_dir(dir.path()).unwrap();

        store.save("#a.go").unwrap();
        store.save("#pkg%2Fx.go").unwrap();

        let record = store.load().unwrap().unwrap();
        assert_eq!(record.fragment, "#pkg%2Fx.go");
        assert_eq!(record.version, 1);
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(LOCATION_FILE);
        let mut store = JsonLocationStore::new(path.clone()).unwrap();
        store.save("#x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCATION_FILE), "{not json").unwrap();
        let store = JsonLocationStore::in_dir(dir.path()).unwrap();
        assert!(matches!(store.load(), Err(ZearchError::Storage(_))));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOCATION_FILE),
            r##"{"version": 7, "fragment": "#a", "updated_at": 0}"##,
        )
        .unwrap();
        let store = JsonLocationStore::in_dir(dir.path()).unwrap();
        assert!(matches!(store.load(), Err(ZearchError::Storage(_))));
    }
}
