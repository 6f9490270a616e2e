//! Storage backend abstraction.
//!
//! [`LocationStore`] hides where the last location lives so the plugin shim
//! and tests can swap the JSON file for something else.

use crate::domain::error::Result;
use crate::storage::models::LocationRecord;

/// Persists the location fragment of the last opened file.
///
/// # Examples
///
/// ```no_run
/// use zearch::storage::{JsonLocationStore, LocationStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonLocationStore::new(PathBuf::from("/tmp/location.json"))?;
/// store.save("#pkg%2Fx.go")?;
/// assert_eq!(store.load()?.map(|r| r.fragment).as_deref(), Some("#pkg%2Fx.go"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait LocationStore {
    /// Returns the stored record, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be read or decoded.
    fn load(&self) -> Result<Option<LocationRecord>>;

    /// Replaces the stored record with `fragment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, fragment: &str) -> Result<()>;
}
