//! Storage record models.

use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const LOCATION_VERSION: u32 = 1;

/// The persisted location of the last opened file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Format version for future migrations.
    pub version: u32,

    /// Location fragment, `#` followed by the encoded filename.
    pub fragment: String,

    /// Unix timestamp of the last save.
    pub updated_at: i64,
}

impl LocationRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use zearch::storage::LocationRecord;
    ///
    /// let record = LocationRecord::new("#main.go");
    /// assert_eq!(record.version, 1);
    /// assert!(record.updated_at > 0);
    /// ```
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            version: LOCATION_VERSION,
            fragment: fragment.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}
