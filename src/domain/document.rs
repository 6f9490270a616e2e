//! Search result model returned by the code-search backend.
//!
//! The `/search` endpoint answers with a JSON object holding the matching
//! document identifiers under `Docs`. The reference server ranks hits and
//! emits objects (`{"Document": "...", "Rank": 1, "NameDistance": 0}`), while
//! simpler backends return bare strings. Both shapes are accepted; `Docs` may
//! also be missing or `null`, which means no results.

use serde::{Deserialize, Deserializer};

/// Ordered list of document identifiers matching a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Matching filenames, in backend ranking order.
    pub docs: Vec<String>,
}

/// One entry of the `Docs` array in either of its wire shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocEntry {
    Name(String),
    Scored {
        #[serde(rename = "Document")]
        document: String,
    },
}

impl DocEntry {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Scored { document: name } => name,
        }
    }
}

#[derive(Deserialize)]
struct WireResult {
    #[serde(rename = "Docs", default)]
    docs: Option<Vec<DocEntry>>,
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireResult::deserialize(deserializer)?;
        let docs = wire
            .docs
            .unwrap_or_default()
            .into_iter()
            .map(DocEntry::into_name)
            .collect();
        Ok(Self { docs })
    }
}

impl SearchResult {
    /// Creates a result from a list of filenames.
    #[must_use]
    pub fn new(docs: Vec<String>) -> Self {
        Self { docs }
    }

    /// Parses a `/search` response body.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::Json`](crate::ZearchError::Json) if the body is
    /// not a JSON object of the expected shape.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Returns `true` if the result holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns at most `limit` documents, preserving order.
    #[must_use]
    pub fn first(&self, limit: usize) -> &[String] {
        &self.docs[..self.docs.len().min(limit)]
    }
}
