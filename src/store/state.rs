//! State slices held by the store.
//!
//! [`AppState`] is the combined state; each slice sits behind an `Arc` so
//! that reducers can hand back the very same slice when an action does not
//! concern them. Subscriptions rely on that identity to detect changes
//! without comparing contents.

use crate::domain::SearchResult;
use std::sync::Arc;

/// Search slice: current term, in-flight flag and last result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Current search term; `None` after a clear or before any input.
    pub term: Option<String>,

    /// `true` between issuing a search and receiving its answer.
    pub is_querying: bool,

    /// Result of the most recently applied search.
    pub result: Arc<SearchResult>,

    /// Message describing the last failed search, if any.
    pub error: Option<String>,
}

/// File slice: selected filename and its loaded content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
    /// Selected filename, relative to the backend root.
    pub name: Option<String>,

    /// Content of `name`; `None` until the fetch for it completes.
    pub content: Option<Arc<str>>,

    /// Message describing the last failed file fetch, if any.
    pub error: Option<String>,
}

/// Combined application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Search slice.
    pub query: Arc<QueryState>,
    /// File slice.
    pub file: Arc<FileState>,
}

impl AppState {
    /// Returns `true` if both slices are the same allocations as `other`'s.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.query, &other.query) && Arc::ptr_eq(&self.file, &other.file)
    }
}
