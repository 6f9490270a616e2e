//! Actions accepted by the store and their encoders.
//!
//! Actions are plain data describing a state transition. They are built with
//! the free functions in this module so call sites read like the intent
//! (`dispatch(set_file(name))`) rather than like enum plumbing.

use crate::domain::SearchResult;
use std::sync::Arc;

/// A state transition request handled by the reducers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Resets the query slice: no term, empty result, not querying.
    ClearQuery,
    /// Marks a search request as in flight and clears the last search error.
    FetchQueryResult,
    /// Replaces the search term.
    SetQueryTerm(String),
    /// Stores a search result and clears the in-flight flag.
    SetQueryResult(Arc<SearchResult>),
    /// Records a failed search and clears the in-flight flag.
    QueryFailed(String),
    /// Selects a file; its content becomes unknown until fetched.
    SetFile(String),
    /// Stores the content of the selected file.
    SetFileContent(Arc<str>),
    /// Records a failed file fetch.
    FileFailed(String),
}

impl Action {
    /// Short name used in logs and spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ClearQuery => "CLEAR_QUERY",
            Self::FetchQueryResult => "FETCH_QUERY_RESULT",
            Self::SetQueryTerm(_) => "SET_QUERY",
            Self::SetQueryResult(_) => "SET_QUERY_RESULT",
            Self::QueryFailed(_) => "QUERY_FAILED",
            Self::SetFile(_) => "SET_FILE",
            Self::SetFileContent(_) => "SET_FILE_CONTENT",
            Self::FileFailed(_) => "FILE_FAILED",
        }
    }
}

#[must_use]
pub const fn clear_query() -> Action {
    Action::ClearQuery
}

#[must_use]
pub const fn fetch_query_result() -> Action {
    Action::FetchQueryResult
}

#[must_use]
pub fn set_query_term(value: impl Into<String>) -> Action {
    Action::SetQueryTerm(value.into())
}

#[must_use]
pub fn set_query_result(value: SearchResult) -> Action {
    Action::SetQueryResult(Arc::new(value))
}

#[must_use]
pub fn query_failed(message: impl Into<String>) -> Action {
    Action::QueryFailed(message.into())
}

#[must_use]
pub fn set_file(value: impl Into<String>) -> Action {
    Action::SetFile(value.into())
}

#[must_use]
pub fn file_content(value: impl Into<Arc<str>>) -> Action {
    Action::SetFileContent(value.into())
}

#[must_use]
pub fn file_failed(message: impl Into<String>) -> Action {
    Action::FileFailed(message.into())
}
