//! Pure reducers for the query and file slices.
//!
//! Each reducer maps `(slice, action)` to a slice. Actions a reducer does not
//! handle return the input slice itself (same `Arc`), never a copy.

use super::action::Action;
use super::state::{AppState, FileState, QueryState};
use std::sync::Arc;

/// Reduces the search slice.
#[must_use]
pub fn query_reducer(state: &Arc<QueryState>, action: &Action) -> Arc<QueryState> {
    match action {
        Action::ClearQuery => Arc::new(QueryState {
            term: None,
            is_querying: false,
            result: Arc::default(),
            error: None,
        }),
        Action::FetchQueryResult => Arc::new(QueryState {
            is_querying: true,
            error: None,
            ..QueryState::clone(state)
        }),
        Action::SetQueryTerm(term) => Arc::new(QueryState {
            term: Some(term.clone()),
            ..QueryState::clone(state)
        }),
        Action::SetQueryResult(result) => Arc::new(QueryState {
            result: Arc::clone(result),
            is_querying: false,
            error: None,
            ..QueryState::clone(state)
        }),
        Action::QueryFailed(message) => Arc::new(QueryState {
            is_querying: false,
            error: Some(message.clone()),
            ..QueryState::clone(state)
        }),
        _ => Arc::clone(state),
    }
}

/// Reduces the file slice.
#[must_use]
pub fn file_reducer(state: &Arc<FileState>, action: &Action) -> Arc<FileState> {
    match action {
        Action::SetFile(name) => Arc::new(FileState {
            name: Some(name.clone()),
            content: None,
            error: None,
        }),
        Action::SetFileContent(content) => Arc::new(FileState {
            content: Some(Arc::clone(content)),
            ..FileState::clone(state)
        }),
        Action::FileFailed(message) => Arc::new(FileState {
            error: Some(message.clone()),
            ..FileState::clone(state)
        }),
        _ => Arc::clone(state),
    }
}

/// Applies both slice reducers, producing the next combined state.
#[must_use]
pub fn root_reducer(state: &AppState, action: &Action) -> AppState {
    AppState {
        query: query_reducer(&state.query, action),
        file: file_reducer(&state.file, action),
    }
}
