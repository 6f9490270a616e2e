//! Domain layer for the zearch plugin.
//!
//! Core types that do not depend on Zellij APIs: the error type, the search
//! result model returned by the backend, and filename helpers.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`document`]: Search result model and its wire formats
//! - [`filename`]: Label truncation, breadcrumb segments, language selection
//! - [`text`]: Control character replacement for painted text

pub mod document;
pub mod error;
pub mod filename;
pub mod text;

pub use document::SearchResult;
pub use error::{Result, ZearchError};
