//! Storage layer for the last opened location.
//!
//! The plugin has no browser history to restore a deep link from, so the
//! fragment of the last opened file is persisted and replayed on load.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction
//! - `json`: JSON file-based implementation
//! - `models`: Storage record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::LocationStore;
pub use json::JsonLocationStore;
pub use models::LocationRecord;
