//! Unidirectional state store.
//!
//! ```text
//! input ─► Action ─► reducers ─► AppState ─► subscriptions ─► effects
//!   ▲                                                          │
//!   └──────────────── follow-up actions (queued) ◄─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`action`]: Action type and its encoder functions
//! - [`state`]: State slices (`QueryState`, `FileState`, `AppState`)
//! - [`reducer`]: Pure reducers for each slice
//! - [`store`]: The store and its non-reentrant dispatch loop
//! - [`subscription`]: Selector subscriptions with change detection

pub mod action;
pub mod reducer;
pub mod state;
#[allow(clippy::module_inception)]
pub mod store;
pub mod subscription;

pub use action::Action;
pub use reducer::{file_reducer, query_reducer, root_reducer};
pub use state::{AppState, FileState, QueryState};
pub use store::{Context, Listener, Store, MAX_CASCADE};
pub use subscription::{by_ref, by_value, Equality, Subscription};
