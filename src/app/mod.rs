//! Application layer: the browser, its effects and event handling.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the store. It
//! wires store subscriptions to render targets and outbound commands, and
//! translates runtime events into store actions.
//!
//! # Architecture
//!
//! ```text
//! Runtime event → handle_event → Browser ─dispatch─► Store ─notify─► effects
//!                                   ▲                                  │
//!                                   │     View (render targets) ◄──────┤
//!      Commands (fetch, location) ◄─┴──────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`browser`]: Per-instance state and view model computation
//! - [`commands`]: Side effects executed by the plugin runtime
//! - [`effects`]: Store subscriptions and their environment
//! - [`handler`]: Event processing
//! - [`location`]: Location fragment encoding
//! - [`modes`]: Input focus
//! - [`requests`]: Request identity and stale-response policy

pub mod browser;
pub mod commands;
pub mod effects;
pub mod handler;
pub mod location;
pub mod modes;
pub mod requests;

pub use browser::Browser;
pub use commands::Command;
pub use effects::{wire, Effects, Settings};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use requests::{RequestId, RequestKind, RequestTracker, StalePolicy};
