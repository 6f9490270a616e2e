//! zearch: a Zellij plugin for searching and reading code served by a
//! code-search backend.
//!
//! Type into the search bar to query the backend's filename index, pick a
//! result to fetch the file, and read it syntax highlighted with breadcrumbs
//! of its path. The last opened file is remembered and restored on load.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - keys, web requests, pipes, permissions           │
//! └─────────────────────────────────────────────────────┘
//!                        │  Event / Command
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Browser: store + effects + input focus           │
//! │  - Effects wired as store subscriptions             │
//! │  - Request identity and stale responses             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Store (store/)│   │ UI (ui/)      │   │ Storage       │
//! │ - Actions     │   │ - View targets│   │ (storage/)    │
//! │ - Reducers    │   │ - Highlighting│   │ - Last        │
//! │ - Selectors   │   │ - Rendering   │   │   location    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Error types, search results, filename helpers    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! 1. A key press becomes an [`Event`]; [`handle_event`] dispatches actions.
//! 2. Reducers produce the next [`store::AppState`]. Slices an action does not
//!    touch keep their identity.
//! 3. Each subscription compares its selected value with the last one it saw
//!    and runs its effect on change: updating a `View` target, queuing a
//!    fetch, writing the location.
//! 4. The shim executes the returned [`Command`]s and feeds responses back as
//!    events.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zearch.wasm" {
//!         server_url "http://127.0.0.1:8000"
//!         result_limit "18"
//!         stale_responses "discard"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Files can be opened from outside the plugin:
//!
//! ```text
//! zellij pipe --name zearch::open -- 'pkg/server/main.go'
//! ```
//!
//! # Example
//!
//! ```rust
//! use zearch::{handle_event, initialize, Command, Config, Event};
//!
//! let mut browser = initialize(&Config::default());
//! let (_, commands) = handle_event(&mut browser, &Event::Char('x'))?;
//! assert!(matches!(&commands[0], Command::Fetch { url, .. } if url.ends_with("/search?q=x")));
//! # Ok::<(), zearch::ZearchError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Browser, Command, Event, InputMode, Settings, StalePolicy};
pub use domain::{Result, SearchResult, ZearchError};
pub use ui::Theme;

use app::effects::{DEFAULT_RESULT_LIMIT, DEFAULT_SERVER_URL};
use domain::filename::DEFAULT_LABEL_WIDTH;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/zearch.wasm" {
///     server_url "http://search.internal:8000"
///     result_limit "30"
///     label_width "60"
///     deep_link "false"
///     stale_responses "apply"
///     highlight_fallback "true"
///     file "cmd/server/main.go"
///     theme "catppuccin-latte"
///     theme_file "~/.config/zearch/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the code-search backend.
    pub server_url: String,

    /// Maximum number of results shown. Default: 18
    pub result_limit: usize,

    /// Label width before filenames are abbreviated. Default: 90
    pub label_width: usize,

    /// Remember the opened file as a location fragment. Default: `true`
    pub deep_link: bool,

    /// Handling of responses superseded by a newer request.
    pub stale_responses: StalePolicy,

    /// Show files in languages without a grammar as plain text.
    pub highlight_fallback: bool,

    /// File to open on load. Takes precedence over the stored location.
    pub file: Option<String>,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directives for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            label_width: DEFAULT_LABEL_WIDTH,
            deep_link: true,
            stale_responses: StalePolicy::default(),
            highlight_fallback: false,
            file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Values that are missing or fail to parse fall back to their defaults.
    /// Blank strings count as missing.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zearch::{Config, StalePolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("result_limit".to_string(), "5".to_string());
    /// map.insert("stale_responses".to_string(), "Apply".to_string());
    /// map.insert("label_width".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.result_limit, 5);
    /// assert_eq!(config.stale_responses, StalePolicy::Apply);
    /// assert_eq!(config.label_width, 90);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        Self {
            server_url: get("server_url").map_or(defaults.server_url, String::from),
            result_limit: get("result_limit")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.result_limit),
            label_width: get("label_width")
                .and_then(|v| v.parse().ok())
                .filter(|w| *w > 0)
                .unwrap_or(defaults.label_width),
            deep_link: get("deep_link")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.deep_link),
            stale_responses: get("stale_responses")
                .and_then(StalePolicy::parse)
                .unwrap_or(defaults.stale_responses),
            highlight_fallback: get("highlight_fallback")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.highlight_fallback),
            file: get("file").map(String::from),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(String::from),
            trace_level: get("trace_level").map(String::from),
        }
    }

    /// Runtime settings for the effects.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            server_url: self.server_url.clone(),
            result_limit: self.result_limit,
            label_width: self.label_width,
            deep_link: self.deep_link,
            highlight_fallback: self.highlight_fallback,
            stale_responses: self.stale_responses,
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// Failures are logged and fall through to the next candidate.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates a browser with the store and effects wired up.
///
/// Nothing is fetched until the shim sends [`Event::Load`].
#[must_use]
pub fn initialize(config: &Config) -> Browser {
    tracing::debug!(server_url = %config.server_url, "initializing zearch plugin");
    Browser::new(config.settings(), config.theme())
}
