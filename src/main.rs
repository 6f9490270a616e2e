//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zearch library and the Zellij plugin
//! system. It translates host events into library [`Event`]s and executes the
//! returned [`Command`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create the `Browser`
//! 2. **Subscribe**: Register for Key, `WebRequestResult` and permission events
//! 3. **Permissions granted**: Open the location store and send `Event::Load`
//!    with the configured file or the stored location
//! 4. **Update**: Handle events, delegate to the library
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → editing, navigation and scrolling events, by input mode
//! - `WebRequestResult` → `Event::Response`, matched by its request context
//! - pipe `zearch::open` → `Event::LocationChanged`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move through results
//! - `Ctrl+d` / `Ctrl+u`: Page the code view
//! - `Ctrl+q`: Close plugin
//!
//! Search bar:
//! - Characters, `Backspace`: Edit the term (searches on every change)
//! - `Enter` / `Down`: Move to the results
//! - `Esc`: Leave the search bar
//!
//! Results:
//! - `j`/`k`, `Down`/`Up`: Navigate
//! - `Enter`: Open the selected file
//! - `/`: Search, `c`: Code view, `q`: Close plugin
//!
//! Code view:
//! - `j`/`k`, `Down`/`Up`: Scroll
//! - `PageDown`/`PageUp`, `Space`: Page
//! - `/`: Search, `r`: Results, `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zearch::app::location::fragment_for;
use zearch::app::RequestId;
use zearch::storage::{JsonLocationStore, LocationStore};
use zearch::{handle_event, Browser, Command, Config, Event, InputMode};

register_plugin!(State);

/// Pipe name used to open files from outside the plugin.
const OPEN_PIPE: &str = "zearch::open";

/// Plugin state wrapper.
struct State {
    /// Core application state from the library.
    browser: Browser,

    /// File to open on load, from configuration.
    initial_file: Option<String>,

    /// Persisted location; opened once host access is granted.
    locations: Option<JsonLocationStore>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            browser: zearch::initialize(&Config::default()),
            initial_file: None,
            locations: None,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the code-search backend
    /// - `FullHdAccess`: Persist the last location under the data directory
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zearch::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(server_url = %config.server_url, "parsed configuration");
        self.browser = zearch::initialize(&config);
        self.initial_file.clone_from(&config.file);

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match self.handle_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.process(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != OPEN_PIPE {
            return false;
        }
        let Some(payload) = pipe_message.payload.as_deref().map(str::trim) else {
            tracing::debug!("open pipe without payload");
            return false;
        };

        let fragment = if payload.starts_with('#') {
            payload.to_string()
        } else {
            fragment_for(payload)
        };
        tracing::debug!(fragment = %fragment, "location changed through pipe");
        self.process(&Event::LocationChanged(fragment))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.browser.set_viewport(rows);
        zearch::ui::render(&self.browser, rows, cols);
    }
}

impl State {
    fn process(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.browser, event) {
            Ok((should_render, commands)) => {
                tracing::debug!(command_count = commands.len(), should_render, "event handled successfully");
                for command in &commands {
                    self.execute_command(command);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                true
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::SelectionDown),
                BareKey::Char('p') => Some(Event::SelectionUp),
                BareKey::Char('d') => Some(Event::PageDown),
                BareKey::Char('u') => Some(Event::PageUp),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        Some(match self.browser.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Enter | BareKey::Down => Event::FocusResults,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Results => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::SelectionDown,
                BareKey::Up | BareKey::Char('k') => Event::SelectionUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Esc | BareKey::Char('c') => Event::FocusCode,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
            InputMode::Code => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::ScrollDown,
                BareKey::Up | BareKey::Char('k') => Event::ScrollUp,
                BareKey::PageDown | BareKey::Char(' ') => Event::PageDown,
                BareKey::PageUp => Event::PageUp,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('r') => Event::FocusResults,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request) = RequestId::from_context(context) else {
            tracing::debug!(status, "web request result without request context");
            return None;
        };
        tracing::debug!(%request, status, body_len = body.len(), "web request result");
        Some(Event::Response { request, status, body })
    }

    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading");
                Some(Event::Load {
                    fragment: self.startup_fragment(),
                })
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin functionality limited");
                None
            }
        }
    }

    /// The configured file wins over the stored location.
    fn startup_fragment(&mut self) -> Option<String> {
        match JsonLocationStore::in_dir(&zearch::infrastructure::get_data_dir()) {
            Ok(store) => self.locations = Some(store),
            Err(e) => tracing::warn!(error = %e, "location storage unavailable"),
        }

        if let Some(file) = &self.initial_file {
            return Some(fragment_for(file));
        }

        let store = self.locations.as_ref()?;
        match store.load() {
            Ok(record) => record.map(|r| r.fragment),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load stored location");
                None
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_command(&mut self, command: &Command) {
        match command {
            Command::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Command::Fetch { url, request } => {
                tracing::debug!(url = %url, %request, "sending web request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], request.to_context());
            }
            Command::SetLocation { fragment } => {
                let Some(store) = self.locations.as_mut() else {
                    tracing::debug!("location storage unavailable, fragment not saved");
                    return;
                };
                if let Err(e) = store.save(fragment) {
                    tracing::warn!(error = %e, "failed to save location");
                }
            }
        }
    }
}
