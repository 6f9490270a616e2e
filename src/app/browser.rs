//! The browser: store, effects and input state of one plugin instance.
//!
//! [`Browser`] is what the plugin shim holds. It owns the store together with
//! the effect environment the store dispatches into, keeps the search input
//! and focus, applies network responses under the stale policy, and computes
//! the view model the renderer paints.

use super::commands::Command;
use super::effects::{wire, Effects, Settings};
use super::location::decode_fragment;
use super::modes::InputMode;
use super::requests::{RequestId, RequestKind, StalePolicy};
use crate::domain::error::{Result, ZearchError};
use crate::domain::text::printable;
use crate::domain::SearchResult;
use crate::store::action::{file_content, file_failed, query_failed, set_file, set_query_result};
use crate::store::{Action, AppState, Store};
use crate::ui::theme::Theme;
use crate::ui::view::View;
use crate::ui::viewmodel::{
    Body, CodePane, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by everything but the body: top margin, header, two borders,
/// the three-line search bar and the footer.
const CHROME_ROWS: usize = 8;

/// Application state of one plugin instance.
#[derive(Debug)]
pub struct Browser {
    store: Store<Effects>,
    effects: Effects,

    /// Text of the search bar.
    pub input: String,

    /// Current key focus.
    pub input_mode: InputMode,

    /// Last location fragment seen or written; equal fragments are ignored.
    last_fragment: Option<String>,

    /// Body height of the last rendered frame, used for paging.
    page_rows: usize,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl Browser {
    /// Creates a browser with every effect wired.
    #[must_use]
    pub fn new(settings: Settings, theme: Theme) -> Self {
        let mut store = Store::new();
        wire(&mut store);

        Self {
            store,
            effects: Effects::new(settings),
            input: String::new(),
            input_mode: InputMode::default(),
            last_fragment: None,
            page_rows: 20,
            theme,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        self.store.state()
    }

    #[must_use]
    pub const fn view(&self) -> &View {
        &self.effects.view
    }

    /// Mutable render targets, for cursor and scroll movement.
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.effects.view
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.effects.settings
    }

    #[must_use]
    pub const fn page_rows(&self) -> usize {
        self.page_rows
    }

    /// Records the terminal height so paging moves by one screen.
    pub fn set_viewport(&mut self, rows: usize) {
        self.page_rows = rows.saturating_sub(CHROME_ROWS).max(1);
    }

    /// Dispatches an action through the store and its effects.
    ///
    /// # Errors
    ///
    /// Propagates [`ZearchError::DispatchCascade`] from the store.
    pub fn dispatch(&mut self, action: Action) -> Result<usize> {
        self.store.dispatch(action, &mut self.effects)
    }

    /// Drains the commands queued by effects.
    ///
    /// Location fragments written by the browser itself are remembered, so
    /// hearing them back later does not select the file a second time.
    pub fn take_commands(&mut self) -> Vec<Command> {
        let commands = self.effects.take_commands();
        for command in &commands {
            if let Command::SetLocation { fragment } = command {
                self.last_fragment = Some(fragment.clone());
            }
        }
        commands
    }

    /// Selects the file a location fragment points at.
    ///
    /// Returns `Ok(false)` when the fragment was ignored: it equals the last
    /// one seen, or it is too short to name a file.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::Location`] for fragments that do not decode.
    pub fn apply_location(&mut self, fragment: &str) -> Result<bool> {
        if self.last_fragment.as_deref() == Some(fragment) {
            tracing::debug!(fragment, "location unchanged");
            return Ok(false);
        }
        self.last_fragment = Some(fragment.to_string());

        let Some(filename) = decode_fragment(fragment)? else {
            return Ok(false);
        };
        tracing::debug!(filename = %filename, "location selects file");
        self.input_mode = InputMode::Code;
        self.dispatch(set_file(filename))?;
        Ok(true)
    }

    /// Applies a network response.
    ///
    /// Responses superseded by a newer request of the same kind are dropped
    /// or applied according to the configured [`StalePolicy`]. Failures turn
    /// into `query_failed` / `file_failed` actions. Returns `Ok(false)` when
    /// the response was dropped.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub fn receive(&mut self, request: RequestId, status: u16, body: &[u8]) -> Result<bool> {
        let _span = tracing::debug_span!("receive", %request, status, bytes = body.len()).entered();

        if !self.effects.requests.is_current(request) {
            match self.effects.settings.stale_responses {
                StalePolicy::Discard => {
                    tracing::debug!("stale response discarded");
                    return Ok(false);
                }
                StalePolicy::Apply => tracing::debug!("stale response applied"),
            }
        }

        let action = match request.kind {
            RequestKind::Search => match parse_search(status, body) {
                Ok(result) => set_query_result(result),
                Err(e) => {
                    tracing::warn!(error = %e, "search failed");
                    query_failed(e.to_string())
                }
            },
            RequestKind::File if is_success(status) => {
                file_content(String::from_utf8_lossy(body).into_owned())
            }
            RequestKind::File => {
                let e = ZearchError::Http { status };
                tracing::warn!(error = %e, "file fetch failed");
                file_failed(e.to_string())
            }
        };

        self.dispatch(action)?;
        Ok(true)
    }

    /// Computes the view model for a `rows` x `cols` frame.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS);

        let body = if self.shows_results() {
            Body::Results(self.compute_display_items(available_rows))
        } else {
            self.compute_code_body(available_rows, cols)
        };

        UIViewModel {
            header: HeaderInfo {
                segments: self.effects.view.breadcrumbs.segments.clone(),
            },
            search_bar: self.compute_search_bar(),
            body,
            footer: self.compute_footer(),
        }
    }

    /// Results cover the code view unless the code view has focus.
    fn shows_results(&self) -> bool {
        self.input_mode != InputMode::Code && !self.effects.view.files.is_empty()
    }

    fn compute_display_items(&self, available_rows: usize) -> Vec<DisplayItem> {
        let files = &self.effects.view.files;

        let mut visible_start = files.selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(files.items.len());
        if visible_end - visible_start < available_rows && files.items.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let term = self.state().query.term.as_deref().unwrap_or_default();
        let matcher = (!term.is_empty()).then(SkimMatcherV2::default);

        files.items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, item)| DisplayItem {
                label: item.label.clone(),
                is_selected: self.input_mode == InputMode::Results
                    && visible_start + offset == files.selected,
                highlight_ranges: matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| highlight_ranges(&item.label, term, m)),
            })
            .collect()
    }

    fn compute_code_body(&self, available_rows: usize, cols: usize) -> Body {
        use crate::ui::view::CodeView;

        match &self.effects.view.code {
            CodeView::Code(block) => {
                let end = (block.scroll + available_rows).min(block.lines.len());
                Body::Code(CodePane {
                    first_line_number: block.scroll + 1,
                    gutter_width: block.lines.len().to_string().len(),
                    lines: block.lines[block.scroll.min(end)..end].to_vec(),
                    width: cols,
                })
            }
            CodeView::Failed { name, message } => Body::Message(EmptyState {
                message: format!("Could not load {}", printable(name)),
                subtitle: printable(message).into_owned(),
                is_error: true,
            }),
            CodeView::Empty if self.state().query.term.as_deref().is_some_and(|t| !t.is_empty()) => {
                Body::Message(EmptyState {
                    message: "No matching files".to_string(),
                    subtitle: "Keep typing or press Esc".to_string(),
                    is_error: false,
                })
            }
            CodeView::Empty => Body::Message(EmptyState {
                message: "Type to search".to_string(),
                subtitle: format!("Searching {}", self.effects.settings.server_url),
                is_error: false,
            }),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.input.clone(),
            focused: self.input_mode.is_typing(),
            busy: self.effects.view.indicator.busy,
            error: self.state().query.error.clone(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => "Type to search  Enter/Down: results  Esc: leave search  Ctrl+q: quit",
            InputMode::Results => "j/k: navigate  Enter: open  /: search  c: code  q: quit",
            InputMode::Code => "j/k: scroll  PgUp/PgDn: page  /: search  r: results  q: quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_search(status: u16, body: &[u8]) -> Result<SearchResult> {
    if !is_success(status) {
        return Err(ZearchError::Http { status });
    }
    SearchResult::from_json(body)
}

/// Coalesces fuzzy match indices of `pattern` in `text` into `(start, end)`
/// character ranges.
fn highlight_ranges(text: &str, pattern: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::action::set_query_term;

    fn browser() -> Browser {
        Browser::new(Settings::default(), Theme::default())
    }

    fn last_request(commands: &[Command]) -> RequestId {
        commands
            .iter()
            .rev()
            .find_map(|c| match c {
                Command::Fetch { request, .. } => Some(*request),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn highlight_ranges_coalesce_runs() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges("pkg/main.go", "main", &matcher), vec![(4, 8)]);
        assert!(highlight_ranges("abc", "xyz", &matcher).is_empty());
    }

    #[test]
    fn search_failure_clears_the_busy_flag() {
        let mut b = browser();
        b.dispatch(set_query_term("foo")).unwrap();
        let request = last_request(&b.take_commands());

        assert!(b.receive(request, 500, b"oops").unwrap());

        assert!(!b.state().query.is_querying);
        assert_eq!(
            b.state().query.error.as_deref(),
            Some("HTTP error: backend answered with status 500")
        );
        assert!(!b.view().indicator.busy);
    }

    #[test]
    fn malformed_json_is_reported() {
        let mut b = browser();
        b.dispatch(set_query_term("foo")).unwrap();
        let request = last_request(&b.take_commands());

        b.receive(request, 200, b"<html>").unwrap();

        assert!(b.state().query.error.as_deref().unwrap().starts_with("JSON error"));
    }

    #[test]
    fn own_location_writes_are_not_replayed() {
        let mut b = browser();
        b.dispatch(set_file("a.go")).unwrap();
        b.take_commands();

        assert!(!b.apply_location("#a.go").unwrap());
        assert!(b.apply_location("#b.go").unwrap());
        assert_eq!(b.state().file.name.as_deref(), Some("b.go"));
    }

    #[test]
    fn viewport_sets_the_page_size() {
        let mut b = browser();
        b.set_viewport(30);
        assert_eq!(b.page_rows(), 22);
        b.set_viewport(3);
        assert_eq!(b.page_rows(), 1);
    }

    #[test]
    fn empty_browser_invites_typing() {
        let vm = browser().compute_viewmodel(24, 80);
        assert!(vm.search_bar.focused);
        assert!(vm.header.segments.is_empty());
        match vm.body {
            Body::Message(empty) => assert_eq!(empty.message, "Type to search"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn result_window_follows_the_selection() {
        let mut b = browser();
        let docs = (0..18).map(|i| format!("f{i}.go")).collect();
        b.dispatch(set_query_result(SearchResult::new(docs))).unwrap();
        b.input_mode = InputMode::Results;
        for _ in 0..15 {
            b.view_mut().files.move_down();
        }

        let Body::Results(items) = b.compute_viewmodel(8 + 4, 80).body else {
            panic!("expected results");
        };
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["f13.go", "f14.go", "f15.go", "f16.go"]);
        assert!(items[2].is_selected);
    }
}
