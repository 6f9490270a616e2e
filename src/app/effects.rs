//! Store effects: subscriptions that turn state changes into render-target
//! updates, follow-up actions and outbound commands.
//!
//! [`wire`] registers the effects in a fixed order. Order matters: every
//! effect sees the same state within one notification pass, and follow-up
//! actions they queue are applied only after all of them ran.
//!
//! | # | watches            | equality | effect                                   |
//! |---|--------------------|----------|------------------------------------------|
//! | 1 | `file`             | ref      | code view; refetch a re-opened failure   |
//! | 2 | `file.name`        | value    | breadcrumbs                              |
//! | 3 | `file.name`        | value    | dispatch `clear_query`                   |
//! | 4 | `file.name`        | value    | fetch `/files/{name}`                    |
//! | 5 | `file.name`        | value    | write the location fragment (deep links) |
//! | 6 | `query.is_querying`| value    | progress indicator                       |
//! | 7 | `query.result`     | ref      | result list                              |
//! | 8 | `query.term`       | value    | dispatch `fetch_query_result` + search   |

use super::commands::Command;
use super::location::{encode_path, fragment_for};
use super::requests::{RequestKind, RequestTracker, StalePolicy};
use crate::domain::{filename, SearchResult};
use crate::store::action::{clear_query, fetch_query_result};
use crate::store::{by_ref, by_value, AppState, Context, FileState, Store, Subscription};
use crate::ui::highlight::Highlighter;
use crate::ui::view::{CodeBlock, CodeView, FileItem, View};
use std::sync::Arc;

/// Default backend address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Default number of results shown.
pub const DEFAULT_RESULT_LIMIT: usize = 18;

/// Behaviour switches for the effects, taken from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Backend base URL, without a trailing slash.
    pub server_url: String,
    /// Maximum number of results put in the list.
    pub result_limit: usize,
    /// Label width before filenames are abbreviated.
    pub label_width: usize,
    /// Write the location fragment when a file is selected.
    pub deep_link: bool,
    /// Show files without a grammar as plain text instead of skipping them.
    pub highlight_fallback: bool,
    /// What to do with superseded responses.
    pub stale_responses: StalePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            label_width: filename::DEFAULT_LABEL_WIDTH,
            deep_link: true,
            highlight_fallback: false,
            stale_responses: StalePolicy::default(),
        }
    }
}

/// Environment lent to effects on every dispatch.
#[derive(Debug, Default)]
pub struct Effects {
    /// Render targets.
    pub view: View,
    /// Commands waiting for the plugin runtime.
    pub commands: Vec<Command>,
    pub requests: RequestTracker,
    pub highlighter: Highlighter,
    pub settings: Settings,
}

impl Effects {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Drains the queued commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    fn fetch(&mut self, kind: RequestKind, path: &str) {
        let request = self.requests.issue(kind);
        let url = format!("{}{path}", self.settings.server_url.trim_end_matches('/'));
        tracing::debug!(%request, url = %url, "request issued");
        self.commands.push(Command::Fetch { url, request });
    }
}

fn file_path(name: &str) -> String {
    format!("/files/{}", encode_path(name))
}

fn file_name(state: &AppState) -> Option<String> {
    state.file.name.clone()
}

/// Registers every effect on `store`, in order.
pub fn wire(store: &mut Store<Effects>) {
    store.subscribe(Subscription::new(
        "file:code",
        |s: &AppState| Some(Arc::clone(&s.file)),
        by_ref,
        |file: Option<&Arc<FileState>>, cx: &mut Context<'_, Effects>| {
            if let Some(file) = file {
                render_code(cx.env(), file);
            }
        },
    ));

    store.subscribe(Subscription::new(
        "file.name:breadcrumbs",
        file_name,
        by_value,
        |name: Option<&String>, cx: &mut Context<'_, Effects>| {
            cx.env().view.breadcrumbs.segments = filename::segments(name.map(String::as_str));
        },
    ));

    store.subscribe(Subscription::new(
        "file.name:clear_query",
        file_name,
        by_value,
        |_: Option<&String>, cx: &mut Context<'_, Effects>| cx.dispatch(clear_query()),
    ));

    store.subscribe(Subscription::new(
        "file.name:fetch",
        file_name,
        by_value,
        |name: Option<&String>, cx: &mut Context<'_, Effects>| {
            if let Some(name) = name {
                cx.env().fetch(RequestKind::File, &file_path(name));
            }
        },
    ));

    store.subscribe(Subscription::new(
        "file.name:location",
        file_name,
        by_value,
        |name: Option<&String>, cx: &mut Context<'_, Effects>| {
            let fx = cx.env();
            if let (true, Some(name)) = (fx.settings.deep_link, name) {
                fx.commands.push(Command::SetLocation {
                    fragment: fragment_for(name),
                });
            }
        },
    ));

    store.subscribe(Subscription::new(
        "query.is_querying:indicator",
        |s: &AppState| Some(s.query.is_querying),
        by_value,
        |busy: Option<&bool>, cx: &mut Context<'_, Effects>| {
            cx.env().view.indicator.busy = busy.copied().unwrap_or(false);
        },
    ));

    store.subscribe(Subscription::new(
        "query.result:files",
        |s: &AppState| Some(Arc::clone(&s.query.result)),
        by_ref,
        |result: Option<&Arc<SearchResult>>, cx: &mut Context<'_, Effects>| {
            if let Some(result) = result {
                render_file_list(cx.env(), result);
            }
        },
    ));

    store.subscribe(Subscription::new(
        "query.term:search",
        |s: &AppState| s.query.term.clone(),
        by_value,
        |term: Option<&String>, cx: &mut Context<'_, Effects>| match term {
            Some(term) => {
                cx.dispatch(fetch_query_result());
                cx.env().fetch(RequestKind::Search, &format!("/search?q={}", urlencoding::encode(term)));
            }
            None => cx.env().requests.invalidate(RequestKind::Search),
        },
    ));
}

fn render_code(fx: &mut Effects, file: &FileState) {
    let Some(name) = file.name.as_deref().filter(|n| !n.is_empty()) else {
        return;
    };

    if let Some(message) = &file.error {
        fx.view.code = CodeView::Failed {
            name: name.to_string(),
            message: message.clone(),
        };
        return;
    }

    let Some(content) = file.content.as_deref() else {
        // Same name again after a failure: the name-keyed fetch stays quiet.
        if matches!(&fx.view.code, CodeView::Failed { name: failed, .. } if failed == name) {
            tracing::debug!(file = %name, "failed file re-opened, fetching again");
            fx.view.code = CodeView::Empty;
            fx.fetch(RequestKind::File, &file_path(name));
        }
        return;
    };

    let language = filename::language(name);
    let (language, lines) = match fx.highlighter.highlight(content, language) {
        Some(lines) => (Some(language.to_string()), lines),
        None if fx.settings.highlight_fallback => (None, fx.highlighter.plain(content)),
        None => {
            tracing::debug!(file = %name, language, "no grammar for file, code view left as is");
            return;
        }
    };

    tracing::debug!(file = %name, lines = lines.len(), "code view rendered");
    fx.view.code = CodeView::Code(CodeBlock {
        name: name.to_string(),
        language,
        lines,
        scroll: 0,
    });
}

fn render_file_list(fx: &mut Effects, result: &SearchResult) {
    let width = fx.settings.label_width;
    let items = result
        .first(fx.settings.result_limit)
        .iter()
        .map(|filename| FileItem {
            filename: filename.clone(),
            label: filename::to_label(filename, width),
        })
        .collect();
    fx.view.files.replace(items);
}
