//! Event handling and state transition logic.
//!
//! The plugin shim translates host events (keys, web responses, pipe
//! messages) into [`Event`]s and hands them to [`handle_event`], which updates
//! the browser and returns whether to re-render plus the commands to execute.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`
//! - **Focus**: `FocusSearch`, `FocusResults`, `FocusCode`, `Escape`
//! - **Navigation**: `SelectionDown`, `SelectionUp`, `OpenSelected`,
//!   `ScrollDown`, `ScrollUp`, `PageDown`, `PageUp`
//! - **Host**: `Response`, `LocationChanged`, `Load`, `CloseFocus`

use super::browser::Browser;
use super::commands::Command;
use super::modes::InputMode;
use super::requests::RequestId;
use crate::domain::error::Result;
use crate::store::action::{set_file, set_query_term};

/// Events produced by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character of the search input.
    Backspace,
    /// Focuses the search bar and searches for the current input.
    FocusSearch,
    /// Moves focus to the result list, if it has entries.
    FocusResults,
    /// Moves focus to the code view.
    FocusCode,
    /// Leaves the search bar.
    Escape,

    /// Moves the result cursor down (wraps to top).
    SelectionDown,
    /// Moves the result cursor up (wraps to bottom).
    SelectionUp,
    /// Opens the file under the result cursor.
    OpenSelected,

    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,

    /// Hides the plugin pane.
    CloseFocus,

    /// A fetch issued through [`Command::Fetch`] completed.
    Response {
        /// Identity of the request this answers.
        request: RequestId,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// The location fragment changed outside the browser.
    LocationChanged(String),

    /// The plugin finished loading and may talk to the network.
    Load {
        /// Fragment to open first, if any.
        fragment: Option<String>,
    },
}

/// Processes an event and returns `(should_render, commands)`.
///
/// # Errors
///
/// Returns dispatch cascade errors from the store and decoding errors from
/// malformed location fragments. The browser stays usable after an error.
pub fn handle_event(browser: &mut Browser, event: &Event) -> Result<(bool, Vec<Command>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    let render = match event {
        Event::Char(c) => {
            browser.input.push(*c);
            browser.input_mode = InputMode::Search;
            dispatch_input(browser)?
        }
        Event::Backspace => {
            browser.input.pop();
            browser.input_mode = InputMode::Search;
            dispatch_input(browser)?
        }
        Event::FocusSearch => {
            browser.input_mode = InputMode::Search;
            dispatch_input(browser)?
        }
        Event::FocusResults => {
            if browser.view().files.is_empty() {
                tracing::debug!("no results to focus");
                false
            } else {
                browser.input_mode = InputMode::Results;
                true
            }
        }
        Event::FocusCode => {
            browser.input_mode = InputMode::Code;
            true
        }
        Event::Escape => match browser.input_mode {
            InputMode::Search if browser.view().files.is_empty() => {
                browser.input_mode = InputMode::Code;
                true
            }
            InputMode::Search => {
                browser.input_mode = InputMode::Results;
                true
            }
            InputMode::Results | InputMode::Code => false,
        },
        Event::SelectionDown => {
            browser.input_mode = InputMode::Results;
            browser.view_mut().files.move_down();
            true
        }
        Event::SelectionUp => {
            browser.input_mode = InputMode::Results;
            browser.view_mut().files.move_up();
            true
        }
        Event::OpenSelected => {
            let Some(filename) = browser.view().files.selected().map(|item| item.filename.clone()) else {
                tracing::debug!("no file selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(file = %filename, "opening selected file");
            browser.input_mode = InputMode::Code;
            browser.dispatch(set_file(filename))?;
            true
        }
        Event::ScrollDown => scroll(browser, 1),
        Event::ScrollUp => scroll(browser, -1),
        Event::PageDown => scroll(browser, page(browser)),
        Event::PageUp => scroll(browser, -page(browser)),
        Event::CloseFocus => return Ok((false, vec![Command::CloseFocus])),
        Event::Response { request, status, body } => browser.receive(*request, *status, body)?,
        Event::LocationChanged(fragment) => browser.apply_location(fragment)?,
        Event::Load { fragment } => {
            if let Some(fragment) = fragment {
                browser.apply_location(fragment)?;
            }
            dispatch_input(browser)?
        }
    };

    let commands = browser.take_commands();
    tracing::debug!(render, command_count = commands.len(), "event handled");
    Ok((render, commands))
}

/// Dispatches the current input as the search term.
fn dispatch_input(browser: &mut Browser) -> Result<bool> {
    let term = browser.input.clone();
    browser.dispatch(set_query_term(term))?;
    Ok(true)
}

fn scroll(browser: &mut Browser, delta: isize) -> bool {
    browser.input_mode = InputMode::Code;
    browser.view_mut().code.scroll_by(delta);
    true
}

fn page(browser: &Browser) -> isize {
    isize::try_from(browser.page_rows()).unwrap_or(isize::MAX)
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::FocusSearch => "FocusSearch",
        Event::FocusResults => "FocusResults",
        Event::FocusCode => "FocusCode",
        Event::Escape => "Escape",
        Event::SelectionDown => "SelectionDown",
        Event::SelectionUp => "SelectionUp",
        Event::OpenSelected => "OpenSelected",
        Event::ScrollDown => "ScrollDown",
        Event::ScrollUp => "ScrollUp",
        Event::PageDown => "PageDown",
        Event::PageUp => "PageUp",
        Event::CloseFocus => "CloseFocus",
        Event::Response { .. } => "Response",
        Event::LocationChanged(_) => "LocationChanged",
        Event::Load { .. } => "Load",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::effects::Settings;
    use crate::domain::SearchResult;
    use crate::store::action::set_query_result;
    use crate::ui::Theme;

    fn browser() -> Browser {
        Browser::new(Settings::default(), Theme::default())
    }

    fn urls(commands: &[Command]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Fetch { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn typing_searches_for_the_whole_input() {
        let mut b = browser();
        handle_event(&mut b, &Event::Char('f')).unwrap();
        let (render, commands) = handle_event(&mut b, &Event::Char('o')).unwrap();

        assert!(render);
        assert_eq!(urls(&commands), vec!["http://127.0.0.1:8000/search?q=fo"]);
        assert_eq!(b.state().query.term.as_deref(), Some("fo"));

        let (_, commands) = handle_event(&mut b, &Event::Backspace).unwrap();
        assert_eq!(urls(&commands), vec!["http://127.0.0.1:8000/search?q=f"]);
    }

    #[test]
    fn focusing_search_repeats_the_current_input() {
        let mut b = browser();
        let (_, commands) = handle_event(&mut b, &Event::FocusSearch).unwrap();
        assert_eq!(urls(&commands), vec!["http://127.0.0.1:8000/search?q="]);
    }

    #[test]
    fn open_selected_dispatches_set_file() {
        let mut b = browser();
        b.dispatch(set_query_result(SearchResult::new(vec!["a.go".into(), "b/c.go".into()])))
            .unwrap();

        handle_event(&mut b, &Event::SelectionDown).unwrap();
        let (_, commands) = handle_event(&mut b, &Event::OpenSelected).unwrap();

        assert_eq!(b.state().file.name.as_deref(), Some("b/c.go"));
        assert_eq!(b.input_mode, InputMode::Code);
        assert_eq!(urls(&commands), vec!["http://127.0.0.1:8000/files/b/c.go"]);
        assert!(b.view().files.is_empty());
    }

    #[test]
    fn open_without_results_does_nothing() {
        let mut b = browser();
        assert_eq!(handle_event(&mut b, &Event::OpenSelected).unwrap(), (false, vec![]));
    }

    #[test]
    fn focus_results_needs_results() {
        let mut b = browser();
        assert!(!handle_event(&mut b, &Event::FocusResults).unwrap().0);
        assert_eq!(b.input_mode, InputMode::Search);
    }

    #[test]
    fn escape_leaves_search_for_the_visible_pane() {
        let mut b = browser();
        handle_event(&mut b, &Event::Escape).unwrap();
        assert_eq!(b.input_mode, InputMode::Code);

        b.input_mode = InputMode::Search;
        b.dispatch(set_query_result(SearchResult::new(vec!["a.go".into()]))).unwrap();
        handle_event(&mut b, &Event::Escape).unwrap();
        assert_eq!(b.input_mode, InputMode::Results);
    }

    #[test]
    fn close_focus_is_passed_through() {
        let mut b = browser();
        assert_eq!(
            handle_event(&mut b, &Event::CloseFocus).unwrap(),
            (false, vec![Command::CloseFocus])
        );
    }

    #[test]
    fn load_opens_the_fragment_then_searches_the_input() {
        let mut b = browser();
        let (_, commands) = handle_event(
            &mut b,
            &Event::Load {
                fragment: Some("#pkg%2Fx.go".to_string()),
            },
        )
        .unwrap();

        assert_eq!(
            urls(&commands),
            vec!["http://127.0.0.1:8000/files/pkg/x.go", "http://127.0.0.1:8000/search?q="]
        );
        assert_eq!(b.input_mode, InputMode::Code);
        assert_eq!(b.state().file.name.as_deref(), Some("pkg/x.go"));
    }

    #[test]
    fn load_without_fragment_runs_the_empty_search() {
        let mut b = browser();
        let (_, commands) = handle_event(&mut b, &Event::Load { fragment: None }).unwrap();
        assert_eq!(urls(&commands), vec!["http://127.0.0.1:8000/search?q="]);
    }

    #[test]
    fn bad_fragments_are_errors() {
        let mut b = browser();
        assert!(handle_event(&mut b, &Event::LocationChanged("#%FF".to_string())).is_err());
        assert!(!handle_event(&mut b, &Event::LocationChanged("#".to_string())).unwrap().0);
    }
}
