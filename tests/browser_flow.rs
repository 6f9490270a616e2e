//! End-to-end flows through `Browser`, with the backend answered by hand.

use zearch::app::{RequestId, RequestKind};
use zearch::store::action::{set_file, set_query_term};
use zearch::ui::highlight::TokenKind;
use zearch::ui::view::CodeView;
use zearch::{handle_event, initialize, Browser, Command, Config, Event, StalePolicy};

const SERVER: &str = "http://127.0.0.1:8000";

fn fetches(commands: &[Command]) -> Vec<(String, RequestId)> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Fetch { url, request } => Some((url.clone(), *request)),
            _ => None,
        })
        .collect()
}

fn respond(browser: &mut Browser, request: RequestId, status: u16, body: &str) -> bool {
    handle_event(
        browser,
        &Event::Response {
            request,
            status,
            body: body.as_bytes().to_vec(),
        },
    )
    .unwrap()
    .0
}

fn with_policy(policy: StalePolicy) -> Browser {
    initialize(&Config {
        stale_responses: policy,
        ..Config::default()
    })
}

#[test]
fn search_for_foo_lists_the_returned_documents() {
    let mut browser = initialize(&Config::default());

    browser.dispatch(set_query_term("foo")).unwrap();
    let sent = fetches(&browser.take_commands());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, format!("{SERVER}/search?q=foo"));
    assert!(browser.state().query.is_querying);
    assert!(browser.view().indicator.busy);

    respond(&mut browser, sent[0].1, 200, r#"{"Docs":["x.go","y.go"]}"#);

    let listed: Vec<&str> = browser.view().files.items.iter().map(|i| i.filename.as_str()).collect();
    assert_eq!(listed, vec!["x.go", "y.go"]);
    assert!(!browser.state().query.is_querying);
    assert!(!browser.view().indicator.busy);
}

#[test]
fn result_list_is_capped_at_eighteen() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_query_term("f")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    let docs: Vec<String> = (0..25).map(|i| format!("\"f{i}.go\"")).collect();
    respond(&mut browser, request, 200, &format!("{{\"Docs\":[{}]}}", docs.join(",")));

    let items = &browser.view().files.items;
    assert_eq!(items.len(), 18);
    assert_eq!(items[0].filename, "f0.go");
    assert_eq!(items[17].filename, "f17.go");
    assert_eq!(browser.state().query.result.docs.len(), 25);
}

#[test]
fn null_docs_mean_no_results() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_query_term("zzz")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, request, 200, r#"{"Docs":null}"#);

    assert!(browser.view().files.is_empty());
    assert!(browser.state().query.error.is_none());
}

#[test]
fn terms_are_url_encoded() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_query_term("a&b c/d")).unwrap();
    let sent = fetches(&browser.take_commands());
    assert_eq!(sent[0].0, format!("{SERVER}/search?q=a%26b%20c%2Fd"));
}

#[test]
fn opening_a_go_file_renders_breadcrumbs_and_highlighted_code() {
    let mut browser = initialize(&Config::default());

    browser.dispatch(set_file("pkg/x.go")).unwrap();
    let commands = browser.take_commands();

    assert_eq!(browser.view().breadcrumbs.segments, vec!["pkg", "x.go"]);
    let sent = fetches(&commands);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, format!("{SERVER}/files/pkg/x.go"));
    assert_eq!(sent[0].1.kind, RequestKind::File);
    assert!(commands.contains(&Command::SetLocation {
        fragment: "#pkg%2Fx.go".to_string()
    }));

    respond(&mut browser, sent[0].1, 200, "package x");

    let block = browser.view().code.block().expect("code rendered");
    assert_eq!(block.language.as_deref(), Some("go"));
    let first = &block.lines[0];
    assert_eq!(first[0].kind, TokenKind::Keyword);
    assert_eq!(first[0].text, "package");
}

#[test]
fn selecting_a_file_clears_the_query() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_query_term("x")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);
    respond(&mut browser, request, 200, r#"{"Docs":["x.go"]}"#);

    browser.dispatch(set_file("x.go")).unwrap();

    assert_eq!(browser.state().query.term, None);
    assert!(browser.state().query.result.is_empty());
    assert!(browser.view().files.is_empty());
}

#[test]
fn unknown_language_is_skipped_without_fallback() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_file("notes.txt")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, request, 200, "hello");

    assert_eq!(browser.view().code, CodeView::Empty);
}

#[test]
fn unknown_language_falls_back_to_plain_when_enabled() {
    let mut browser = initialize(&Config {
        highlight_fallback: true,
        ..Config::default()
    });
    browser.dispatch(set_file("notes.txt")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, request, 200, "hello");

    let block = browser.view().code.block().expect("plain render");
    assert_eq!(block.language, None);
    assert_eq!(block.lines[0][0].text, "hello");
}

#[test]
fn stale_search_results_are_discarded_by_default() {
    let mut browser = with_policy(StalePolicy::Discard);

    browser.dispatch(set_query_term("fo")).unwrap();
    let (_, older) = fetches(&browser.take_commands()).remove(0);
    browser.dispatch(set_query_term("foo")).unwrap();
    let (_, newer) = fetches(&browser.take_commands()).remove(0);

    assert!(respond(&mut browser, newer, 200, r#"{"Docs":["foo.go"]}"#));
    assert!(!respond(&mut browser, older, 200, r#"{"Docs":["fo.go","fox.go"]}"#));

    assert_eq!(browser.state().query.result.docs, vec!["foo.go".to_string()]);
}

#[test]
fn stale_search_results_overwrite_when_applied() {
    let mut browser = with_policy(StalePolicy::Apply);

    browser.dispatch(set_query_term("fo")).unwrap();
    let (_, older) = fetches(&browser.take_commands()).remove(0);
    browser.dispatch(set_query_term("foo")).unwrap();
    let (_, newer) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, newer, 200, r#"{"Docs":["foo.go"]}"#);
    assert!(respond(&mut browser, older, 200, r#"{"Docs":["fo.go","fox.go"]}"#));

    assert_eq!(browser.state().query.result.docs.len(), 2);
}

#[test]
fn content_for_a_previous_file_is_discarded() {
    let mut browser = with_policy(StalePolicy::Discard);

    browser.dispatch(set_file("a.go")).unwrap();
    let (_, first) = fetches(&browser.take_commands()).remove(0);
    browser.dispatch(set_file("b.go")).unwrap();
    let (_, second) = fetches(&browser.take_commands()).remove(0);

    assert!(!respond(&mut browser, first, 200, "package a"));
    assert!(browser.state().file.content.is_none());

    respond(&mut browser, second, 200, "package b");
    assert_eq!(browser.state().file.content.as_deref(), Some("package b"));
    assert_eq!(browser.view().code.block().map(|b| b.name.as_str()), Some("b.go"));
}

#[test]
fn failed_search_surfaces_an_error() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_query_term("x")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, request, 503, "unavailable");

    let query = &browser.state().query;
    assert!(!query.is_querying);
    assert!(query.error.as_deref().is_some_and(|e| e.contains("503")));
}

#[test]
fn failed_file_fetch_shows_an_error_panel() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_file("gone.go")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);

    respond(&mut browser, request, 404, "");

    assert!(matches!(&browser.view().code, CodeView::Failed { name, .. } if name == "gone.go"));
}

#[test]
fn location_changes_are_deduplicated() {
    let mut browser = initialize(&Config::default());

    let (render, commands) =
        handle_event(&mut browser, &Event::LocationChanged("#cmd%2Fmain.go".to_string())).unwrap();
    assert!(render);
    assert_eq!(browser.state().file.name.as_deref(), Some("cmd/main.go"));
    assert_eq!(fetches(&commands).len(), 1);

    let (render, commands) =
        handle_event(&mut browser, &Event::LocationChanged("#cmd%2Fmain.go".to_string())).unwrap();
    assert!(!render);
    assert!(commands.is_empty());
}

#[test]
fn short_fragments_are_ignored() {
    let mut browser = initialize(&Config::default());
    let (render, commands) = handle_event(&mut browser, &Event::LocationChanged("#".to_string())).unwrap();
    assert!(!render);
    assert!(commands.is_empty());
    assert!(browser.state().file.name.is_none());
}

#[test]
fn echo_of_our_own_location_write_is_ignored() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_file("pkg/x.go")).unwrap();
    browser.take_commands();

    let (render, commands) =
        handle_event(&mut browser, &Event::LocationChanged("#pkg%2Fx.go".to_string())).unwrap();
    assert!(!render);
    assert!(commands.is_empty());
}

#[test]
fn deep_links_can_be_disabled() {
    let mut browser = initialize(&Config {
        deep_link: false,
        ..Config::default()
    });
    browser.dispatch(set_file("a.go")).unwrap();
    let commands = browser.take_commands();
    assert!(!commands.iter().any(|c| matches!(c, Command::SetLocation { .. })));
}

#[test]
fn typing_then_opening_a_result_end_to_end() {
    let mut browser = initialize(&Config::default());

    let (_, commands) = handle_event(&mut browser, &Event::Char('m')).unwrap();
    let (_, request) = fetches(&commands).remove(0);
    respond(&mut browser, request, 200, r#"{"Docs":["cmd/main.go","main_test.go"]}"#);

    handle_event(&mut browser, &Event::FocusResults).unwrap();
    handle_event(&mut browser, &Event::SelectionDown).unwrap();
    let (_, commands) = handle_event(&mut browser, &Event::OpenSelected).unwrap();

    let sent = fetches(&commands);
    assert_eq!(sent[0].0, format!("{SERVER}/files/main_test.go"));
    respond(&mut browser, sent[0].1, 200, "package main\n\nfunc TestX() {}\n");

    let frame = zearch::ui::render_frame(&browser.compute_viewmodel(20, 60), &browser.theme, 20, 60);
    let text = frame.plain_text();
    assert!(text.contains("main_test.go"));
    assert!(text.contains("package main"));
    assert!(text.contains("func TestX() {}"));
}

#[test]
fn control_sequences_from_the_backend_never_reach_the_terminal() {
    let mut browser = initialize(&Config::default());

    browser.dispatch(set_query_term("evil")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);
    respond(&mut browser, request, 200, "{\"Docs\":[\"evil\\u001b[2J.go\"]}");
    assert_eq!(browser.view().files.items[0].label, "evil\u{FFFD}[2J.go");

    browser.dispatch(set_file("evil.go")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);
    respond(&mut browser, request, 200, "package x // \x1b[2J\x1b]0;pwned\x07 \r tail");

    let frame = zearch::ui::render_frame(&browser.compute_viewmodel(20, 60), &browser.theme, 20, 60);
    let painted = frame.as_str();
    assert!(!painted.contains("\x1b[2J"));
    assert!(!painted.contains("\x1b]0;"));
    assert!(!painted.contains('\x07'));
    assert!(!painted.contains('\r'));
    assert!(frame.plain_text().contains("\u{FFFD} tail"));
}

#[test]
fn reopening_a_file_after_a_failed_fetch_retries() {
    let mut browser = initialize(&Config::default());
    browser.dispatch(set_file("a.go")).unwrap();
    let (_, request) = fetches(&browser.take_commands()).remove(0);
    respond(&mut browser, request, 503, "");
    assert!(matches!(browser.view().code, CodeView::Failed { .. }));

    browser.dispatch(set_file("a.go")).unwrap();
    let sent = fetches(&browser.take_commands());
    assert_eq!(sent.len(), 1);
    assert_eq!(browser.view().code, CodeView::Empty);

    respond(&mut browser, sent[0].1, 200, "package a");
    assert_eq!(browser.state().file.error, None);
    assert_eq!(browser.view().code.block().map(|b| b.name.as_str()), Some("a.go"));
}
