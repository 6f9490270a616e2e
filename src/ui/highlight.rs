//! Syntax highlighting for the code view, backed by `syntect`.
//!
//! Languages are resolved against syntect's bundled Sublime syntaxes, by
//! extension or name. Each line is parsed into a scope stack, and the
//! innermost scope with a known class decides the [`TokenKind`]; colors come
//! from the plugin theme, not from a syntect theme. Output is split into
//! lines of [`Token`]s ready for painting.

use std::sync::OnceLock;

use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::domain::text::printable;

/// Lexical class of a token; selects its color in the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Comment,
    Number,
}

/// A run of text sharing one [`TokenKind`]. Never contains a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// One rendered source line.
pub type Line = Vec<Token>;

/// Scope prefixes checked in order; the first prefix of a scope wins.
const CLASSES: &[(&str, TokenKind)] = &[
    ("keyword.operator", TokenKind::Plain),
    ("keyword", TokenKind::Keyword),
    ("storage", TokenKind::Keyword),
    ("constant.language", TokenKind::Keyword),
    ("comment", TokenKind::Comment),
    ("string", TokenKind::String),
    ("constant.numeric", TokenKind::Number),
];

/// Syntax name syntect falls back to; it carries no scopes worth painting.
const PLAIN_TEXT: &str = "Plain Text";

struct Grammars {
    syntaxes: SyntaxSet,
    classes: Vec<(Scope, TokenKind)>,
}

fn grammars() -> &'static Grammars {
    static GRAMMARS: OnceLock<Grammars> = OnceLock::new();
    GRAMMARS.get_or_init(|| Grammars {
        syntaxes: SyntaxSet::load_defaults_newlines(),
        classes: CLASSES
            .iter()
            .filter_map(|(name, kind)| Scope::new(name).ok().map(|scope| (scope, *kind)))
            .collect(),
    })
}

/// Resolves languages and turns source text into highlighted lines.
///
/// The bundled syntax set is loaded once per process and shared by every
/// highlighter.
pub struct Highlighter {
    grammars: &'static Grammars,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("syntaxes", &self.grammars.syntaxes.syntaxes().len())
            .finish()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter over syntect's default syntaxes.
    #[must_use]
    pub fn new() -> Self {
        Self { grammars: grammars() }
    }

    /// Looks up the syntax for a language token: an extension (`rs`) or a
    /// syntax name (`rust`), case-insensitively.
    #[must_use]
    pub fn syntax(&self, language: &str) -> Option<&'static SyntaxReference> {
        let syntaxes = &self.grammars.syntaxes;
        syntaxes
            .find_syntax_by_token(language)
            .or_else(|| syntaxes.find_syntax_by_extension(language))
            .filter(|syntax| syntax.name != PLAIN_TEXT)
    }

    #[must_use]
    pub fn has_grammar(&self, language: &str) -> bool {
        self.syntax(language).is_some()
    }

    /// Highlights `content` as `language`.
    ///
    /// Returns `None` if no syntax is known for the language. A line the
    /// parser rejects ends highlighting; it and the rest stay plain.
    #[must_use]
    pub fn highlight(&self, content: &str, language: &str) -> Option<Vec<Line>> {
        let syntax = self.syntax(language)?;
        let _span =
            tracing::trace_span!("highlight", language = %syntax.name, bytes = content.len()).entered();

        let text = printable(content);
        let mut state = Some(ParseState::new(syntax));
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for source in LinesWithEndings::from(&*text) {
            let line = match state.as_mut() {
                Some(parser) => match self.classify(parser, &mut stack, source) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::debug!(language = %syntax.name, error = %e, "parse failed, rest left plain");
                        state = None;
                        plain_line(source)
                    }
                },
                None => plain_line(source),
            };
            lines.push(line);
        }

        Some(non_empty(lines))
    }

    /// Splits `content` into lines without classifying anything.
    #[must_use]
    pub fn plain(&self, content: &str) -> Vec<Line> {
        let text = printable(content);
        non_empty(LinesWithEndings::from(&*text).map(plain_line).collect())
    }

    fn classify(
        &self,
        parser: &mut ParseState,
        stack: &mut ScopeStack,
        source: &str,
    ) -> Result<Line, Box<dyn std::error::Error>> {
        let ops = parser.parse_line(source, &self.grammars.syntaxes)?;
        let mut line = Vec::new();

        for (region, op) in ScopeRegionIterator::new(&ops, source) {
            stack.apply(op)?;
            push(&mut line, self.kind_of(stack), strip_newline(region));
        }

        Ok(line)
    }

    fn kind_of(&self, stack: &ScopeStack) -> TokenKind {
        stack
            .as_slice()
            .iter()
            .rev()
            .find_map(|scope| {
                self.grammars
                    .classes
                    .iter()
                    .find(|(prefix, _)| prefix.is_prefix_of(*scope))
                    .map(|(_, kind)| *kind)
            })
            .unwrap_or(TokenKind::Plain)
    }
}

fn strip_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

fn plain_line(source: &str) -> Line {
    let mut line = Vec::new();
    push(&mut line, TokenKind::Plain, strip_newline(source));
    line
}

/// Empty content still renders as one empty line.
fn non_empty(mut lines: Vec<Line>) -> Vec<Line> {
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

fn push(line: &mut Line, kind: TokenKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match line.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => line.push(Token {
            kind,
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &Line) -> Vec<(TokenKind, &str)> {
        line.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    fn kind_of(line: &Line, text: &str) -> Option<TokenKind> {
        line.iter().find(|t| t.text.contains(text)).map(|t| t.kind)
    }

    #[test]
    fn go_package_clause() {
        let lines = Highlighter::new().highlight("package x", "go").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0], Token { kind: TokenKind::Keyword, text: "package".to_string() });
        assert_eq!(lines[0].iter().map(|t| t.text.as_str()).collect::<String>(), "package x");
    }

    #[test]
    fn languages_resolve_by_extension_or_name() {
        let h = Highlighter::new();
        for language in ["go", "js", "rs", "py", "h", "java", "json", "rust", "Python"] {
            assert!(h.has_grammar(language), "{language}");
        }
        assert!(!h.has_grammar("cobol"));
        assert!(h.highlight("x", "zig").is_none());
    }

    #[test]
    fn plain_text_is_not_a_grammar() {
        assert!(!Highlighter::new().has_grammar("txt"));
    }

    #[test]
    fn comments_strings_and_numbers() {
        let lines = Highlighter::new()
            .highlight("x := \"ab\" // note\nn := 42\n", "go")
            .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(kind_of(&lines[0], "ab"), Some(TokenKind::String));
        assert_eq!(kind_of(&lines[0], "note"), Some(TokenKind::Comment));
        assert_eq!(kind_of(&lines[1], "42"), Some(TokenKind::Number));
        assert_eq!(kind_of(&lines[1], ":="), Some(TokenKind::Plain));
    }

    #[test]
    fn block_comments_span_lines() {
        let lines = Highlighter::new().highlight("/* a\nb */ int x;", "c").unwrap();
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Comment, "/* a")]);
        assert_eq!(lines[1][0], Token { kind: TokenKind::Comment, text: "b */".to_string() });
        assert_eq!(kind_of(&lines[1], "int"), Some(TokenKind::Keyword));
    }

    #[test]
    fn identifiers_containing_keywords_stay_plain() {
        let lines = Highlighter::new().highlight("format", "python").unwrap();
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Plain, "format")]);
    }

    #[test]
    fn control_characters_never_reach_tokens() {
        let lines = Highlighter::new()
            .highlight("package x // \x1b[2J\x1b]0;pwned\x07 \r tail", "go")
            .unwrap();
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].iter().map(|t| t.text.as_str()).collect();
        assert!(!text.chars().any(char::is_control));
        assert!(text.ends_with("\u{FFFD} tail"));
    }

    #[test]
    fn plain_pass_keeps_lines() {
        let lines = Highlighter::new().plain("one\r\ntwo\n\nfour\n");
        assert_eq!(lines.len(), 4);
        assert_eq!(kinds(&lines[1]), vec![(TokenKind::Plain, "two")]);
        assert!(lines[2].is_empty());
    }

    #[test]
    fn plain_pass_defuses_escapes() {
        let lines = Highlighter::new().plain("a\x1b[31mb");
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Plain, "a\u{FFFD}[31mb")]);
    }

    #[test]
    fn empty_content_is_one_empty_line() {
        assert_eq!(Highlighter::new().plain(""), vec![Vec::<Token>::new()]);
        assert_eq!(Highlighter::new().highlight("", "go").unwrap(), vec![Vec::<Token>::new()]);
    }
}
