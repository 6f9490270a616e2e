//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents with a `[colors]` table for the chrome and a
//! `[syntax]` table for highlighted code. Two themes are built in:
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! breadcrumb_fg = "#89b4fa"
//! breadcrumb_current_fg = "#f5c2e7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! indicator_busy_fg = "#fab387"
//! indicator_idle_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! line_number_fg = "#585b70"
//!
//! [syntax]
//! keyword = "#cba6f7"
//! string = "#a6e3a1"
//! comment = "#7f849c"
//! number = "#fab387"
//! ```

use crate::domain::error::{Result, ZearchError};
use crate::ui::highlight::TokenKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme used by the renderer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Chrome colors.
    pub colors: ThemeColors,
    /// Code colors, one per highlighted token kind.
    pub syntax: SyntaxColors,
}

/// Color definitions for the chrome around the code view.
///
/// All colors are hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Leading breadcrumb segments.
    pub breadcrumb_fg: String,
    /// Last breadcrumb segment (the file itself).
    pub breadcrumb_current_fg: String,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, hints).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Progress indicator while a search is in flight.
    pub indicator_busy_fg: String,
    /// Progress indicator when idle.
    pub indicator_idle_fg: String,

    /// Error messages.
    pub error_fg: String,

    /// Line number gutter in the code view.
    pub line_number_fg: String,
}

/// Token colors for the code view. Plain tokens use `text_normal`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyntaxColors {
    pub keyword: String,
    pub string: String,
    pub comment: String,
    pub number: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::Theme`] if the file cannot be read or does not
    /// parse as a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ZearchError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ZearchError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the hex color for a token kind.
    #[must_use]
    pub fn token_color(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Plain => &self.colors.text_normal,
            TokenKind::Keyword => &self.syntax.keyword,
            TokenKind::String => &self.syntax.string,
            TokenKind::Comment => &self.syntax.comment,
            TokenKind::Number => &self.syntax.number,
        }
    }

    /// Parses `#rrggbb` or `#rgb`. Anything else renders white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        const WHITE: (u8, u8, u8) = (255, 255, 255);

        let digits = hex.trim().trim_start_matches('#');
        let Ok(value) = u32::from_str_radix(digits, 16) else {
            return WHITE;
        };
        let channel = |shift: u32, mask: u32| u8::try_from((value >> shift) & mask).unwrap_or(u8::MAX);

        match digits.len() {
            6 => (channel(16, 0xff), channel(8, 0xff), channel(0, 0xff)),
            3 => (channel(8, 0xf) * 17, channel(4, 0xf) * 17, channel(0, 0xf) * 17),
            _ => WHITE,
        }
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
