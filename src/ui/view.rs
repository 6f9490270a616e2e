//! Render targets written by store effects.
//!
//! Each field of [`View`] is owned by exactly one effect. Effects replace or
//! adjust a target; the renderer only reads them.

use crate::ui::highlight::Line;

/// All render targets of the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub breadcrumbs: Breadcrumbs,
    pub code: CodeView,
    pub files: FileList,
    pub indicator: ProgressIndicator,
}

/// Path segments of the selected file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    pub segments: Vec<String>,
}

/// Content of the code pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CodeView {
    /// Nothing has been rendered yet.
    #[default]
    Empty,
    /// Highlighted source of a file.
    Code(CodeBlock),
    /// The file could not be fetched.
    Failed { name: String, message: String },
}

/// Highlighted file content with its scroll position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub name: String,
    /// Grammar used, or `None` for the plain pass.
    pub language: Option<String>,
    pub lines: Vec<Line>,
    /// Index of the first visible line.
    pub scroll: usize,
}

impl CodeView {
    /// Moves the viewport by `delta` lines, clamped to the content.
    pub fn scroll_by(&mut self, delta: isize) {
        if let Self::Code(block) = self {
            let max = block.lines.len().saturating_sub(1);
            block.scroll = block.scroll.saturating_add_signed(delta).min(max);
        }
    }

    /// Returns the block if file content is shown.
    #[must_use]
    pub const fn block(&self) -> Option<&CodeBlock> {
        match self {
            Self::Code(block) => Some(block),
            _ => None,
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// Full filename, dispatched when the item is opened.
    pub filename: String,
    /// Possibly truncated display label.
    pub label: String,
}

/// The result list with its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    pub items: Vec<FileItem>,
    pub selected: usize,
}

impl FileList {
    /// Replaces the items and moves the cursor back to the top.
    pub fn replace(&mut self, items: Vec<FileItem>) {
        self.items = items;
        self.selected = 0;
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.items.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&FileItem> {
        self.items.get(self.selected)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Whether a search is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressIndicator {
    pub busy: bool,
}
