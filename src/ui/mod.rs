//! User interface: render targets, highlighting and terminal painting.
//!
//! ```text
//! store effects → View (render targets)
//!                   │
//! Browser::compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`view`]: Render targets written by store effects
//! - [`highlight`]: Syntax highlighting via `syntect`
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable component renderers
//! - [`helpers`]: Frame buffer and shared text utilities
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod highlight;
pub mod renderer;
pub mod theme;
pub mod view;
pub mod viewmodel;

pub use highlight::{Highlighter, Token, TokenKind};
pub use renderer::{render, render_frame};
pub use theme::Theme;
pub use view::View;
pub use viewmodel::UIViewModel;
