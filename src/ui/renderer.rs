//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View model computation**: `Browser` → `UIViewModel`
//! 2. **Painting**: components write the view model into a [`Frame`], which
//!    is printed to stdout at once

use crate::app::Browser;
use crate::ui::components;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(browser: &Browser, rows: usize, cols: usize) {
    let viewmodel = browser.compute_viewmodel(rows, cols);
    let frame = render_frame(&viewmodel, &browser.theme, rows, cols);
    print!("{}", frame.as_str());
}

/// Paints a view model into a fresh frame.
#[must_use]
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> Frame {
    let _span = tracing::trace_span!("render_frame", rows, cols).entered();
    let mut frame = Frame::new();
    components::render_layout(&mut frame, vm, theme, cols, rows);
    frame
}
