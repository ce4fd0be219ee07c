//! Top-level UI layout: stacked slider panels with status bar.

pub mod slider;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::AppState;

/// Split the frame into the slider area and a 1-line status bar.
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the entire UI.
///
/// Tracks are relaid out against the current frame first so mouse columns
/// map onto what is actually on screen.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let (main_area, status_area) = split(f.area());
    app.relayout(main_area);

    let rects = app.panel_rects(main_area);
    for (index, (entry, rect)) in app.entries.iter().zip(rects).enumerate() {
        let focused = index == app.focus;
        let focus_handle = focused.then_some(app.focus_handle);
        slider::render(f, rect, entry, focus_handle);
        entry.dirty.set(false);
    }

    status_bar::render(f, status_area, app);
}
