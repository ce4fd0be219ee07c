//! One slider panel: value bubbles, the track with its selection bar and
//! handles, and the floor/ceiling labels underneath.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use logslider_core::HandleId;

use crate::app::SliderEntry;
use crate::theme;

const TRACK_EMPTY: char = '─';
const TRACK_SELECTED: char = '━';
const HANDLE: char = '●';

type Cell = (char, Style);

pub fn render(f: &mut Frame, area: Rect, entry: &SliderEntry, focus_handle: Option<HandleId>) {
    let focused = focus_handle.is_some();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(
            " {} | drags: {} ",
            entry.name,
            entry.drag_ends.get()
        ))
        .title_style(theme::panel_title(focused));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 || inner.width < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    if !entry.slider.hide_bubble() {
        f.render_widget(Paragraph::new(bubble_line(entry, inner)), rows[0]);
    }
    f.render_widget(
        Paragraph::new(track_line(entry, inner, focus_handle)),
        rows[1],
    );
    f.render_widget(Paragraph::new(bounds_line(entry, inner.width)), rows[2]);
}

/// Handles drawn for this entry with their columns.
fn handle_columns(entry: &SliderEntry) -> Vec<(HandleId, u16)> {
    let state = entry.slider.state();
    let mut handles = vec![HandleId::Low];
    if state.is_range() {
        handles.push(HandleId::High);
    }
    handles
        .into_iter()
        .map(|h| (h, entry.track.column_for(state.percent(h))))
        .collect()
}

/// Value labels centred over their handles.
pub fn bubble_line(entry: &SliderEntry, inner: Rect) -> Line<'static> {
    let mut cells = blank(inner.width);
    for (handle, column) in handle_columns(entry) {
        let label = entry.slider.label(handle);
        let len = label.chars().count();
        let center = usize::from(column.saturating_sub(inner.x));
        let start = center
            .saturating_sub(len / 2)
            .min(cells.len().saturating_sub(len));
        let style = if entry.track.active_handle() == Some(handle) {
            theme::accent_bold()
        } else {
            theme::text()
        };
        write_at(&mut cells, start, &label, style);
    }
    to_line(cells)
}

/// Track row: empty track, selection bar, then handles on top.
pub fn track_line(entry: &SliderEntry, inner: Rect, focus_handle: Option<HandleId>) -> Line<'static> {
    let mut cells = blank(inner.width);
    let track = entry.track.area;
    let selection = entry.slider.state().selection();
    let sel_start = entry.track.column_for(selection.left);
    let sel_end = entry.track.column_for(selection.left + selection.width);

    for column in track.x..track.x.saturating_add(track.width) {
        let Some(cell) = cells.get_mut(usize::from(column.saturating_sub(inner.x))) else {
            break;
        };
        *cell = if selection.width > 0.0 && (sel_start..=sel_end).contains(&column) {
            (TRACK_SELECTED, theme::accent())
        } else {
            (TRACK_EMPTY, theme::muted())
        };
    }

    for (handle, column) in handle_columns(entry) {
        let dragging = entry.track.active_handle() == Some(handle);
        let focused = focus_handle == Some(handle);
        if let Some(cell) = cells.get_mut(usize::from(column.saturating_sub(inner.x))) {
            *cell = (HANDLE, theme::handle(dragging, focused));
        }
    }
    to_line(cells)
}

/// Floor on the left, ceiling on the right.
pub fn bounds_line(entry: &SliderEntry, width: u16) -> Line<'static> {
    let state = entry.slider.state();
    let precision = state.precision() as usize;
    let domain = state.domain();
    let floor = format!(" {:.*}", precision, domain.floor);
    let ceiling = format!("{:.*} ", precision, domain.ceiling);
    let gap = usize::from(width).saturating_sub(floor.chars().count() + ceiling.chars().count());
    Line::from(vec![
        Span::styled(floor, theme::muted()),
        Span::raw(" ".repeat(gap)),
        Span::styled(ceiling, theme::muted()),
    ])
}

fn blank(width: u16) -> Vec<Cell> {
    vec![(' ', Style::default()); usize::from(width)]
}

fn write_at(cells: &mut [Cell], start: usize, text: &str, style: Style) {
    for (cell, ch) in cells.iter_mut().skip(start).zip(text.chars()) {
        *cell = (ch, style);
    }
}

/// Merge runs of equally styled cells into spans.
fn to_line(cells: Vec<Cell>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (ch, style) in cells {
        if run_style.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    Line::from(spans)
}
