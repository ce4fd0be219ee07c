//! Input dispatch: keys drive focus and nudging, the mouse drives gestures.
//!
//! Mouse routing mirrors document-level listeners: a press is hit-tested
//! against every track, but drag and release events only go to the entry
//! whose mouse move/end listeners are currently bound.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use logslider_core::{HandleId, PointerEvent};

use crate::app::AppState;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus + 1 < app.entries.len() {
                app.focus += 1;
                app.focus_handle = HandleId::Low;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus > 0 {
                app.focus -= 1;
                app.focus_handle = HandleId::Low;
            }
        }
        KeyCode::Tab => {
            if app.focused().is_some_and(|e| e.is_range()) {
                app.focus_handle = app.focus_handle.other();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => nudge(app, -1.0),
        KeyCode::Char('l') | KeyCode::Right => nudge(app, 1.0),
        KeyCode::Char('r') => reset_focused(app),
        _ => {}
    }
}

/// Move the focused handle one step. Crossing hands focus to the other handle.
fn nudge(app: &mut AppState, direction: f64) {
    let handle = app.focus_handle;
    let Some(entry) = app.focused_mut() else {
        return;
    };
    let state = entry.slider.state_mut();
    let step = state.quantization().step;
    let target = state.value(handle) + step * direction;
    let commit = state.set_domain_value(handle, target);
    state.mark_changed();
    let label = entry.slider.label(commit.handle);
    app.focus_handle = commit.handle;
    app.set_status(format!("{:?} = {label}", commit.handle));
}

/// Reset the focused slider to its defaults and re-arm bound tracking.
fn reset_focused(app: &mut AppState) {
    let Some(entry) = app.focused_mut() else {
        return;
    };
    let state = entry.slider.state_mut();
    if state.is_range() {
        state.assign_external(0.0, Some(0.0));
    } else {
        let floor = state.domain().floor;
        state.assign_external(floor, None);
    }
    app.set_status("Reset to defaults");
}

/// Handle a mouse event.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    let event = PointerEvent::mouse(f64::from(mouse.column));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, mouse.column, mouse.row, &event),
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(entry) = app.dragging_entry() {
                entry.slider.gesture_move(&event, &mut entry.track);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(entry) = app.dragging_entry() else {
                return;
            };
            entry.slider.gesture_end(&mut entry.track);
            let status = match entry.slider.state().high() {
                Some(_) => format!(
                    "{} .. {}",
                    entry.slider.label(HandleId::Low),
                    entry.slider.label(HandleId::High)
                ),
                None => entry.slider.label(HandleId::Low),
            };
            app.set_status(status);
        }
        _ => {}
    }
}

fn press(app: &mut AppState, column: u16, row: u16, event: &PointerEvent) {
    let Some(index) = app
        .entries
        .iter()
        .position(|e| e.track.contains(column, row))
    else {
        return;
    };
    app.focus = index;

    let entry = &mut app.entries[index];
    match entry.handle_at(column) {
        Some(handle) => {
            entry.slider.gesture_start(handle, event, &mut entry.track);
            app.focus_handle = handle;
        }
        None => {
            if let Some(commit) = entry.slider.track_press(event, &mut entry.track) {
                app.focus_handle = commit.handle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::layout::Rect;

    use crate::app::demo_deck;

    fn app() -> AppState {
        let mut app = AppState::new(demo_deck(), PathBuf::from(".")).unwrap();
        app.relayout(Rect::new(0, 0, 80, 24));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn focus_moves_within_bounds() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.focus, 0);
        for _ in 0..10 {
            handle_key(&mut app, key(KeyCode::Char('j')));
        }
        assert_eq!(app.focus, 3);
    }

    #[test]
    fn nudge_moves_by_step_and_latches() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('l')));
        let state = app.entries[0].slider.state();
        assert_eq!(state.value(HandleId::Low), 160.0);
        assert!(state.has_been_changed());
    }

    #[test]
    fn tab_switches_handle_on_range_only() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus_handle, HandleId::High);
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus_handle, HandleId::Low);
    }

    #[test]
    fn reset_restores_range_defaults() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('l')));
        handle_key(&mut app, key(KeyCode::Char('r')));
        let state = app.entries[0].slider.state();
        assert_eq!(state.value(HandleId::Low), 0.0);
        assert_eq!(state.value(HandleId::High), 1_000.0);
        assert!(!state.has_been_changed());
    }

    #[test]
    fn mouse_drag_moves_grabbed_handle() {
        let mut app = app();
        let entry = &app.entries[0];
        let row = entry.track.area.y;
        let low_col = entry.track.column_for(entry.slider.state().percent(HandleId::Low));

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), low_col, row));
        assert!(app.dragging_entry().is_some());

        // Track spans columns 2..=77; column 32 is 40%.
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 32, row + 3));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 32, row + 3));

        assert!(app.dragging_entry().is_none());
        let entry = &app.entries[0];
        assert_eq!(entry.slider.state().value(HandleId::Low), 400.0);
        assert_eq!(entry.drag_ends.get(), 1);
        assert!(entry.slider.state().has_been_changed());
    }

    #[test]
    fn press_on_empty_track_jumps_nearest_handle() {
        let mut app = app();
        let row = app.entries[0].track.area.y;
        // Column 72 is 93.3%, nearest to High (80%).
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 72, row));
        let entry = &app.entries[0];
        assert_eq!(entry.slider.state().value(HandleId::High), 930.0);
        assert_eq!(app.focus_handle, HandleId::High);
        assert!(app.dragging_entry().is_none());
    }

    #[test]
    fn press_outside_tracks_is_ignored() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(app.dragging_entry().is_none());
        assert_eq!(app.entries[0].drag_ends.get(), 0);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 2));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 40, 2));
        assert_eq!(app.entries[0].slider.state().value(HandleId::Low), 150.0);
        assert_eq!(app.entries[0].drag_ends.get(), 0);
    }
}
