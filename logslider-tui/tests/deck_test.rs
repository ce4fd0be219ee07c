use std::path::PathBuf;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use proptest::prelude::*;
use ratatui::layout::Rect;

use logslider_core::{GestureHost, HandleId, SliderDeck};
use logslider_tui::{input, persistence, AppState, TerminalTrack};

const DECK: &str = r#"
[[slider]]
floor = 100.0
ceiling = 10000.0
scale = "logarithmic"

[[slider]]
floor = 5.0
ceiling = 50.0
mode = "range"
low = 0.0
high = 0.0
"#;

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn drag(app: &mut AppState, from: u16, to: u16, row: u16) {
    input::handle_mouse(app, mouse(MouseEventKind::Down(MouseButton::Left), from, row));
    input::handle_mouse(app, mouse(MouseEventKind::Drag(MouseButton::Left), to, row));
    input::handle_mouse(app, mouse(MouseEventKind::Up(MouseButton::Left), to, row));
}

fn deck_app(state_path: PathBuf) -> AppState {
    let deck = SliderDeck::from_toml_str(DECK).unwrap();
    let mut app = AppState::new(deck, state_path).unwrap();
    // Track spans columns 2..=78, so column 40 is the midpoint.
    app.relayout(Rect::new(0, 0, 81, 24));
    app
}

#[test]
fn log_midpoint_drag_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut app = deck_app(path.clone());
    assert_eq!(app.entries[1].slider.state().value(HandleId::Low), 5.0);
    assert_eq!(app.entries[1].slider.state().value(HandleId::High), 50.0);

    let row = app.entries[0].track.area.y;
    drag(&mut app, 2, 40, row);
    assert_eq!(app.entries[0].slider.state().value(HandleId::Low), 1_000.0);
    assert_eq!(app.entries[0].drag_ends.get(), 1);

    persistence::save(&path, &persistence::extract(&app)).unwrap();

    let mut restored = deck_app(path.clone());
    persistence::apply(&mut restored, persistence::load(&path));
    let state = restored.entries[0].slider.state();
    assert_eq!(state.value(HandleId::Low), 1_000.0);
    assert!(state.has_been_changed());
}

#[test]
fn dragging_low_past_high_keeps_order() {
    let mut app = deck_app(PathBuf::from("."));
    let entry = &app.entries[1];
    let row = entry.track.area.y;
    let low_col = entry.track.column_for(entry.slider.state().percent(HandleId::Low));
    assert_eq!(low_col, 2);

    // Drag Low to the far end: it hands over to High and the pair stays ordered.
    input::handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), low_col, row));
    input::handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 78, row));
    input::handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 60, row));
    input::handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 60, row));

    let state = app.entries[1].slider.state();
    assert!(state.value(HandleId::Low) <= state.value(HandleId::High));
    assert_eq!(app.entries[1].drag_ends.get(), 1);
    assert!(!app.entries[1].track.is_listening(logslider_core::InputFamily::Mouse));
}

proptest! {
    #[test]
    fn drawn_column_maps_back_within_half_a_cell(
        x in 0u16..40,
        width in 2u16..200,
        percent in 0.0f64..=100.0,
    ) {
        let track = TerminalTrack::new(Rect::new(x, 0, width, 1));
        let column = track.column_for(percent);
        prop_assert!(column >= x && column < x + width);

        let back = track.track_bounds().percent_at(f64::from(column));
        let cell = 100.0 / f64::from(width - 1);
        prop_assert!((back - percent).abs() <= cell / 2.0 + 1e-9);
    }
}
