//! Application state: single-owner, main-thread only.
//!
//! Each slider entry pairs a core `Slider` with the terminal track it is
//! drawn on. Subscriptions flip a per-entry dirty flag; drag-end callbacks
//! bump a counter shown in the panel title.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use logslider_core::{HandleId, Slider, SliderConfig, SliderDeck, SliderError, SliderMode};

use crate::host::TerminalTrack;

/// Rows one slider panel occupies, borders included.
pub const SLIDER_HEIGHT: u16 = 5;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// One slider on screen.
pub struct SliderEntry {
    pub name: String,
    pub slider: Slider,
    pub track: TerminalTrack,
    /// Set by the state subscription on every committed change.
    pub dirty: Rc<Cell<bool>>,
    /// Number of completed drags (drag-end callback).
    pub drag_ends: Rc<Cell<u32>>,
}

impl SliderEntry {
    pub fn new(name: impl Into<String>, config: SliderConfig) -> Result<Self, SliderError> {
        let dirty = Rc::new(Cell::new(true));
        let drag_ends = Rc::new(Cell::new(0));

        let ends = Rc::clone(&drag_ends);
        let mut slider = Slider::new(config)?.on_drag_end(move || ends.set(ends.get() + 1));
        let flag = Rc::clone(&dirty);
        slider.subscribe(move |_| flag.set(true));

        Ok(Self {
            name: name.into(),
            slider,
            track: TerminalTrack::default(),
            dirty,
            drag_ends,
        })
    }

    pub fn is_range(&self) -> bool {
        self.slider.state().is_range()
    }

    /// Handle whose drawn column is closest to `column`, if within one cell.
    pub fn handle_at(&self, column: u16) -> Option<HandleId> {
        let state = self.slider.state();
        let mut best: Option<(HandleId, u16)> = None;
        let handles: &[HandleId] = if state.is_range() {
            &[HandleId::Low, HandleId::High]
        } else {
            &[HandleId::Low]
        };
        for &handle in handles {
            let distance = self.track.column_for(state.percent(handle)).abs_diff(column);
            if distance > 1 {
                continue;
            }
            // Later handles win ties, so a collapsed pair grabs High first.
            if best.map_or(true, |(_, d)| distance <= d) {
                best = Some((handle, distance));
            }
        }
        best.map(|(handle, _)| handle)
    }
}

/// The default deck shown when no config file is given.
pub fn demo_deck() -> SliderDeck {
    let mut price = SliderConfig::new(0.0, 1_000.0).range(150.0, 800.0);
    price.step = 10.0;

    let mut frequency = SliderConfig::new(20.0, 20_000.0).logarithmic().with_value(440.0);
    frequency.track_ceiling_default = true;

    let volume = SliderConfig::new(0.0, 1.0).with_step(0.05, 2).with_value(0.5);

    let band = SliderConfig::new(1.0, 100_000.0).logarithmic().range(0.0, 0.0);

    SliderDeck {
        slider: vec![price, frequency, volume, band],
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub entries: Vec<SliderEntry>,
    /// Index of the focused entry.
    pub focus: usize,
    /// Handle nudged by the keyboard on the focused entry.
    pub focus_handle: HandleId,
    pub status_message: Option<(String, StatusLevel)>,
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(deck: SliderDeck, state_path: PathBuf) -> Result<Self, SliderError> {
        let entries = deck
            .slider
            .into_iter()
            .enumerate()
            .map(|(i, config)| {
                let name = format!(
                    "#{} {} {}",
                    i + 1,
                    config.scale.label(),
                    match config.mode {
                        SliderMode::Single => "single",
                        SliderMode::Range => "range",
                    }
                );
                SliderEntry::new(name, config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            running: true,
            entries,
            focus: 0,
            focus_handle: HandleId::Low,
            status_message: None,
            state_path,
        })
    }

    pub fn focused(&self) -> Option<&SliderEntry> {
        self.entries.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut SliderEntry> {
        self.entries.get_mut(self.focus)
    }

    /// Panel rects for each entry within `area`.
    pub fn panel_rects(&self, area: Rect) -> Vec<Rect> {
        let mut constraints: Vec<Constraint> = self
            .entries
            .iter()
            .map(|_| Constraint::Length(SLIDER_HEIGHT))
            .collect();
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        chunks[..self.entries.len()].to_vec()
    }

    /// Recompute every track's cells for a frame of `area`.
    pub fn relayout(&mut self, area: Rect) {
        let rects = self.panel_rects(area);
        for (entry, rect) in self.entries.iter_mut().zip(rects) {
            entry.track.area = track_rect(rect);
        }
    }

    /// Entry whose move/end listeners are bound for the mouse, if any.
    pub fn dragging_entry(&mut self) -> Option<&mut SliderEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.track.is_listening(logslider_core::InputFamily::Mouse))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

/// Track row inside a slider panel: middle inner row, one cell of padding
/// on each side so end handles stay visible.
pub fn track_rect(panel: Rect) -> Rect {
    let inner_x = panel.x + 1;
    let inner_w = panel.width.saturating_sub(2);
    Rect::new(
        inner_x + 1,
        panel.y + 2,
        inner_w.saturating_sub(2),
        1,
    )
}
