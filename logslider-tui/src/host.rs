//! Terminal implementation of `GestureHost`.
//!
//! A track is one row of terminal cells. Pointer x is the cell column; the
//! first track column is 0% and the last one 100%.

use ratatui::layout::Rect;

use logslider_core::{GestureHost, HandleId, InputFamily, TrackBounds};

#[derive(Debug, Clone, Default)]
pub struct TerminalTrack {
    /// Track cells, set on every relayout.
    pub area: Rect,
    listening: [bool; 2],
    active: Option<HandleId>,
}

impl TerminalTrack {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            ..Self::default()
        }
    }

    pub fn is_listening(&self, family: InputFamily) -> bool {
        self.listening[slot(family)]
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.active
    }

    /// Column where a handle at `percent` is drawn.
    pub fn column_for(&self, percent: f64) -> u16 {
        let span = self.area.width.saturating_sub(1);
        let offset = (percent.clamp(0.0, 100.0) / 100.0 * f64::from(span)).round() as u16;
        self.area.x + offset.min(span)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.area.y && column >= self.area.x && column < self.area.x + self.area.width
    }
}

fn slot(family: InputFamily) -> usize {
    match family {
        InputFamily::Mouse => 0,
        InputFamily::Touch => 1,
    }
}

impl GestureHost for TerminalTrack {
    fn track_bounds(&self) -> TrackBounds {
        TrackBounds::new(
            f64::from(self.area.x),
            f64::from(self.area.width.saturating_sub(1)),
        )
    }

    fn bind_gesture(&mut self, family: InputFamily) {
        self.listening[slot(family)] = true;
    }

    fn unbind_gesture(&mut self, family: InputFamily) {
        self.listening[slot(family)] = false;
    }

    fn set_handle_active(&mut self, handle: HandleId, active: bool) {
        if active {
            self.active = Some(handle);
        } else if self.active == Some(handle) {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_span_the_track() {
        let track = TerminalTrack::new(Rect::new(10, 3, 21, 1));
        assert_eq!(track.column_for(0.0), 10);
        assert_eq!(track.column_for(50.0), 20);
        assert_eq!(track.column_for(100.0), 30);
    }

    #[test]
    fn bounds_match_columns() {
        let track = TerminalTrack::new(Rect::new(10, 3, 21, 1));
        let bounds = track.track_bounds();
        assert_eq!(bounds.percent_at(10.0), 0.0);
        assert_eq!(bounds.percent_at(20.0), 50.0);
        assert_eq!(bounds.percent_at(30.0), 100.0);
    }

    #[test]
    fn active_mark_moves_between_handles() {
        let mut track = TerminalTrack::default();
        track.set_handle_active(HandleId::Low, true);
        track.set_handle_active(HandleId::Low, false);
        track.set_handle_active(HandleId::High, true);
        // Clearing a handle that is not marked leaves the mark alone.
        track.set_handle_active(HandleId::Low, false);
        assert_eq!(track.active_handle(), Some(HandleId::High));
    }
}
