//! Drag controller: pointer/touch gestures to state commits.
//!
//! One gesture is `start`, zero or more `move`s, then exactly one `end`:
//!
//! ```text
//!   Idle ──start──▶ Dragging ──move──▶ Dragging ──end──▶ Idle
//! ```
//!
//! The host owns the real listeners and the track geometry; the controller
//! tells it when to bind/unbind them through [`GestureHost`]. Each input
//! family has its own listener slot, bound at most once and unbound exactly
//! once per gesture. A `start` arriving while a previous gesture never got
//! its `end` tears the stale binding down first.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::state::{Commit, HandleId, SliderState};
use crate::transfer::percent_from_offset;

/// Input family. Each has an independent start/move/end listener set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFamily {
    Mouse,
    Touch,
}

impl InputFamily {
    fn slot(self) -> usize {
        match self {
            InputFamily::Mouse => 0,
            InputFamily::Touch => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// A raw pointer event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Mouse { client_x: f64 },
    Touch { touches: Vec<TouchPoint> },
}

impl PointerEvent {
    pub fn mouse(client_x: f64) -> Self {
        PointerEvent::Mouse { client_x }
    }

    pub fn touch(client_x: f64) -> Self {
        PointerEvent::Touch {
            touches: vec![TouchPoint {
                client_x,
                client_y: 0.0,
            }],
        }
    }

    pub fn family(&self) -> InputFamily {
        match self {
            PointerEvent::Mouse { .. } => InputFamily::Mouse,
            PointerEvent::Touch { .. } => InputFamily::Touch,
        }
    }

    /// Horizontal coordinate: the mouse x, or the first touch point's x.
    /// `None` when there is nothing usable.
    pub fn client_x(&self) -> Option<f64> {
        let x = match self {
            PointerEvent::Mouse { client_x } => *client_x,
            PointerEvent::Touch { touches } => touches.first()?.client_x,
        };
        x.is_finite().then_some(x)
    }
}

/// Horizontal extent of the track, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Percent position of `x`, clamped to the track.
    pub fn percent_at(&self, x: f64) -> f64 {
        let offset = x.max(self.left).min(self.right()) - self.left;
        percent_from_offset(offset, self.width)
    }
}

/// What the controller needs from the host surface.
pub trait GestureHost {
    /// Current track geometry. Queried on every move.
    fn track_bounds(&self) -> TrackBounds;

    /// Start listening for `family`'s move/end events.
    fn bind_gesture(&mut self, family: InputFamily);

    /// Stop listening for `family`'s move/end events.
    fn unbind_gesture(&mut self, family: InputFamily);

    /// Show or clear the "being dragged" mark on a handle.
    fn set_handle_active(&mut self, handle: HandleId, active: bool);

    /// Suppress platform default behavior (selection, scrolling) for the
    /// gesture that just started.
    fn prevent_default(&mut self) {}
}

/// Transient state of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub active_handle: HandleId,
    pub family: InputFamily,
    pub started_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    bound: [bool; 2],
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_bound(&self, family: InputFamily) -> bool {
        self.bound[family.slot()]
    }

    /// Pointer pressed on a handle. Does not move the handle.
    pub fn on_gesture_start<H: GestureHost + ?Sized>(
        &mut self,
        handle: HandleId,
        event: &PointerEvent,
        state: &SliderState,
        host: &mut H,
    ) {
        if let Some(stale) = self.session.take() {
            warn!(handle = ?stale.active_handle, family = ?stale.family, "gesture never ended; cleaning up");
            host.set_handle_active(stale.active_handle, false);
            self.unbind(stale.family, host);
        }

        let handle = if state.is_range() { handle } else { HandleId::Low };
        let family = event.family();

        host.prevent_default();
        host.set_handle_active(handle, true);
        self.bind(family, host);
        self.session = Some(DragSession {
            active_handle: handle,
            family,
            started_at: Instant::now(),
        });
        debug!(?handle, ?family, "gesture started");
    }

    /// Pointer moved during a gesture.
    ///
    /// Returns the commit, or `None` when idle or the event has no usable
    /// coordinate. A commit that landed on the other handle (crossing) makes
    /// that handle the active one for the rest of the gesture.
    pub fn on_gesture_move<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        state: &mut SliderState,
        host: &mut H,
    ) -> Option<Commit> {
        let Some(session) = self.session.as_mut() else {
            trace!("move while idle");
            return None;
        };
        let Some(x) = event.client_x() else {
            trace!("move without coordinate");
            return None;
        };

        let percent = host.track_bounds().percent_at(x);
        let domain = state.domain();
        let raw = state
            .scale()
            .value_from_percent(percent, domain.floor, domain.ceiling);
        let commit = state.set_domain_value(session.active_handle, raw);

        if commit.handle != session.active_handle {
            host.set_handle_active(session.active_handle, false);
            host.set_handle_active(commit.handle, true);
            session.active_handle = commit.handle;
        }
        Some(commit)
    }

    /// Pointer released. Returns `true` when a gesture actually ended, in
    /// which case the caller fires its drag-end callback.
    pub fn on_gesture_end<H: GestureHost + ?Sized>(
        &mut self,
        state: &mut SliderState,
        host: &mut H,
    ) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        host.set_handle_active(session.active_handle, false);
        self.unbind(session.family, host);
        state.mark_changed();
        debug!(
            handle = ?session.active_handle,
            elapsed_ms = session.started_at.elapsed().as_millis() as u64,
            "gesture ended"
        );
        true
    }

    /// Press directly on the track: move the nearest handle there and end
    /// immediately. Ignored mid-gesture or without a coordinate.
    pub fn on_track_press<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        state: &mut SliderState,
        host: &mut H,
    ) -> Option<Commit> {
        if self.session.is_some() {
            return None;
        }
        let x = event.client_x()?;
        let percent = host.track_bounds().percent_at(x);
        let handle = nearest_handle(state, percent);

        let domain = state.domain();
        let raw = state
            .scale()
            .value_from_percent(percent, domain.floor, domain.ceiling);
        let commit = state.set_domain_value(handle, raw);
        state.mark_changed();
        debug!(handle = ?commit.handle, value = commit.value, "track pressed");
        Some(commit)
    }

    fn bind<H: GestureHost + ?Sized>(&mut self, family: InputFamily, host: &mut H) {
        let slot = &mut self.bound[family.slot()];
        if !*slot {
            host.bind_gesture(family);
            *slot = true;
        }
    }

    fn unbind<H: GestureHost + ?Sized>(&mut self, family: InputFamily, host: &mut H) {
        let slot = &mut self.bound[family.slot()];
        if *slot {
            host.unbind_gesture(family);
            *slot = false;
        }
    }
}

/// Handle whose percent is closest to `percent`. Ties go to `High`.
fn nearest_handle(state: &SliderState, percent: f64) -> HandleId {
    match state.high() {
        Some(high) => {
            let to_low = (percent - state.low().percent).abs();
            let to_high = (percent - high.percent).abs();
            if to_low < to_high {
                HandleId::Low
            } else {
                HandleId::High
            }
        }
        None => HandleId::Low,
    }
}
