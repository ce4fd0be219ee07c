//! `Slider`: the factory/facade a host talks to.
//!
//! Bundles a validated [`SliderState`], a [`DragController`] and the host
//! callbacks (drag-end notification, value label formatting).

use std::fmt;

use crate::config::SliderConfig;
use crate::drag::{DragController, GestureHost, PointerEvent};
use crate::error::SliderError;
use crate::state::{Commit, HandleId, SliderChange, SliderSnapshot, SliderState, SubscriptionId};

type DragEndCallback = Box<dyn FnMut()>;
type Translate = Box<dyn Fn(f64) -> String>;

pub struct Slider {
    state: SliderState,
    drag: DragController,
    hide_bubble: bool,
    on_drag_end: Option<DragEndCallback>,
    translate: Option<Translate>,
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("hide_bubble", &self.hide_bubble)
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("translate", &self.translate.is_some())
            .finish()
    }
}

impl Slider {
    /// Validate `config` and build a slider. Invalid domains and steps are
    /// reported here and nowhere later.
    pub fn new(config: SliderConfig) -> Result<Self, SliderError> {
        let state = SliderState::new(&config)?;
        Ok(Self {
            state,
            drag: DragController::new(),
            hide_bubble: config.hide_bubble,
            on_drag_end: None,
            translate: None,
        })
    }

    /// Invoked with no arguments every time a gesture (or track press) ends.
    pub fn on_drag_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }

    /// Custom handle label formatting.
    pub fn with_translate(mut self, translate: impl Fn(f64) -> String + 'static) -> Self {
        self.translate = Some(Box::new(translate));
        self
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SliderState {
        &mut self.state
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        self.state.snapshot()
    }

    pub fn hide_bubble(&self) -> bool {
        self.hide_bubble
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SliderChange) + 'static) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    /// Formatted value of a handle: the translate callback if set, else the
    /// value at the configured precision.
    pub fn label(&self, handle: HandleId) -> String {
        let value = self.state.value(handle);
        match &self.translate {
            Some(translate) => translate(value),
            None => format!("{value:.prec$}", prec = self.state.precision() as usize),
        }
    }

    pub fn gesture_start<H: GestureHost + ?Sized>(
        &mut self,
        handle: HandleId,
        event: &PointerEvent,
        host: &mut H,
    ) {
        self.drag.on_gesture_start(handle, event, &self.state, host);
    }

    pub fn gesture_move<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> Option<Commit> {
        self.drag.on_gesture_move(event, &mut self.state, host)
    }

    pub fn gesture_end<H: GestureHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let ended = self.drag.on_gesture_end(&mut self.state, host);
        if ended {
            self.fire_drag_end();
        }
        ended
    }

    pub fn track_press<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> Option<Commit> {
        let commit = self.drag.on_track_press(event, &mut self.state, host)?;
        self.fire_drag_end();
        Some(commit)
    }

    fn fire_drag_end(&mut self) {
        if let Some(callback) = self.on_drag_end.as_mut() {
            callback();
        }
    }
}
