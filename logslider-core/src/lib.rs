//! LogSlider Core: value/position mapping for linear and logarithmic sliders.
//!
//! This crate contains the slider engine:
//! - Transfer functions (percent <-> value, linear and logarithmic)
//! - Step quantizer (floor-aligned grid, precision rounding)
//! - Slider state (single or range, crossing rule, bound rebinding, change subscriptions)
//! - Drag controller (gesture lifecycle, listener slots, track press)
//! - Typed configuration and the `Slider` factory
//!
//! Rendering is left to the host. A host implements [`GestureHost`], feeds
//! pointer events into a [`Slider`], and repaints from the percents it is
//! notified about.

pub mod config;
pub mod drag;
pub mod error;
pub mod quantize;
pub mod slider;
pub mod state;
pub mod transfer;

pub use config::{SliderConfig, SliderDeck, SliderMode};
pub use drag::{
    DragController, DragPhase, DragSession, GestureHost, InputFamily, PointerEvent, TouchPoint,
    TrackBounds,
};
pub use error::SliderError;
pub use quantize::{quantize, QuantizationSpec, MAX_PRECISION};
pub use slider::Slider;
pub use state::{
    ChangeCause, Commit, Domain, HandleId, Selection, SliderChange, SliderSnapshot, SliderState,
    SliderValue, SubscriptionId,
};
pub use transfer::ScaleMode;
