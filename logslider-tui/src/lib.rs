//! LogSlider TUI - terminal host for linear and logarithmic sliders
//!
//! Provides an interactive deck of sliders with:
//! - Mouse drag on handles, press-to-jump on the track
//! - Keyboard focus and step nudging
//! - Value labels through the slider's formatter
//! - Last committed values persisted across restarts

pub mod app;
pub mod host;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{demo_deck, AppState};
pub use host::TerminalTrack;
pub use theme::Theme;
