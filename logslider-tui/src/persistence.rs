//! Slider value persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use logslider_core::HandleId;

use crate::app::AppState;

/// Last committed values of one slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedValue {
    pub low: f64,
    pub high: Option<f64>,
    /// Whether the user had moved this slider.
    #[serde(default)]
    pub changed: bool,
}

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub values: Vec<PersistedValue>,
    pub focus: usize,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        values: app
            .entries
            .iter()
            .map(|entry| {
                let state = entry.slider.state();
                PersistedValue {
                    low: state.value(HandleId::Low),
                    high: state.high().map(|h| h.domain_value),
                    changed: state.has_been_changed(),
                }
            })
            .collect(),
        focus: app.focus,
    }
}

/// Apply persisted state to AppState.
///
/// Values go through the slider's external-assignment path, so anything no
/// longer valid for the current config is clamped. Extra or missing entries
/// (the deck changed) are ignored.
pub fn apply(app: &mut AppState, state: PersistedState) {
    for (entry, value) in app.entries.iter_mut().zip(state.values) {
        let slider_state = entry.slider.state_mut();
        slider_state.assign_external(value.low, value.high);
        if value.changed {
            slider_state.mark_changed();
        }
    }
    if state.focus < app.entries.len() {
        app.focus = state.focus;
    }
}
