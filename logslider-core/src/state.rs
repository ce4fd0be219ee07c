//! Slider state: domain, handle values, derived percents, change fan-out.
//!
//! `domain_value` is authoritative; `percent` is always recomputed from it
//! through the active [`ScaleMode`]. Every committed mutation is pushed to
//! subscribers as a [`SliderChange`] so hosts can repaint without polling.
//!
//! Invariants after every commit:
//! - `floor <= value <= ceiling` for each handle
//! - range mode: `low <= high`, which bound rebinds also preserve

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{validate_domain, SliderConfig, SliderMode};
use crate::error::SliderError;
use crate::quantize::QuantizationSpec;
use crate::transfer::ScaleMode;

/// Which handle of the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Low,
    High,
}

impl HandleId {
    pub fn other(self) -> HandleId {
        match self {
            HandleId::Low => HandleId::High,
            HandleId::High => HandleId::Low,
        }
    }
}

/// `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub floor: f64,
    pub ceiling: f64,
}

impl Domain {
    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.floor, self.ceiling)
    }
}

/// One handle's two representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderValue {
    pub domain_value: f64,
    pub percent: f64,
}

/// Result of a value commit: which handle was written and with what.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    pub handle: HandleId,
    pub value: f64,
}

/// Why subscribers are being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Commit(HandleId),
    Rebind,
    External,
}

/// Snapshot delivered to subscribers after each committed mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChange {
    pub cause: ChangeCause,
    pub low: SliderValue,
    pub high: Option<SliderValue>,
}

/// Left offset and width of the selection bar, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub left: f64,
    pub width: f64,
}

/// Serializable view of the whole state, for hosts that bind through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSnapshot {
    pub domain: Domain,
    pub scale: ScaleMode,
    pub mode: SliderMode,
    pub low: SliderValue,
    pub high: Option<SliderValue>,
    pub selection: Selection,
    pub has_been_changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SliderChange)>;

pub struct SliderState {
    domain: Domain,
    scale: ScaleMode,
    mode: SliderMode,
    precision: u32,
    step: f64,
    /// Pinned grid origin; `None` follows `domain.floor`.
    align_floor: Option<f64>,
    track_ceiling_default: bool,
    low: SliderValue,
    high: Option<SliderValue>,
    has_been_changed: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for SliderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderState")
            .field("domain", &self.domain)
            .field("scale", &self.scale)
            .field("mode", &self.mode)
            .field("low", &self.low)
            .field("high", &self.high)
            .field("has_been_changed", &self.has_been_changed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Resolve initial handle values for a mode.
///
/// Range mode treats an exact `0` (or a missing value) as "unset": low falls
/// back to `floor`, high to `ceiling`. Afterwards everything is clamped into
/// the domain and an inverted pair is swapped.
pub fn resolve_initial(
    mode: SliderMode,
    domain: Domain,
    low: Option<f64>,
    high: Option<f64>,
) -> (f64, Option<f64>) {
    match mode {
        SliderMode::Single => {
            let low = low.filter(|v| !v.is_nan()).unwrap_or(domain.floor);
            (domain.clamp(low), None)
        }
        SliderMode::Range => {
            let low = match low {
                Some(v) if v != 0.0 && !v.is_nan() => v,
                _ => domain.floor,
            };
            let high = match high {
                Some(v) if v != 0.0 && !v.is_nan() => v,
                _ => domain.ceiling,
            };
            let (low, high) = (domain.clamp(low), domain.clamp(high));
            if low > high {
                (high, Some(low))
            } else {
                (low, Some(high))
            }
        }
    }
}

impl SliderState {
    /// Validate `config` and build the initial state.
    pub fn new(config: &SliderConfig) -> Result<Self, SliderError> {
        config.validate()?;
        let domain = Domain::new(config.floor, config.ceiling);
        let (low, high) = resolve_initial(config.mode, domain, config.low, config.high);

        let mut state = Self {
            domain,
            scale: config.scale,
            mode: config.mode,
            precision: config.precision,
            step: config.step,
            align_floor: config.align_floor,
            track_ceiling_default: config.track_ceiling_default,
            low: SliderValue {
                domain_value: low,
                percent: 0.0,
            },
            high: high.map(|v| SliderValue {
                domain_value: v,
                percent: 0.0,
            }),
            has_been_changed: false,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        state.recompute_percents();
        Ok(state)
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn scale(&self) -> ScaleMode {
        self.scale
    }

    pub fn mode(&self) -> SliderMode {
        self.mode
    }

    pub fn is_range(&self) -> bool {
        self.mode == SliderMode::Range
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn quantization(&self) -> QuantizationSpec {
        QuantizationSpec::new(
            self.precision,
            self.step,
            self.align_floor.unwrap_or(self.domain.floor),
        )
    }

    pub fn low(&self) -> SliderValue {
        self.low
    }

    pub fn high(&self) -> Option<SliderValue> {
        self.high
    }

    /// The handle's slot. `High` in single mode falls back to the single handle.
    pub fn handle(&self, handle: HandleId) -> SliderValue {
        match handle {
            HandleId::Low => self.low,
            HandleId::High => self.high.unwrap_or(self.low),
        }
    }

    pub fn value(&self, handle: HandleId) -> f64 {
        self.handle(handle).domain_value
    }

    pub fn percent(&self, handle: HandleId) -> f64 {
        self.handle(handle).percent
    }

    pub fn selection(&self) -> Selection {
        match self.high {
            Some(high) => Selection {
                left: self.low.percent,
                width: high.percent - self.low.percent,
            },
            None => Selection {
                left: 0.0,
                width: self.low.percent,
            },
        }
    }

    pub fn has_been_changed(&self) -> bool {
        self.has_been_changed
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        SliderSnapshot {
            domain: self.domain,
            scale: self.scale,
            mode: self.mode,
            low: self.low,
            high: self.high,
            selection: self.selection(),
            has_been_changed: self.has_been_changed,
        }
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Register a callback fired after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&SliderChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, cause: ChangeCause) {
        let change = SliderChange {
            cause,
            low: self.low,
            high: self.high,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Re-derive every handle's percent from its domain value.
    pub fn recompute_percents(&mut self) {
        let Domain { floor, ceiling } = self.domain;
        self.low.percent = self
            .scale
            .percent_from_value(self.low.domain_value, floor, ceiling);
        if let Some(high) = self.high.as_mut() {
            high.percent = self
                .scale
                .percent_from_value(high.domain_value, floor, ceiling);
        }
    }

    /// Apply the crossing rule: the handle that should receive `value`.
    ///
    /// Low pushed above High acts on High and vice versa. Single mode only
    /// has `Low`.
    pub fn resolve_handle(&self, requested: HandleId, value: f64) -> HandleId {
        let Some(high) = self.high else {
            return HandleId::Low;
        };
        match requested {
            HandleId::Low if value > high.domain_value => HandleId::High,
            HandleId::High if value < self.low.domain_value => HandleId::Low,
            other => other,
        }
    }

    /// Quantize, clamp, resolve crossing, commit and notify.
    ///
    /// A non-finite `raw` is dropped and the current value reported back.
    pub fn set_domain_value(&mut self, handle: HandleId, raw: f64) -> Commit {
        let requested = if self.is_range() { handle } else { HandleId::Low };
        if !raw.is_finite() {
            trace!(?handle, raw, "ignoring non-finite value");
            return Commit {
                handle: requested,
                value: self.value(requested),
            };
        }

        let stepped = self.quantization().apply(raw);
        let value = self.domain.clamp(stepped);
        let target = self.resolve_handle(requested, value);
        if target != requested {
            debug!(from = ?requested, to = ?target, value, "handle crossing reassigned");
        }

        match (target, self.high.as_mut()) {
            (HandleId::High, Some(high)) => high.domain_value = value,
            _ => self.low.domain_value = value,
        }
        self.recompute_percents();
        debug!(handle = ?target, value, percent = self.percent(target), "value committed");
        self.notify(ChangeCause::Commit(target));

        Commit {
            handle: target,
            value,
        }
    }

    /// Move the floor. A low handle sitting exactly on the old floor follows
    /// it, unless the user has already moved the slider.
    ///
    /// The snapped low handle never passes High: it stops at High's value.
    pub fn rebind_floor(&mut self, new_floor: f64) -> Result<(), SliderError> {
        validate_domain(new_floor, self.domain.ceiling, self.scale)?;
        let old_floor = self.domain.floor;
        if !self.has_been_changed && self.low.domain_value == old_floor {
            self.low.domain_value = match self.high {
                Some(high) => new_floor.min(high.domain_value),
                None => new_floor,
            };
        }
        self.domain.floor = new_floor;
        debug!(old_floor, new_floor, "floor rebound");
        self.recompute_percents();
        self.notify(ChangeCause::Rebind);
        Ok(())
    }

    /// Move the ceiling. The high handle (or, with `track_ceiling_default`,
    /// the single handle) follows when it sat exactly on the old ceiling and
    /// the user has not moved the slider yet.
    ///
    /// The snapped high handle never passes Low: it stops at Low's value.
    pub fn rebind_ceiling(&mut self, new_ceiling: f64) -> Result<(), SliderError> {
        validate_domain(self.domain.floor, new_ceiling, self.scale)?;
        let old_ceiling = self.domain.ceiling;
        if !self.has_been_changed {
            let low = self.low.domain_value;
            match self.high.as_mut() {
                Some(high) if high.domain_value == old_ceiling => {
                    high.domain_value = new_ceiling.max(low);
                }
                None if self.track_ceiling_default && low == old_ceiling => {
                    self.low.domain_value = new_ceiling;
                }
                _ => {}
            }
        }
        self.domain.ceiling = new_ceiling;
        debug!(old_ceiling, new_ceiling, "ceiling rebound");
        self.recompute_percents();
        self.notify(ChangeCause::Rebind);
        Ok(())
    }

    /// The host wrote the model value(s) directly.
    ///
    /// Uses the same unset/clamp rules as construction. In range mode a
    /// `(0, 0)` pair is a reset to defaults and re-arms bound tracking.
    pub fn assign_external(&mut self, low: f64, high: Option<f64>) {
        if self.is_range() && low == 0.0 && high == Some(0.0) {
            self.has_been_changed = false;
        }
        let (low, high) = resolve_initial(self.mode, self.domain, Some(low), high);
        self.low.domain_value = low;
        if let (Some(slot), Some(value)) = (self.high.as_mut(), high) {
            slot.domain_value = value;
        }
        self.recompute_percents();
        self.notify(ChangeCause::External);
    }

    /// Set the one-way "user has interacted" latch.
    pub fn mark_changed(&mut self) {
        self.has_been_changed = true;
    }
}
