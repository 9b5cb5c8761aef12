//! Per-kind alert cooldown tracking.
//!
//! Re-firing is purely time based: once the window has elapsed a kind may
//! fire again even if its condition never cleared in between.

use std::collections::HashMap;
use std::time::Duration;

use crate::monitoring::alert::AlertKind;
use crate::types::Timestamp;

/// Minimum interval between repeated alerts of the same kind.
pub const ALERT_COOLDOWN: Duration = Duration::from_secs(30);

/// Tracks when each alert kind last fired to suppress repeats within the
/// cooldown window. A kind absent from the map has never fired.
#[derive(Debug, Clone)]
pub struct CooldownState {
    window: Duration,
    last_fired: HashMap<AlertKind, Timestamp>,
}

impl Default for CooldownState {
    fn default() -> Self {
        Self::new()
    }
}

impl CooldownState {
    /// Create an empty tracker with the standard 30 second window.
    pub fn new() -> Self {
        Self::with_window(ALERT_COOLDOWN)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_fired: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check if `kind` may fire at `now` and record it if so.
    ///
    /// Fires iff the kind never fired or strictly more than the window has
    /// elapsed since it last did. A `now` before the last fire (clock skew)
    /// counts as still cooling down.
    pub fn should_fire(&mut self, kind: AlertKind, now: Timestamp) -> bool {
        if let Some(last) = self.last_fired.get(&kind) {
            let cooled = match now.signed_duration_since(*last).to_std() {
                Ok(elapsed) => elapsed > self.window,
                Err(_) => false,
            };
            if !cooled {
                return false;
            }
        }
        self.last_fired.insert(kind, now);
        true
    }

    pub fn last_fired(&self, kind: AlertKind) -> Option<Timestamp> {
        self.last_fired.get(&kind).copied()
    }

    /// True while `kind` is inside its cooldown window at `now`.
    pub fn is_cooling_down(&self, kind: AlertKind, now: Timestamp) -> bool {
        match self.last_fired.get(&kind) {
            Some(last) => match now.signed_duration_since(*last).to_std() {
                Ok(elapsed) => elapsed <= self.window,
                Err(_) => true,
            },
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
