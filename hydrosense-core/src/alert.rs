//! Alert Gate
//!
//! Decouples "the state machine wants an alert" from "an alert was actually
//! issued". The ladder can request an alert every 30-second cycle; the gate
//! refuses to fire more often than the debounce window, so the wearer gets
//! a nudge rather than a continuous buzz.

use crate::constants::time::ALERT_DEBOUNCE_MS;
use crate::state::SystemState;
use crate::time::Timestamp;

/// Debounced pass-through between alert requests and the alert collaborator
#[derive(Debug, Clone)]
pub struct AlertGate {
    debounce_ms: u64,
}

impl Default for AlertGate {
    fn default() -> Self {
        Self {
            debounce_ms: ALERT_DEBOUNCE_MS,
        }
    }
}

impl AlertGate {
    /// Gate with a custom debounce window
    pub const fn with_debounce(debounce_ms: u64) -> Self {
        Self { debounce_ms }
    }

    /// Fire the pending alert if the debounce window has elapsed
    ///
    /// Returns true when the caller should actuate the external alert. On
    /// firing, the alert timestamp is recorded and the request flag
    /// cleared; a suppressed request stays pending for the state machine
    /// to renew or drop next cycle.
    pub fn try_fire(&self, system: &mut SystemState, now: Timestamp) -> bool {
        if !system.needs_alert {
            return false;
        }

        if let Some(last) = system.last_alert_ms {
            if now.saturating_sub(last) < self.debounce_ms {
                return false;
            }
        }

        system.last_alert_ms = Some(now);
        system.needs_alert = false;
        log::info!("alert fired at {} ms ({})", now, system.state.name());
        true
    }
}
