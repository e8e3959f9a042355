//! Sensor Frame Types
//!
//! Two frame types flow through the engine:
//!
//! - [`RawSample`]: what the acquisition collaborator hands over once per
//!   cycle. Uncompensated, not yet timestamped.
//! - [`SensorFrame`]: the drift-compensated, timestamped, context-classified
//!   frame owned by the history store.
//!
//! The split is load-bearing: drift compensation is not idempotent, so it
//! must run exactly once per frame. Making compensation the only way to turn
//! a `RawSample` into a `SensorFrame` (and having it consume the sample)
//! lets the type system enforce that contract instead of a runtime flag.
//!
//! Missing channels are `None`, never zero. A frame with no ambient
//! temperature simply skips every rule that references ambient temperature.

use crate::errors::{EngineError, EngineResult};
use crate::time::Timestamp;

/// Uncompensated sample from the acquisition collaborator
///
/// Optional channels model sensors that are absent, warming up, or
/// momentarily unreadable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    /// Ambient temperature (°C), if the environmental sensor responded
    pub ambient_temp: Option<f32>,
    /// Ambient relative humidity (%RH), if available
    pub ambient_humidity: Option<f32>,
    /// Body (skin) temperature (°C), if available
    pub body_temp: Option<f32>,
    /// Raw skin-resistance reading (ADC counts, non-negative)
    pub gsr_raw: u32,
}

impl RawSample {
    /// Reject mathematically invalid readings (NaN, infinity)
    ///
    /// Missing channels pass; only channels that are present must hold a
    /// finite number.
    pub fn validate(&self) -> EngineResult<()> {
        check_finite(self.ambient_temp, "ambient temperature")?;
        check_finite(self.ambient_humidity, "ambient humidity")?;
        check_finite(self.body_temp, "body temperature")?;
        Ok(())
    }
}

fn check_finite(value: Option<f32>, channel: &'static str) -> EngineResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(EngineError::InvalidValue { channel }),
        _ => Ok(()),
    }
}

/// Drift-compensated sensor frame
///
/// Immutable once appended to the history store. The `outdoor` flag is
/// momentary context attached by the classifier for this frame only; it is
/// recomputed every cycle, never carried forward as a trend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorFrame {
    /// Compensated ambient temperature (°C)
    pub ambient_temp: Option<f32>,
    /// Compensated ambient relative humidity (%RH)
    pub ambient_humidity: Option<f32>,
    /// Compensated body temperature (°C)
    pub body_temp: Option<f32>,
    /// Compensated skin-resistance reading (ADC counts)
    pub gsr_raw: u32,
    /// Capture timestamp (monotonic milliseconds)
    pub timestamp: Timestamp,
    /// Whether this frame was captured in an outdoor context
    pub outdoor: bool,
}
