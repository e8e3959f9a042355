//! Drift Compensation
//!
//! Applies fixed per-channel corrections to a raw sample before anything
//! else sees it:
//!
//! - **Humidity**: capacitive sensors over-report near saturation. Above the
//!   70 %RH knee the reading is reduced by a linear ramp that reaches the
//!   full 3 %RH correction at 100 %RH.
//! - **Body temperature**: skin thermistors self-heat; a fixed 0.5 °C offset
//!   is removed.
//! - **GSR**: electrode polarization bias of 110 counts is removed,
//!   saturating at zero.
//!
//! Missing channels pass through untouched; they are never treated as zero.
//!
//! Compensation is pure and deterministic but NOT idempotent: running it
//! twice would subtract the offsets twice. The API therefore consumes the
//! [`RawSample`] and yields a [`SensorFrame`], so a compensated frame can
//! never be fed back in.

use crate::constants::signal::{
    BODY_TEMP_DRIFT_OFFSET_C, GSR_DRIFT_OFFSET, HUMIDITY_CORRECTION_KNEE_PCT,
    HUMIDITY_CORRECTION_MAX_PCT,
};
use crate::frame::{RawSample, SensorFrame};
use crate::time::Timestamp;

/// Fixed per-channel drift corrector
#[derive(Debug, Clone)]
pub struct DriftCompensator {
    gsr_offset: u32,
    body_temp_offset_c: f32,
    humidity_knee_pct: f32,
    humidity_correction_pct: f32,
}

impl Default for DriftCompensator {
    fn default() -> Self {
        Self {
            gsr_offset: GSR_DRIFT_OFFSET,
            body_temp_offset_c: BODY_TEMP_DRIFT_OFFSET_C,
            humidity_knee_pct: HUMIDITY_CORRECTION_KNEE_PCT,
            humidity_correction_pct: HUMIDITY_CORRECTION_MAX_PCT,
        }
    }
}

impl DriftCompensator {
    /// Compensator with custom offsets, for sensors with a different bias
    /// profile
    pub fn with_offsets(gsr_offset: u32, body_temp_offset_c: f32) -> Self {
        Self {
            gsr_offset,
            body_temp_offset_c,
            ..Self::default()
        }
    }

    /// Apply drift corrections and stamp the frame
    ///
    /// Consumes the raw sample; this is the only way to construct a
    /// [`SensorFrame`], which keeps compensation a strictly once-per-frame
    /// operation. The outdoor flag starts false and is set by the context
    /// classifier.
    pub fn compensate(&self, raw: RawSample, timestamp: Timestamp) -> SensorFrame {
        SensorFrame {
            ambient_temp: raw.ambient_temp,
            ambient_humidity: raw.ambient_humidity.map(|h| self.correct_humidity(h)),
            body_temp: raw.body_temp.map(|t| t - self.body_temp_offset_c),
            gsr_raw: raw.gsr_raw.saturating_sub(self.gsr_offset),
            timestamp,
            outdoor: false,
        }
    }

    /// Linear condensation-bias ramp above the knee
    fn correct_humidity(&self, humidity: f32) -> f32 {
        if humidity <= self.humidity_knee_pct {
            return humidity;
        }

        let span = 100.0 - self.humidity_knee_pct;
        let ramp = (humidity - self.humidity_knee_pct) / span;
        humidity - self.humidity_correction_pct * ramp
    }
}
