//! Personal Calibration
//!
//! GSR varies enormously between people: skin thickness, electrode contact
//! and sweat-gland density all shift the absolute reading. Absolute
//! thresholds are therefore meaningless; the engine instead derives a
//! personal baseline and operating range from a warm-up period and expresses
//! every later reading as a percentage of that range.
//!
//! The [`Calibrator`] consumes indoor frames until it has collected
//! [`CALIBRATION_TARGET_SAMPLES`] of them, then finalizes the
//! [`UserProfile`] exactly once:
//!
//! - baseline = mean GSR over the warm-up
//! - range = max − min, floored at [`RANGE_FLOOR`] so classification keeps
//!   sensitivity even if the wearer sat perfectly still
//! - hydrated/dehydrated thresholds set to their defaults
//!
//! Outdoor frames are ignored entirely and reported as
//! [`CalibrationProgress::NeedsIndoor`] so the display collaborator can ask
//! the wearer to move inside. Once `calibrated` is true it never reverts
//! for the lifetime of the process; losing it requires a restart and a
//! fresh warm-up.

use crate::constants::signal::{
    CALIBRATION_TARGET_SAMPLES, DEFAULT_DEHYDRATED_PCT, DEFAULT_HYDRATED_PCT, RANGE_FLOOR,
};
use crate::frame::SensorFrame;

/// Personal operating profile derived during calibration
///
/// Written only by the [`Calibrator`]; immutable once `calibrated` is true.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    /// Personal baseline GSR (mean over the warm-up period)
    pub baseline: f32,
    /// Personal operating range (max − min, never below the floor)
    pub range: f32,
    /// Percentage-of-range at or above which the wearer counts as hydrated
    pub hydrated_pct: f32,
    /// Percentage-of-range at or below which the wearer counts as dehydrated
    pub dehydrated_pct: f32,
    /// Whether calibration has completed; never reverts once set
    pub calibrated: bool,
}

impl UserProfile {
    /// The uncalibrated profile every run starts from
    pub const fn empty() -> Self {
        Self {
            baseline: 0.0,
            range: 0.0,
            hydrated_pct: 0.0,
            dehydrated_pct: 0.0,
            calibrated: false,
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::empty()
    }
}

/// Calibration progress reported once per pre-calibration cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationProgress {
    /// The frame was outdoor; calibration needs indoor conditions
    NeedsIndoor,
    /// Still accumulating indoor samples
    Sampling {
        /// Indoor samples collected so far
        collected: u32,
        /// Samples required to finalize
        target: u32,
    },
    /// The profile has been finalized
    Complete,
}

/// Accumulates indoor GSR statistics until the profile can be finalized
#[derive(Debug, Clone)]
pub struct Calibrator {
    sum: u64,
    min: u32,
    max: u32,
    count: u32,
    target: u32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::with_target(CALIBRATION_TARGET_SAMPLES)
    }
}

impl Calibrator {
    /// Calibrator requiring a custom number of indoor samples
    pub fn with_target(target: u32) -> Self {
        Self {
            sum: 0,
            min: u32::MAX,
            max: 0,
            count: 0,
            target,
        }
    }

    /// Feed one compensated, context-classified frame
    ///
    /// Mutates the profile exactly once, on the sample that reaches the
    /// target count. Calling after completion is a no-op reporting
    /// `Complete`.
    pub fn ingest(&mut self, frame: &SensorFrame, profile: &mut UserProfile) -> CalibrationProgress {
        if profile.calibrated {
            return CalibrationProgress::Complete;
        }

        if frame.outdoor {
            return CalibrationProgress::NeedsIndoor;
        }

        self.sum += u64::from(frame.gsr_raw);
        self.min = self.min.min(frame.gsr_raw);
        self.max = self.max.max(frame.gsr_raw);
        self.count += 1;

        if self.count < self.target {
            return CalibrationProgress::Sampling {
                collected: self.count,
                target: self.target,
            };
        }

        let baseline = self.sum as f32 / self.count as f32;
        let span = (self.max - self.min) as f32;
        let range = if span < RANGE_FLOOR { RANGE_FLOOR } else { span };

        profile.baseline = baseline;
        profile.range = range;
        profile.hydrated_pct = DEFAULT_HYDRATED_PCT;
        profile.dehydrated_pct = DEFAULT_DEHYDRATED_PCT;
        profile.calibrated = true;

        log::info!(
            "calibration complete: baseline={} range={} over {} samples",
            baseline,
            range,
            self.count
        );

        CalibrationProgress::Complete
    }
}
