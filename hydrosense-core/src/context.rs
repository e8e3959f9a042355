//! Outdoor/Indoor Context Classification
//!
//! Skin resistance is only a usable hydration proxy at rest in a temperate
//! environment. Three conditions invalidate it for a cycle:
//!
//! 1. **Sweat saturation**: GSR at or above the saturation threshold means
//!    the electrodes are wet and resistance tracks sweat, not hydration.
//! 2. **Heat**: ambient temperature above the outdoor threshold.
//! 3. **Motion artifact**: a step change against the recent GSR average far
//!    larger than any physiological process produces.
//!
//! Rules are evaluated in that order, first match wins. The result is a
//! momentary flag on the frame plus a diagnostic [`OutdoorReason`]; it is
//! recomputed from scratch every cycle and never persisted as a trend.

use crate::buffer::FrameHistory;
use crate::constants::signal::{
    GSR_SATURATION_THRESHOLD, MOTION_ARTIFACT_DELTA, MOTION_CONTEXT_AVG_WINDOW,
    MOTION_CONTEXT_MIN_FRAMES, OUTDOOR_TEMP_THRESHOLD_C,
};
use crate::frame::SensorFrame;

/// Why a frame was classified as outdoor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutdoorReason {
    /// GSR at or above the sweat-saturation threshold
    SweatSaturation,
    /// Ambient temperature above the outdoor threshold
    HighAmbientTemp,
    /// GSR step change inconsistent with skin physiology
    MotionArtifact,
}

impl OutdoorReason {
    /// Human-readable diagnostic text
    pub const fn describe(&self) -> &'static str {
        match self {
            OutdoorReason::SweatSaturation => "sweat saturation",
            OutdoorReason::HighAmbientTemp => "high ambient temperature",
            OutdoorReason::MotionArtifact => "motion artifact",
        }
    }
}

/// Per-frame outdoor context detector
#[derive(Debug, Clone)]
pub struct ContextClassifier {
    saturation_threshold: u32,
    outdoor_temp_c: f32,
    motion_delta: f32,
}

impl Default for ContextClassifier {
    fn default() -> Self {
        Self {
            saturation_threshold: GSR_SATURATION_THRESHOLD,
            outdoor_temp_c: OUTDOOR_TEMP_THRESHOLD_C,
            motion_delta: MOTION_ARTIFACT_DELTA,
        }
    }
}

impl ContextClassifier {
    /// Classifier with custom thresholds
    pub fn with_thresholds(saturation_threshold: u32, outdoor_temp_c: f32, motion_delta: f32) -> Self {
        Self {
            saturation_threshold,
            outdoor_temp_c,
            motion_delta: libm::fabsf(motion_delta),
        }
    }

    /// Classify a compensated frame against the prior history
    ///
    /// Returns `Some(reason)` for outdoor context, `None` for indoor. The
    /// frame must not yet be appended to `history`; the motion heuristic
    /// compares it against prior entries only.
    pub fn classify<const N: usize>(
        &self,
        frame: &SensorFrame,
        history: &FrameHistory<N>,
    ) -> Option<OutdoorReason> {
        // Boundary is inclusive: a reading exactly at the threshold is
        // already saturated
        if frame.gsr_raw >= self.saturation_threshold {
            return Some(OutdoorReason::SweatSaturation);
        }

        if let Some(ambient) = frame.ambient_temp {
            if ambient > self.outdoor_temp_c {
                return Some(OutdoorReason::HighAmbientTemp);
            }
        }

        if history.len() >= MOTION_CONTEXT_MIN_FRAMES {
            if let Some(avg) = recent_average(history) {
                let delta = libm::fabsf(frame.gsr_raw as f32 - avg);
                if delta > self.motion_delta {
                    return Some(OutdoorReason::MotionArtifact);
                }
            }
        }

        None
    }
}

/// Mean GSR of the most recent entries
fn recent_average<const N: usize>(history: &FrameHistory<N>) -> Option<f32> {
    let mut sum = 0.0f32;
    let mut count = 0u32;

    for offset in 0..MOTION_CONTEXT_AVG_WINDOW {
        if let Some(frame) = history.at(offset) {
            sum += frame.gsr_raw as f32;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some(sum / count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::signal::HISTORY_CAPACITY;

    fn frame(gsr: u32, ambient: Option<f32>) -> SensorFrame {
        SensorFrame {
            ambient_temp: ambient,
            ambient_humidity: None,
            body_temp: None,
            gsr_raw: gsr,
            timestamp: 30_000,
            outdoor: false,
        }
    }

    fn history_of(values: &[u32]) -> FrameHistory<HISTORY_CAPACITY> {
        let mut history = FrameHistory::new();
        for &v in values {
            history.push(frame(v, None));
        }
        history
    }

    #[test]
    fn saturation_boundary_is_inclusive() {
        let classifier = ContextClassifier::default();
        let history = FrameHistory::<HISTORY_CAPACITY>::new();

        assert_eq!(
            classifier.classify(&frame(2690, None), &history),
            Some(OutdoorReason::SweatSaturation)
        );
        assert_eq!(classifier.classify(&frame(2689, None), &history), None);
    }

    #[test]
    fn hot_ambient_is_outdoor() {
        let classifier = ContextClassifier::default();
        let history = FrameHistory::<HISTORY_CAPACITY>::new();

        assert_eq!(
            classifier.classify(&frame(500, Some(30.5)), &history),
            Some(OutdoorReason::HighAmbientTemp)
        );
        // Missing temperature skips the rule entirely
        assert_eq!(classifier.classify(&frame(500, None), &history), None);
        assert_eq!(classifier.classify(&frame(500, Some(29.9)), &history), None);
    }

    #[test]
    fn saturation_wins_over_heat() {
        let classifier = ContextClassifier::default();
        let history = FrameHistory::<HISTORY_CAPACITY>::new();

        assert_eq!(
            classifier.classify(&frame(3000, Some(35.0)), &history),
            Some(OutdoorReason::SweatSaturation)
        );
    }

    #[test]
    fn motion_artifact_needs_history() {
        let classifier = ContextClassifier::default();

        // Only 3 prior frames: heuristic disabled
        let short = history_of(&[500, 510, 520]);
        assert_eq!(classifier.classify(&frame(2000, None), &short), None);

        // 4 prior frames: average of last 3 is 520, |2000 - 520| > 800
        let enough = history_of(&[500, 510, 520, 530]);
        assert_eq!(
            classifier.classify(&frame(2000, None), &enough),
            Some(OutdoorReason::MotionArtifact)
        );
    }

    #[test]
    fn small_jump_stays_indoor() {
        let classifier = ContextClassifier::default();
        let history = history_of(&[500, 510, 520, 530]);

        assert_eq!(classifier.classify(&frame(900, None), &history), None);
    }
}
