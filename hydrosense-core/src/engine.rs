//! Per-Cycle Engine Orchestration
//!
//! [`HydrationEngine`] owns every piece of mutable state — history, profile,
//! analyzer, system state — and threads one raw sample through the full
//! pipeline each sampling cycle:
//!
//! ```text
//! RawSample → validate → compensate → classify context → append to history
//!     → pre-calibration:  Calibrator
//!     → post-calibration: CurveAnalyzer → state ladder / outdoor risk
//!                           → reminder scheduler → alert gate
//! ```
//!
//! The whole sequence is synchronous and runs on one logical thread of
//! control; nothing inside suspends. External collaborators only ever see
//! the [`CycleReport`] returned at the end, which carries a copied
//! [`SystemState`] snapshot rather than a reference into the engine, so a
//! display can never observe a half-updated cycle.
//!
//! There are no process-wide singletons: hosts that need several wearers
//! simply construct several engines.

use crate::alert::AlertGate;
use crate::analysis::{CurveAnalysis, CurveAnalyzer};
use crate::buffer::FrameHistory;
use crate::calibration::{CalibrationProgress, Calibrator, UserProfile};
use crate::compensation::DriftCompensator;
use crate::constants::signal::HISTORY_CAPACITY;
use crate::context::ContextClassifier;
use crate::errors::EngineResult;
use crate::frame::RawSample;
use crate::state::{classify_indoor, classify_outdoor, SystemState};
use crate::time::TimeSource;

/// What one sampling cycle produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleReport {
    /// Still deriving the personal baseline; no classification yet
    Calibrating {
        /// Warm-up progress for the display collaborator
        progress: CalibrationProgress,
    },
    /// A full classification cycle ran
    Classified {
        /// Consistent snapshot of the decision state after this cycle
        snapshot: SystemState,
        /// Curve analysis for indoor cycles; `None` when the frame was
        /// outdoor and analysis was skipped
        analysis: Option<CurveAnalysis>,
        /// Whether the alert gate actually fired this cycle
        alert_fired: bool,
    },
}

/// The hydration estimation engine
///
/// Generic over its [`TimeSource`] so hosts inject a hardware tick counter
/// and tests inject a manually advanced clock.
pub struct HydrationEngine<C: TimeSource> {
    clock: C,
    compensator: DriftCompensator,
    classifier: ContextClassifier,
    calibrator: Calibrator,
    profile: UserProfile,
    history: FrameHistory<HISTORY_CAPACITY>,
    analyzer: CurveAnalyzer,
    alert_gate: AlertGate,
    system: SystemState,
}

impl<C: TimeSource> HydrationEngine<C> {
    /// Engine with default thresholds, starting uncalibrated
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            compensator: DriftCompensator::default(),
            classifier: ContextClassifier::default(),
            calibrator: Calibrator::default(),
            profile: UserProfile::empty(),
            history: FrameHistory::new(),
            analyzer: CurveAnalyzer::default(),
            alert_gate: AlertGate::default(),
            system: SystemState::startup(),
        }
    }

    /// Engine with custom compensation and context thresholds
    pub fn with_components(
        clock: C,
        compensator: DriftCompensator,
        classifier: ContextClassifier,
        calibrator: Calibrator,
    ) -> Self {
        Self {
            clock,
            compensator,
            classifier,
            calibrator,
            profile: UserProfile::empty(),
            history: FrameHistory::new(),
            analyzer: CurveAnalyzer::default(),
            alert_gate: AlertGate::default(),
            system: SystemState::startup(),
        }
    }

    /// Run one full sampling cycle over a raw sensor sample
    ///
    /// This is the only entry point that mutates engine state. The sample
    /// is stamped from the injected clock; compensation consumes it, so it
    /// can never be compensated twice.
    pub fn run_cycle(&mut self, raw: RawSample) -> EngineResult<CycleReport> {
        raw.validate()?;
        let now = self.clock.now();

        let mut frame = self.compensator.compensate(raw, now);

        let reason = self.classifier.classify(&frame, &self.history);
        frame.outdoor = reason.is_some();
        if let Some(reason) = reason {
            log::debug!("outdoor context at {} ms: {}", now, reason.describe());
        }

        self.history.push(frame);

        if !self.profile.calibrated {
            let progress = self.calibrator.ingest(&frame, &mut self.profile);
            return Ok(CycleReport::Calibrating { progress });
        }

        let analysis = if frame.outdoor {
            classify_outdoor(&frame, &mut self.system, now);
            None
        } else {
            let analysis = *self.analyzer.update(&frame, &self.history, &self.profile);
            classify_indoor(&analysis, &self.profile, &frame, &mut self.system, now);
            Some(analysis)
        };

        let alert_fired = self.alert_gate.try_fire(&mut self.system, now);

        Ok(CycleReport::Classified {
            snapshot: self.system,
            analysis,
            alert_fired,
        })
    }

    /// Current decision state
    pub fn system_state(&self) -> &SystemState {
        &self.system
    }

    /// Personal calibration profile
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Frame history, oldest to newest via `iter()`
    pub fn history(&self) -> &FrameHistory<HISTORY_CAPACITY> {
        &self.history
    }

    /// Most recent curve analysis
    pub fn analysis(&self) -> &CurveAnalysis {
        self.analyzer.analysis()
    }

    /// Mutable clock access, for hosts that advance a tick counter
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use crate::time::FixedClock;

    fn indoor_sample(gsr: u32) -> RawSample {
        RawSample {
            ambient_temp: Some(22.0),
            ambient_humidity: Some(50.0),
            body_temp: Some(36.5),
            gsr_raw: gsr,
        }
    }

    #[test]
    fn invalid_sample_rejected_before_history() {
        let mut engine = HydrationEngine::new(FixedClock::new(0));
        let sample = RawSample {
            ambient_temp: Some(f32::NAN),
            ambient_humidity: None,
            body_temp: None,
            gsr_raw: 500,
        };

        assert!(matches!(
            engine.run_cycle(sample),
            Err(EngineError::InvalidValue { .. })
        ));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn frames_are_stamped_from_clock() {
        let mut engine = HydrationEngine::new(FixedClock::new(90_000));
        engine.run_cycle(indoor_sample(600)).unwrap();

        assert_eq!(engine.history().latest().unwrap().timestamp, 90_000);
        // Drift offset applied exactly once
        assert_eq!(engine.history().latest().unwrap().gsr_raw, 490);
    }

    #[test]
    fn pre_calibration_cycles_report_progress() {
        let mut engine = HydrationEngine::new(FixedClock::new(0));

        let report = engine.run_cycle(indoor_sample(600)).unwrap();
        assert_eq!(
            report,
            CycleReport::Calibrating {
                progress: CalibrationProgress::Sampling {
                    collected: 1,
                    target: 30
                }
            }
        );
    }
}
