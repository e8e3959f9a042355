//! Time-Series Curve Analysis
//!
//! Turns the compensated GSR signal into the quantities the state machine
//! reasons about. Each indoor cycle runs the same fixed sequence:
//!
//! 1. **Trend**: signed mean of the successive deltas over the most recent
//!    [`TREND_WINDOW`] frames. Positive = skin resistance rising.
//! 2. **Percentage**: current reading normalized to the personal operating
//!    range, clamped to 0-100. Zero until calibration completes.
//! 3. **Peak tracking**: highest reading seen and how long ago; a fresh
//!    maximum on a rising trend also cancels a decline phase.
//! 4. **Low tracking**: symmetric minimum tracking.
//! 5. **Decline-phase detection**: a negative trend sustained for
//!    [`DECLINE_DELAY_MS`] after a recorded peak marks hydration falling
//!    from a recent high.
//! 6. **Peak staleness**: a peak older than [`PEAK_STALE_MS`] says nothing
//!    about the present; tracking restarts at the current value.
//!
//! Outdoor frames never reach this module; the engine short-circuits
//! analysis for those cycles.

use heapless::Vec;

use crate::buffer::FrameHistory;
use crate::calibration::UserProfile;
use crate::constants::signal::{DECLINE_TREND_THRESHOLD, TREND_WINDOW};
use crate::constants::time::{DECLINE_DELAY_MS, PEAK_STALE_MS, SAMPLE_INTERVAL_MS};
use crate::frame::SensorFrame;

/// Output of one analysis pass, read by the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveAnalysis {
    /// Current compensated GSR reading
    pub raw: u32,
    /// Percentage of the personal operating range, clamped to 0-100
    pub percent: f32,
    /// Average signed delta per sample over the trend window
    pub trend: f32,
    /// Highest reading in the current tracking episode
    pub peak: u32,
    /// Milliseconds since the peak was recorded
    pub ms_since_peak: u64,
    /// Lowest reading in the current tracking episode
    pub low: u32,
    /// Milliseconds since the low was recorded
    pub ms_since_low: u64,
    /// Whether a peak has been recorded this episode
    pub peak_detected: bool,
    /// Whether the signal is in a decline phase following a peak
    pub declining: bool,
}

impl CurveAnalysis {
    const fn new() -> Self {
        Self {
            raw: 0,
            percent: 0.0,
            trend: 0.0,
            peak: 0,
            ms_since_peak: 0,
            low: u32::MAX,
            ms_since_low: 0,
            peak_detected: false,
            declining: false,
        }
    }
}

impl Default for CurveAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful analyzer updated once per indoor cycle
#[derive(Debug, Clone)]
pub struct CurveAnalyzer {
    analysis: CurveAnalysis,
    sample_interval_ms: u64,
}

impl Default for CurveAnalyzer {
    fn default() -> Self {
        Self {
            analysis: CurveAnalysis::new(),
            sample_interval_ms: SAMPLE_INTERVAL_MS,
        }
    }
}

impl CurveAnalyzer {
    /// The most recent analysis
    pub fn analysis(&self) -> &CurveAnalysis {
        &self.analysis
    }

    /// Run one analysis pass over the newest frame
    ///
    /// `history` must already contain `frame` as its latest entry; the
    /// trend is computed over the window ending at the current reading.
    pub fn update<const N: usize>(
        &mut self,
        frame: &SensorFrame,
        history: &FrameHistory<N>,
        profile: &UserProfile,
    ) -> &CurveAnalysis {
        let raw = frame.gsr_raw;
        self.analysis.raw = raw;
        self.analysis.trend = trend(history);
        self.analysis.percent = percent_of_range(raw, profile);

        self.track_peak(raw);
        self.track_low(raw);
        self.detect_decline();
        self.reset_stale_peak(raw);

        &self.analysis
    }

    fn track_peak(&mut self, raw: u32) {
        if raw > self.analysis.peak {
            self.analysis.peak = raw;
            self.analysis.ms_since_peak = 0;
            self.analysis.peak_detected = true;

            // A new high on a rising signal ends any decline phase
            if self.analysis.trend > 0.0 {
                self.analysis.declining = false;
            }
        } else {
            self.analysis.ms_since_peak += self.sample_interval_ms;
        }
    }

    fn track_low(&mut self, raw: u32) {
        if raw < self.analysis.low {
            self.analysis.low = raw;
            self.analysis.ms_since_low = 0;
        } else {
            self.analysis.ms_since_low += self.sample_interval_ms;
        }
    }

    fn detect_decline(&mut self) {
        if self.analysis.peak_detected
            && self.analysis.trend < DECLINE_TREND_THRESHOLD
            && self.analysis.ms_since_peak > DECLINE_DELAY_MS
        {
            self.analysis.declining = true;
        }
    }

    /// Discard a peak too old to say anything about the present
    fn reset_stale_peak(&mut self, raw: u32) {
        if self.analysis.ms_since_peak > PEAK_STALE_MS {
            self.analysis.peak = raw;
            self.analysis.ms_since_peak = 0;
            self.analysis.peak_detected = false;
            self.analysis.declining = false;
        }
    }
}

/// Signed mean delta per sample over the most recent trend window
///
/// Requires at least [`TREND_WINDOW`] appended frames; returns 0 below that
/// or when no deltas are available.
fn trend<const N: usize>(history: &FrameHistory<N>) -> f32 {
    if history.len() < TREND_WINDOW {
        return 0.0;
    }

    let mut window: Vec<f32, TREND_WINDOW> = Vec::new();
    for offset in (0..TREND_WINDOW).rev() {
        if let Some(frame) = history.at(offset) {
            // Capacity equals the iteration count, push cannot fail
            let _ = window.push(frame.gsr_raw as f32);
        }
    }

    if window.len() < 2 {
        return 0.0;
    }

    let deltas = window.len() - 1;
    let sum: f32 = window.windows(2).map(|pair| pair[1] - pair[0]).sum();
    sum / deltas as f32
}

/// Percentage of the personal operating range, clamped to 0-100
///
/// Zero until the profile is calibrated.
fn percent_of_range(raw: u32, profile: &UserProfile) -> f32 {
    if !profile.calibrated || profile.range <= 0.0 {
        return 0.0;
    }

    let pct = (raw as f32 - profile.baseline) / profile.range * 100.0;
    pct.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::signal::HISTORY_CAPACITY;
    use crate::constants::time::{MS_PER_HOUR, MS_PER_MINUTE};

    fn frame(gsr: u32, timestamp: u64) -> SensorFrame {
        SensorFrame {
            ambient_temp: None,
            ambient_humidity: None,
            body_temp: None,
            gsr_raw: gsr,
            timestamp,
            outdoor: false,
        }
    }

    fn calibrated_profile(baseline: f32, range: f32) -> UserProfile {
        UserProfile {
            baseline,
            range,
            hydrated_pct: 70.0,
            dehydrated_pct: 30.0,
            calibrated: true,
        }
    }

    /// Push frames and run the analyzer over each, returning the last result
    fn run(analyzer: &mut CurveAnalyzer, profile: &UserProfile, values: &[u32]) -> CurveAnalysis {
        let mut history = FrameHistory::<HISTORY_CAPACITY>::new();
        let mut last = CurveAnalysis::default();
        for (i, &v) in values.iter().enumerate() {
            let f = frame(v, i as u64 * 30_000);
            history.push(f);
            last = *analyzer.update(&f, &history, profile);
        }
        last
    }

    #[test]
    fn trend_needs_full_window() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();

        let result = run(&mut analyzer, &profile, &[500, 520, 540, 560]);
        assert_eq!(result.trend, 0.0);
    }

    #[test]
    fn steady_rise_trend() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();

        // Deltas 20,20,20,20 over the 5-frame window
        let result = run(&mut analyzer, &profile, &[500, 520, 540, 560, 580]);
        assert_eq!(result.trend, 20.0);
        assert_eq!(result.peak, 580);
        assert!(result.peak_detected);
        assert!(!result.declining);
    }

    #[test]
    fn percentage_of_range() {
        let profile = calibrated_profile(500.0, 1000.0);
        assert!((percent_of_range(800, &profile) - 30.0).abs() < 1e-4);

        // Clamped at both ends
        assert_eq!(percent_of_range(100, &profile), 0.0);
        assert_eq!(percent_of_range(5000, &profile), 100.0);
    }

    #[test]
    fn percentage_zero_before_calibration() {
        let profile = UserProfile::empty();
        assert_eq!(percent_of_range(800, &profile), 0.0);
    }

    #[test]
    fn time_since_peak_advances() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();

        let result = run(&mut analyzer, &profile, &[600, 580, 570, 560]);
        // Peak recorded at the first sample, three samples since
        assert_eq!(result.peak, 600);
        assert_eq!(result.ms_since_peak, 3 * 30_000);
    }

    #[test]
    fn low_tracking_symmetric() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();

        let result = run(&mut analyzer, &profile, &[600, 550, 570, 580]);
        assert_eq!(result.low, 550);
        assert_eq!(result.ms_since_low, 2 * 30_000);
    }

    #[test]
    fn decline_phase_after_peak() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();

        // Rise to a peak, then fall steadily. After the 2-minute delay with
        // trend below -2 the decline phase sets.
        let mut values = heapless::Vec::<u32, 16>::new();
        for v in [500u32, 550, 600, 650, 700] {
            values.push(v).unwrap();
        }
        for step in 1..=8u32 {
            values.push(700 - step * 20).unwrap();
        }

        let result = run(&mut analyzer, &profile, &values);
        assert!(result.peak_detected);
        assert!(result.declining, "trend {} tsp {}", result.trend, result.ms_since_peak);
        assert!(result.trend < DECLINE_TREND_THRESHOLD);
        assert!(result.ms_since_peak > 2 * MS_PER_MINUTE);
    }

    #[test]
    fn stale_peak_resets() {
        let mut analyzer = CurveAnalyzer::default();
        let profile = UserProfile::empty();
        let mut history = FrameHistory::<HISTORY_CAPACITY>::new();

        // Record a peak
        let f = frame(900, 0);
        history.push(f);
        analyzer.update(&f, &history, &profile);
        assert!(analyzer.analysis().peak_detected);

        // Hold flat past the 2-hour staleness window
        let cycles = (2 * MS_PER_HOUR / 30_000) + 1;
        for i in 1..=cycles {
            let f = frame(850, i * 30_000);
            history.push(f);
            analyzer.update(&f, &history, &profile);
        }

        let result = analyzer.analysis();
        assert!(!result.peak_detected);
        assert!(!result.declining);
        assert_eq!(result.peak, 850);
        assert_eq!(result.ms_since_peak, 0);
    }
}
