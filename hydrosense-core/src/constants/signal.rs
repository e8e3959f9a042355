//! Signal-Level Constants
//!
//! Drift compensation offsets, context-detection thresholds and personal
//! calibration parameters for the GSR (galvanic skin response) channel.
//!
//! GSR readings are raw ADC counts from the skin-resistance transducer.
//! They carry a known positive bias from electrode polarization that builds
//! up over hours of wear; the offsets below remove that bias before any
//! analysis sees the value.

// ===== DRIFT COMPENSATION =====

/// Fixed GSR drift offset (ADC counts).
///
/// Electrode polarization bias observed on dry-electrode GSR sensors after
/// extended wear. Subtracted from every raw reading, saturating at zero.
pub const GSR_DRIFT_OFFSET: u32 = 110;

/// Fixed body-temperature drift offset (°C).
///
/// Skin-contact thermistors read high relative to core temperature due to
/// self-heating of the sensing element.
pub const BODY_TEMP_DRIFT_OFFSET_C: f32 = 0.5;

/// Humidity reading above this knee is corrected for condensation bias (%RH).
///
/// Capacitive humidity sensors over-report once the polymer film approaches
/// saturation. Below the knee readings pass through unchanged.
pub const HUMIDITY_CORRECTION_KNEE_PCT: f32 = 70.0;

/// Maximum humidity correction, reached at 100 %RH (%RH).
///
/// The correction ramps linearly from zero at the knee to this value at
/// full scale: `h - MAX * ((h - KNEE) / (100 - KNEE))`.
pub const HUMIDITY_CORRECTION_MAX_PCT: f32 = 3.0;

// ===== OUTDOOR CONTEXT DETECTION =====

/// GSR saturation threshold for sweat detection (ADC counts, inclusive).
///
/// Above this level the skin is sweat-saturated and resistance no longer
/// tracks hydration; the frame is classified outdoor.
pub const GSR_SATURATION_THRESHOLD: u32 = 2690;

/// Ambient temperature above which a frame is classified outdoor (°C).
pub const OUTDOOR_TEMP_THRESHOLD_C: f32 = 30.0;

/// GSR jump against the recent average that flags a motion artifact (counts).
///
/// Electrode movement produces step changes far larger than any hydration
/// process can. Compared against the mean of the last
/// [`MOTION_CONTEXT_AVG_WINDOW`] entries.
pub const MOTION_ARTIFACT_DELTA: f32 = 800.0;

/// Minimum prior frames before the motion-artifact heuristic applies.
pub const MOTION_CONTEXT_MIN_FRAMES: usize = 4;

/// Number of recent entries averaged for the motion-artifact comparison.
pub const MOTION_CONTEXT_AVG_WINDOW: usize = 3;

// ===== HISTORY AND ANALYSIS WINDOWS =====

/// Frames retained in the history ring buffer.
///
/// 20 frames at the 30 s sampling interval covers 10 minutes of signal,
/// enough for trend and artifact detection without growing the RAM budget.
pub const HISTORY_CAPACITY: usize = 20;

/// Frames used for the short-term trend (yields `TREND_WINDOW - 1` deltas).
pub const TREND_WINDOW: usize = 5;

/// Trend below which a detected peak is considered to be decaying.
pub const DECLINE_TREND_THRESHOLD: f32 = -2.0;

// ===== PERSONAL CALIBRATION =====

/// Indoor samples required before the personal baseline is finalized.
///
/// 30 samples at 30 s cadence is a 15 minute seated warm-up.
pub const CALIBRATION_TARGET_SAMPLES: u32 = 30;

/// Minimum personal operating range (ADC counts).
///
/// Guarantees a non-degenerate 0-100 % scale even if every calibration
/// sample was identical.
pub const RANGE_FLOOR: f32 = 100.0;

/// Default hydrated threshold as percentage-of-range.
pub const DEFAULT_HYDRATED_PCT: f32 = 70.0;

/// Default dehydrated threshold as percentage-of-range.
pub const DEFAULT_DEHYDRATED_PCT: f32 = 30.0;
