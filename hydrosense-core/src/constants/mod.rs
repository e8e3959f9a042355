//! Constants for HydroSense Core
//!
//! Centralized, documented constants used throughout the engine. All numeric
//! values live here with an explanation of their purpose so the decision
//! logic in the rest of the crate stays free of magic numbers.
//!
//! ## Organization
//!
//! - **Signal**: drift offsets, context thresholds, calibration parameters
//! - **Time**: sampling cadence, reminder intervals, debounce windows
//! - **State**: classification thresholds, confidence levels, risk bands
//!
//! All values are fixed for the lifetime of a run; nothing is read from the
//! environment at runtime.

/// Drift offsets, GSR thresholds and calibration parameters.
pub mod signal;

/// Sampling cadence, reminder intervals and debounce windows.
pub mod time;

/// State-machine thresholds, confidence levels and outdoor risk bands.
pub mod state;

// Re-export the constants most callers need
pub use signal::{
    HISTORY_CAPACITY, TREND_WINDOW, CALIBRATION_TARGET_SAMPLES,
    GSR_DRIFT_OFFSET, GSR_SATURATION_THRESHOLD, RANGE_FLOOR,
    DEFAULT_HYDRATED_PCT, DEFAULT_DEHYDRATED_PCT,
};

pub use time::{
    MS_PER_SECOND, MS_PER_MINUTE, MS_PER_HOUR,
    SAMPLE_INTERVAL_MS, ALERT_DEBOUNCE_MS,
};
