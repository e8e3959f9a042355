//! Hydration estimation engine for HydroSense
//!
//! Estimates a wearer's hydration state from a rolling window of GSR
//! (galvanic skin response), temperature and humidity readings, and emits a
//! classification, a recommendation and an alert signal once per 30-second
//! sampling cycle.
//!
//! Key constraints:
//! - No heap allocation in the per-cycle path
//! - Deterministic: an injected clock drives all elapsed-time behavior
//! - Missing sensor channels are values, not errors
//!
//! ```
//! use hydrosense_core::{HydrationEngine, RawSample, CycleReport, time::FixedClock};
//!
//! let mut engine = HydrationEngine::new(FixedClock::new(0));
//!
//! let sample = RawSample {
//!     ambient_temp: Some(22.0),
//!     ambient_humidity: Some(55.0),
//!     body_temp: Some(36.6),
//!     gsr_raw: 750,
//! };
//!
//! match engine.run_cycle(sample) {
//!     Ok(CycleReport::Calibrating { progress }) => { /* show warm-up */ }
//!     Ok(CycleReport::Classified { snapshot, .. }) => { /* display it */ }
//!     Err(e) => { /* reading was not a finite number */ }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alert;
pub mod analysis;
pub mod buffer;
pub mod calibration;
pub mod compensation;
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod state;
pub mod time;

// Public API
pub use alert::AlertGate;
pub use analysis::{CurveAnalysis, CurveAnalyzer};
pub use buffer::FrameHistory;
pub use calibration::{CalibrationProgress, Calibrator, UserProfile};
pub use compensation::DriftCompensator;
pub use context::{ContextClassifier, OutdoorReason};
pub use engine::{CycleReport, HydrationEngine};
pub use errors::{EngineError, EngineResult};
pub use frame::{RawSample, SensorFrame};
pub use state::{HydrationState, SystemState};
pub use time::{FixedClock, TimeSource, Timestamp};
#[cfg(feature = "std")]
pub use time::{MonotonicClock, SystemClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
