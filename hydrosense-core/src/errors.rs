//! Error Types for the Hydration Engine
//!
//! The engine has deliberately few error paths. Missing sensor channels are
//! a first-class `Option::None`, never an error; out-of-bound percentages
//! are clamped; calibration cannot fail. What remains is rejection of
//! mathematically invalid input before it can poison the history buffer.
//!
//! Errors are kept small and `Copy` with inline `&'static str` payloads so
//! they can be returned from hot paths on heapless targets.

use thiserror_no_std::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A sensor channel reported NaN or infinity
    #[error("invalid {channel} reading: not a finite number")]
    InvalidValue {
        /// Which channel carried the invalid reading
        channel: &'static str,
    },
}
