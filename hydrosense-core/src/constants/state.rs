//! State-Machine Constants
//!
//! Thresholds for the indoor decision ladder, post-ladder physiological
//! overrides, and the banded outdoor heat-risk model.

// ===== INDOOR LADDER =====

/// Confidence reported for a hydrated classification.
pub const CONFIDENCE_HYDRATED: f32 = 0.9;

/// Confidence reported for a decline-phase classification.
pub const CONFIDENCE_DECLINING: f32 = 0.7;

/// Confidence reported for a dehydrated classification.
pub const CONFIDENCE_DEHYDRATED: f32 = 0.8;

/// Confidence reported for the transitional fallback.
pub const CONFIDENCE_TRANSITIONAL: f32 = 0.6;

/// Trend above this counts as actively rising (hydrated when paired with
/// a percentage above [`RISING_PCT_FLOOR`]).
pub const RISING_TREND_THRESHOLD: f32 = 5.0;

/// Percentage floor for the rising-trend hydrated clause.
pub const RISING_PCT_FLOOR: f32 = 60.0;

/// Trend below this upgrades a decline to the stronger warning.
pub const STEEP_DECLINE_TREND: f32 = -10.0;

/// Percentage below this upgrades a decline to the stronger warning.
pub const STEEP_DECLINE_PCT: f32 = 45.0;

/// Absolute trend inside this band reads as stagnant.
pub const STAGNANT_TREND_BAND: f32 = 2.0;

// ===== POST-LADDER OVERRIDES =====

/// Body temperature above which the fever override kicks in (°C).
pub const BODY_TEMP_WARNING_C: f32 = 37.3;

/// Ambient temperature above which a partially-hydrated wearer gets the
/// warm-environment wording (°C).
pub const WARM_AMBIENT_C: f32 = 26.0;

// ===== OUTDOOR RISK MODEL =====
//
// Each band is (threshold, weight). Bands are ordered from most to least
// severe; the first band a reading crosses contributes its weight.

/// Ambient-heat risk bands (°C above threshold).
pub const RISK_AMBIENT_BANDS: [(f32, f32); 3] = [(32.0, 0.4), (28.0, 0.2), (25.0, 0.1)];

/// Body-temperature risk bands (°C above threshold).
pub const RISK_BODY_BANDS: [(f32, f32); 3] = [(38.0, 0.5), (37.5, 0.3), (37.2, 0.1)];

/// Dry-air risk bands (%RH below threshold). Low humidity accelerates
/// evaporative fluid loss.
pub const RISK_DRY_BANDS: [(f32, f32); 2] = [(20.0, 0.3), (40.0, 0.1)];

/// Risk score above which the urgent outdoor recommendation applies.
pub const RISK_URGENT: f32 = 0.6;

/// Risk score above which the moderate outdoor recommendation applies.
pub const RISK_MODERATE: f32 = 0.3;
