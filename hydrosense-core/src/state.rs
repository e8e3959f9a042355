//! Hydration State Machine and Reminder Scheduling
//!
//! Combines curve analysis, calibration thresholds and secondary signals
//! into one of four hydration states plus a recommendation, a confidence
//! score and an alert request. Two disjoint paths:
//!
//! ## Indoor path
//!
//! An ordered rule table ([`INDOOR_RULES`]), evaluated top to bottom with
//! first match winning. The predicates deliberately overlap — a frame can
//! satisfy both the hydrated clause and the transitional fallback — and the
//! table order is load-bearing: reordering silently changes classification.
//! Each rule carries its predicate and its decision so the ladder reads as
//! data, not as a nest of branches.
//!
//! After the ladder, two unconditional overrides run in order: an elevated
//! body temperature downgrades a hydrated result and forces an alert, and a
//! warm room softens only the wording for a partially hydrated wearer.
//!
//! ## Outdoor path
//!
//! GSR is unusable outdoors, so the engine falls back to an additive
//! environmental risk score over banded ambient temperature, body
//! temperature and dry air. The score doubles as the confidence value,
//! deliberately uncapped: 1.3 "confidence" means every band fired, which is
//! itself information for the display collaborator.
//!
//! ## Reminder scheduling
//!
//! Orthogonal to both paths: each state owns a reminder interval, and one
//! shared last-recommendation timestamp decides when a generic reminder
//! overrides whatever the ladder produced. The override also forces an
//! alert request (subject to the alert gate's debounce).

use crate::analysis::CurveAnalysis;
use crate::calibration::UserProfile;
use crate::constants::state::{
    BODY_TEMP_WARNING_C, CONFIDENCE_DECLINING, CONFIDENCE_DEHYDRATED, CONFIDENCE_HYDRATED,
    CONFIDENCE_TRANSITIONAL, RISING_PCT_FLOOR, RISING_TREND_THRESHOLD, RISK_AMBIENT_BANDS,
    RISK_BODY_BANDS, RISK_DRY_BANDS, RISK_MODERATE, RISK_URGENT, STAGNANT_TREND_BAND,
    STEEP_DECLINE_PCT, STEEP_DECLINE_TREND, WARM_AMBIENT_C,
};
use crate::constants::time::{
    REMINDER_DEHYDRATED_MS, REMINDER_HYDRATED_MS, REMINDER_OUTDOOR_HIGH_MS,
    REMINDER_OUTDOOR_LOW_MS, REMINDER_PARTIAL_MS, STAGNATION_WINDOW_MS,
};
use crate::frame::SensorFrame;
use crate::time::Timestamp;

/// Recommendation texts surfaced to the display collaborator
pub mod recommendations {
    /// Pre-calibration status line
    pub const CALIBRATING: &str = "Calibrating. Stay indoors at rest.";
    /// Hydrated, nothing to do
    pub const WELL_HYDRATED: &str = "Hydration level good. Keep it up!";
    /// Decline phase, strong wording
    pub const DECLINING: &str = "Hydration declining. Drink water soon.";
    /// Decline phase, soft wording
    pub const SIP_SOON: &str = "Hydration dipping. Take a sip of water.";
    /// Dehydrated
    pub const DRINK_NOW: &str = "Dehydrated! Drink water now.";
    /// Transitional, rising signal
    pub const IMPROVING: &str = "Hydration improving. Keep drinking.";
    /// Transitional, flat or falling signal
    pub const MONITOR: &str = "Hydration stable. Keep monitoring.";
    /// Fever override
    pub const BODY_TEMP_WARNING: &str = "Elevated body temperature. Drink water now.";
    /// Warm-room wording for a partially hydrated wearer
    pub const WARM_ENVIRONMENT: &str = "Warm environment. Stay ahead of thirst.";
    /// Periodic reminder, either path
    pub const REMINDER: &str = "Time for a water break.";
    /// Outdoor, high risk
    pub const OUTDOOR_URGENT: &str = "High heat stress. Drink water immediately.";
    /// Outdoor, moderate risk
    pub const OUTDOOR_MODERATE: &str = "Outdoor heat building. Drink water regularly.";
    /// Outdoor, low risk
    pub const OUTDOOR_AWARE: &str = "Outdoors: keep water within reach.";
}

/// Hydration classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HydrationState {
    /// Percentage at or below the dehydrated threshold, or long stagnation
    Dehydrated,
    /// Between thresholds, or downgraded from hydrated
    PartiallyHydrated,
    /// Percentage at or above the hydrated threshold, or rising strongly
    Hydrated,
    /// Environmental risk model active; GSR not trusted this cycle
    OutdoorMode,
}

impl HydrationState {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            HydrationState::Dehydrated => "dehydrated",
            HydrationState::PartiallyHydrated => "partially_hydrated",
            HydrationState::Hydrated => "hydrated",
            HydrationState::OutdoorMode => "outdoor_mode",
        }
    }

    /// Reminder interval owned by this state
    pub const fn reminder_interval_ms(&self) -> u64 {
        match self {
            HydrationState::Hydrated => REMINDER_HYDRATED_MS,
            HydrationState::PartiallyHydrated => REMINDER_PARTIAL_MS,
            HydrationState::Dehydrated => REMINDER_DEHYDRATED_MS,
            // Outdoor cycles use the risk-dependent interval; this is the
            // default for any other consumer
            HydrationState::OutdoorMode => REMINDER_PARTIAL_MS,
        }
    }
}

/// Decision output consumed by display, alert and logging collaborators
///
/// `Copy` so the engine can hand out a consistent snapshot per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemState {
    /// Current hydration classification
    pub state: HydrationState,
    /// Current recommendation text
    pub recommendation: &'static str,
    /// Confidence in the classification (uncapped on the outdoor path)
    pub confidence: f32,
    /// Whether this cycle requests an alert (gated before actuation)
    pub needs_alert: bool,
    /// When an alert last actually fired, if ever
    pub last_alert_ms: Option<Timestamp>,
    /// When a recommendation was last issued or reset by the scheduler
    pub last_recommendation_ms: Timestamp,
}

impl SystemState {
    /// State every run starts in, before calibration completes
    pub const fn startup() -> Self {
        Self {
            state: HydrationState::PartiallyHydrated,
            recommendation: recommendations::CALIBRATING,
            confidence: 0.0,
            needs_alert: false,
            last_alert_ms: None,
            last_recommendation_ms: 0,
        }
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::startup()
    }
}

/// One classification outcome produced by a ladder rule
#[derive(Debug, Clone, Copy)]
struct Decision {
    state: HydrationState,
    recommendation: &'static str,
    confidence: f32,
    alert: bool,
}

/// One rung of the indoor decision ladder
struct IndoorRule {
    /// Name logged when the rule fires
    name: &'static str,
    /// Whether this rule claims the cycle
    matches: fn(&CurveAnalysis, &UserProfile) -> bool,
    /// The decision when it does
    decide: fn(&CurveAnalysis, &UserProfile) -> Decision,
}

/// The indoor decision ladder, first match wins
///
/// Order is load-bearing: predicates overlap and the final rule matches
/// everything.
static INDOOR_RULES: [IndoorRule; 4] = [
    IndoorRule {
        name: "hydrated",
        matches: |a, p| {
            a.percent >= p.hydrated_pct
                || (a.trend > RISING_TREND_THRESHOLD && a.percent > RISING_PCT_FLOOR)
        },
        decide: |_, _| Decision {
            state: HydrationState::Hydrated,
            recommendation: recommendations::WELL_HYDRATED,
            confidence: CONFIDENCE_HYDRATED,
            alert: false,
        },
    },
    IndoorRule {
        name: "decline_phase",
        matches: |a, p| a.declining && a.percent > p.dehydrated_pct,
        decide: |a, _| {
            if a.trend < STEEP_DECLINE_TREND || a.percent < STEEP_DECLINE_PCT {
                Decision {
                    state: HydrationState::PartiallyHydrated,
                    recommendation: recommendations::DECLINING,
                    confidence: CONFIDENCE_DECLINING,
                    alert: true,
                }
            } else {
                Decision {
                    state: HydrationState::PartiallyHydrated,
                    recommendation: recommendations::SIP_SOON,
                    confidence: CONFIDENCE_DECLINING,
                    alert: false,
                }
            }
        },
    },
    IndoorRule {
        name: "dehydrated",
        matches: |a, p| {
            a.percent <= p.dehydrated_pct
                || (libm::fabsf(a.trend) < STAGNANT_TREND_BAND
                    && a.ms_since_peak > STAGNATION_WINDOW_MS)
        },
        decide: |_, _| Decision {
            state: HydrationState::Dehydrated,
            recommendation: recommendations::DRINK_NOW,
            confidence: CONFIDENCE_DEHYDRATED,
            alert: true,
        },
    },
    IndoorRule {
        name: "transitional",
        matches: |_, _| true,
        decide: |a, _| Decision {
            state: HydrationState::PartiallyHydrated,
            recommendation: if a.trend > 0.0 {
                recommendations::IMPROVING
            } else {
                recommendations::MONITOR
            },
            confidence: CONFIDENCE_TRANSITIONAL,
            alert: false,
        },
    },
];

/// Run the indoor path: ladder, overrides, then the reminder scheduler
pub fn classify_indoor(
    analysis: &CurveAnalysis,
    profile: &UserProfile,
    frame: &SensorFrame,
    system: &mut SystemState,
    now: Timestamp,
) {
    let decision = first_match(analysis, profile);

    system.state = decision.state;
    system.recommendation = decision.recommendation;
    system.confidence = decision.confidence;
    system.needs_alert = decision.alert;

    // Fever override: an elevated body temperature makes a "hydrated" read
    // unreliable and always warrants attention
    if let Some(body_temp) = frame.body_temp {
        if body_temp > BODY_TEMP_WARNING_C {
            if system.state == HydrationState::Hydrated {
                system.state = HydrationState::PartiallyHydrated;
            }
            system.recommendation = recommendations::BODY_TEMP_WARNING;
            system.needs_alert = true;
        }
    }

    // Warm-room override: wording only, no state or alert change
    if let Some(ambient) = frame.ambient_temp {
        if ambient > WARM_AMBIENT_C && system.state == HydrationState::PartiallyHydrated {
            system.recommendation = recommendations::WARM_ENVIRONMENT;
        }
    }

    apply_reminder(system, system.state.reminder_interval_ms(), now);
}

fn first_match(analysis: &CurveAnalysis, profile: &UserProfile) -> Decision {
    for rule in &INDOOR_RULES {
        if (rule.matches)(analysis, profile) {
            log::debug!("indoor ladder: rule '{}' matched", rule.name);
            return (rule.decide)(analysis, profile);
        }
    }

    // The final rule's predicate is always true; this arm only exists so
    // the ladder stays a plain table
    (INDOOR_RULES[INDOOR_RULES.len() - 1].decide)(analysis, profile)
}

/// Run the outdoor path: banded risk model plus its own reminder cadence
pub fn classify_outdoor(frame: &SensorFrame, system: &mut SystemState, now: Timestamp) {
    let mut risk = 0.0f32;

    if let Some(ambient) = frame.ambient_temp {
        risk += band_above(&RISK_AMBIENT_BANDS, ambient);
    }
    if let Some(body) = frame.body_temp {
        risk += band_above(&RISK_BODY_BANDS, body);
    }
    if let Some(humidity) = frame.ambient_humidity {
        risk += band_below(&RISK_DRY_BANDS, humidity);
    }

    system.state = HydrationState::OutdoorMode;
    system.confidence = risk;

    let (recommendation, alert) = if risk > RISK_URGENT {
        (recommendations::OUTDOOR_URGENT, true)
    } else if risk > RISK_MODERATE {
        (recommendations::OUTDOOR_MODERATE, true)
    } else {
        (recommendations::OUTDOOR_AWARE, false)
    };
    system.recommendation = recommendation;
    system.needs_alert = alert;

    let interval = if risk > RISK_MODERATE {
        REMINDER_OUTDOOR_HIGH_MS
    } else {
        REMINDER_OUTDOOR_LOW_MS
    };
    apply_reminder(system, interval, now);
}

/// First band the value exceeds contributes its weight
fn band_above(bands: &[(f32, f32)], value: f32) -> f32 {
    for &(threshold, weight) in bands {
        if value > threshold {
            return weight;
        }
    }
    0.0
}

/// First band the value undercuts contributes its weight
fn band_below(bands: &[(f32, f32)], value: f32) -> f32 {
    for &(threshold, weight) in bands {
        if value < threshold {
            return weight;
        }
    }
    0.0
}

/// Periodic override shared by both paths
///
/// Owns the single last-recommendation timestamp. On elapse the computed
/// recommendation is replaced by a generic reminder with an alert request,
/// and the timestamp resets.
fn apply_reminder(system: &mut SystemState, interval_ms: u64, now: Timestamp) {
    if now.saturating_sub(system.last_recommendation_ms) > interval_ms {
        system.recommendation = recommendations::REMINDER;
        system.needs_alert = true;
        system.last_recommendation_ms = now;
        log::debug!("reminder override fired at {} ms", now);
    }
}
