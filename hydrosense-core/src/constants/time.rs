//! Time-Related Constants
//!
//! Sampling cadence, reminder intervals and debounce windows. All durations
//! are millisecond counts of the engine's monotonic tick.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

// ===== SAMPLING =====

/// Engine sampling interval (milliseconds).
///
/// One full read → compensate → classify → analyze → decide cycle every
/// 30 seconds. Skin resistance responds to hydration on a scale of minutes,
/// so faster sampling only burns power.
pub const SAMPLE_INTERVAL_MS: u64 = 30_000;

// ===== CURVE ANALYSIS WINDOWS =====

/// Delay after a peak before a negative trend counts as a decline phase.
pub const DECLINE_DELAY_MS: u64 = 2 * MS_PER_MINUTE;

/// Age after which a recorded peak is discarded as stale.
///
/// A peak from two hours ago says nothing about the current hydration
/// trajectory; tracking restarts from the present value.
pub const PEAK_STALE_MS: u64 = 2 * MS_PER_HOUR;

/// Flat-trend window: no movement and no fresh peak for this long reads as
/// sustained dehydration.
pub const STAGNATION_WINDOW_MS: u64 = MS_PER_HOUR;

// ===== REMINDER INTERVALS =====

/// Reminder cadence while hydrated.
pub const REMINDER_HYDRATED_MS: u64 = 30 * MS_PER_MINUTE;

/// Reminder cadence while partially hydrated (also the default).
pub const REMINDER_PARTIAL_MS: u64 = 15 * MS_PER_MINUTE;

/// Reminder cadence while dehydrated.
pub const REMINDER_DEHYDRATED_MS: u64 = 5 * MS_PER_MINUTE;

/// Outdoor reminder cadence when the heat-risk score is elevated.
pub const REMINDER_OUTDOOR_HIGH_MS: u64 = 10 * MS_PER_MINUTE;

/// Outdoor reminder cadence at low heat risk.
pub const REMINDER_OUTDOOR_LOW_MS: u64 = 20 * MS_PER_MINUTE;

// ===== ALERTING =====

/// Minimum spacing between fired alerts (milliseconds).
///
/// The state machine may request an alert every cycle; the gate refuses to
/// fire more often than this.
pub const ALERT_DEBOUNCE_MS: u64 = 15 * MS_PER_SECOND;

/// How long the external buzzer holds an alert (milliseconds).
///
/// Owned by the alert collaborator, not the engine; defined here so host
/// firmware has a single source for the figure.
pub const ALERT_OUTPUT_DURATION_MS: u64 = 3 * MS_PER_SECOND;
