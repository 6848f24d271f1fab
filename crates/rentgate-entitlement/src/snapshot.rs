//! # Entitlement Evaluator
//!
//! The pure function at the center of the subsystem:
//! `(now, expires_at) → EntitlementSnapshot`. No I/O, no side effects,
//! deterministic — same inputs always produce the same answer, which is what
//! makes "can this account edit?" debuggable.
//!
//! ## Rules
//!
//! - `expires_at = None` means perpetual/legacy access: always valid.
//! - `days_remaining = ceil(remaining / 1 day)` — a remaining partial day
//!   counts as a full day.
//! - `is_valid` is strict: an entitlement expiring exactly now is invalid.
//! - `is_trial = is_valid && days_remaining <= 14`.
//!
//! The trial flag is inferred from remaining duration, not stored on the
//! account. A lapsing paid subscription with 10 days left is therefore
//! indistinguishable from a genuine trial; if that distinction ever matters,
//! track trial status as an explicit attribute and pass a different window
//! here.

use serde::{Deserialize, Serialize};

use rentgate_core::temporal::days_remaining_ceil;
use rentgate_core::Timestamp;

/// Days before expiry within which a valid entitlement is presented as a
/// trial counting down.
pub const TRIAL_WINDOW_DAYS: i64 = 14;

/// The derived access state of an account at one instant.
///
/// Never persisted, never a source of truth — computed fresh from
/// `(now, expires_at)` on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementSnapshot {
    /// Whether the entitlement is currently valid.
    pub is_valid: bool,
    /// Whether to present the trial countdown advisory.
    pub is_trial: bool,
    /// Ceil-rounded days until expiry. `None` for perpetual entitlements;
    /// zero or negative once expired.
    pub days_remaining: Option<i64>,
    /// Whether write operations are allowed. Tracks `is_valid`.
    pub can_edit: bool,
}

impl EntitlementSnapshot {
    /// The most conservative snapshot: deny everything.
    ///
    /// Used by the client cache when verification fails — it is acceptable to
    /// be overly restrictive on a transient backend error, never to wrongly
    /// grant edit access.
    pub fn fail_closed() -> Self {
        Self {
            is_valid: false,
            is_trial: false,
            days_remaining: None,
            can_edit: false,
        }
    }
}

/// Evaluate an entitlement with the default trial window.
pub fn evaluate(now: Timestamp, expires_at: Option<Timestamp>) -> EntitlementSnapshot {
    evaluate_with_window(now, expires_at, TRIAL_WINDOW_DAYS)
}

/// Evaluate an entitlement with an explicit trial window.
pub fn evaluate_with_window(
    now: Timestamp,
    expires_at: Option<Timestamp>,
    trial_window_days: i64,
) -> EntitlementSnapshot {
    let Some(expires_at) = expires_at else {
        // Perpetual/legacy access.
        return EntitlementSnapshot {
            is_valid: true,
            is_trial: false,
            days_remaining: None,
            can_edit: true,
        };
    };

    let days_remaining = days_remaining_ceil(&now, &expires_at);
    // Strict: expiring exactly now is invalid. Under ceil rounding this is
    // equivalent to `days_remaining > 0`.
    let is_valid = now.seconds_until(&expires_at) > 0;

    EntitlementSnapshot {
        is_valid,
        is_trial: is_valid && days_remaining <= trial_window_days,
        days_remaining: Some(days_remaining),
        can_edit: is_valid,
    }
}
