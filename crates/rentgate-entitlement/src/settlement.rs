//! # Payment Settlement
//!
//! The sole mutation of `expires_at`. A confirmed payment extends an
//! account's entitlement by a duration — it never shortens it, and applying
//! the same payment event twice extends it exactly once.
//!
//! ## Extension rule
//!
//! `base = max(now, current_expires_at)`; `new = base + days_to_add`.
//! An expired account resumes from now; an active account stacks on top of
//! its remaining time. A record with no expiry (`None`) starts from now —
//! note this converts a perpetual record into an expiring one, which is why
//! perpetual accounts are never routed through checkout.
//!
//! ## Idempotency
//!
//! Payment providers redeliver webhooks; that is their documented retry
//! behavior, not an anomaly. Dedup is by `payment_id` against the account's
//! applied-payment ledger: a known id returns the previously recorded
//! outcome without mutating. Events arriving without a `payment_id` cannot
//! be deduplicated and always apply.

use rentgate_core::{PaymentId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::EntitlementError;
use crate::record::{AppliedPayment, Entitlement};

/// Upper bound on a single settlement's extension, in days (100 years).
///
/// Catalog plans top out at 365 days; anything beyond this bound is a
/// malformed event, and unbounded values overflow the underlying date
/// arithmetic.
pub const MAX_SETTLEMENT_DAYS: i64 = 36_500;

/// The result of applying (or replaying) a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    /// The account's expiration instant after this settlement.
    pub new_expiration: Timestamp,
    /// Whether this delivery was a duplicate and the stored outcome was
    /// returned instead of extending again.
    pub deduplicated: bool,
}

/// Apply a settlement to an entitlement record in place.
///
/// The caller is responsible for running this inside the store's atomic
/// update so concurrent settlements for one account serialize their
/// read-modify-write — without that, two racing extensions could both read
/// the same stale `expires_at` and the shorter one would be lost.
///
/// # Errors
///
/// `InvalidPayload` when `days_to_add` is non-positive or exceeds
/// [`MAX_SETTLEMENT_DAYS`].
pub fn apply_settlement(
    entitlement: &mut Entitlement,
    now: Timestamp,
    days_to_add: i64,
    payment_id: Option<PaymentId>,
) -> Result<SettlementOutcome, EntitlementError> {
    if days_to_add <= 0 {
        return Err(EntitlementError::InvalidPayload(format!(
            "days_to_add must be positive, got {days_to_add}"
        )));
    }
    if days_to_add > MAX_SETTLEMENT_DAYS {
        return Err(EntitlementError::InvalidPayload(format!(
            "days_to_add must be at most {MAX_SETTLEMENT_DAYS}, got {days_to_add}"
        )));
    }

    // Duplicate delivery: return the already-applied result unchanged.
    if let Some(ref pid) = payment_id {
        if let Some(applied) = entitlement.applied_payment(pid) {
            tracing::info!(
                account = %entitlement.account_id,
                payment_id = %pid,
                "duplicate settlement delivery, returning recorded outcome"
            );
            return Ok(SettlementOutcome {
                new_expiration: applied.new_expiration,
                deduplicated: true,
            });
        }
    } else {
        tracing::warn!(
            account = %entitlement.account_id,
            "settlement without payment_id cannot be deduplicated"
        );
    }

    // Monotonic extension: never move expiry backward.
    let base = match entitlement.expires_at {
        Some(current) if current > now => current,
        _ => now,
    };
    let new_expiration = base.plus_days(days_to_add);

    if let Some(pid) = payment_id {
        entitlement.applied_payments.push(AppliedPayment {
            payment_id: pid,
            days_added: days_to_add,
            applied_at: now,
            new_expiration,
        });
    }
    entitlement.expires_at = Some(new_expiration);

    tracing::info!(
        account = %entitlement.account_id,
        days_added = days_to_add,
        new_expiration = %new_expiration,
        "settlement applied"
    );

    Ok(SettlementOutcome {
        new_expiration,
        deduplicated: false,
    })
}
