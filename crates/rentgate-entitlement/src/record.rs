//! # Entitlement Record
//!
//! The persisted per-account state: an optional expiration instant and the
//! ledger of applied payment events. `expires_at = None` means
//! perpetual/legacy access. The record is mutated only by settlement
//! (`settlement::apply_settlement`) — there is no other writer.

use serde::{Deserialize, Serialize};

use rentgate_core::{AccountId, PaymentId, Timestamp};

/// Record of one applied payment event.
///
/// Doubles as the idempotency ledger: a settlement carrying a `payment_id`
/// already present here is a duplicate delivery and must return
/// `new_expiration` from this record instead of extending again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPayment {
    /// Provider-assigned payment identifier (the dedup key).
    pub payment_id: PaymentId,
    /// Days of entitlement this payment granted.
    pub days_added: i64,
    /// When the settlement was applied.
    pub applied_at: Timestamp,
    /// The expiration instant this settlement produced.
    pub new_expiration: Timestamp,
}

/// The per-account entitlement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// The owning account.
    pub account_id: AccountId,
    /// Expiration instant. `None` = perpetual/legacy access, always valid.
    pub expires_at: Option<Timestamp>,
    /// Ordered ledger of applied payment events.
    pub applied_payments: Vec<AppliedPayment>,
}

impl Entitlement {
    /// A perpetual entitlement (legacy accounts, internal users).
    pub fn perpetual(account_id: AccountId) -> Self {
        Self {
            account_id,
            expires_at: None,
            applied_payments: Vec::new(),
        }
    }

    /// An entitlement expiring at a known instant (freshly provisioned
    /// trials, migrated paid accounts).
    pub fn expiring(account_id: AccountId, expires_at: Timestamp) -> Self {
        Self {
            account_id,
            expires_at: Some(expires_at),
            applied_payments: Vec::new(),
        }
    }

    /// Look up a previously applied payment by its dedup key.
    pub fn applied_payment(&self, payment_id: &PaymentId) -> Option<&AppliedPayment> {
        self.applied_payments
            .iter()
            .find(|p| &p.payment_id == payment_id)
    }
}
