//! # Checkout Session Lifecycle
//!
//! Models a purchase attempt against a plan.
//!
//! ## States
//!
//! ```text
//! Created ──▶ Paid     (terminal)
//!    │
//!    ├──▶ Failed       (terminal)
//!    │
//!    └──▶ Expired      (terminal)
//! ```
//!
//! Transitions are driven by the payment provider and *observed* here — this
//! subsystem records what the provider reports, it never decides that a
//! payment succeeded. Every `create` is a fresh purchase attempt; repeated
//! calls for the same plan deliberately produce separate sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rentgate_core::{AccountId, CheckoutSessionId, PlanId, Timestamp};

// ─── Status ──────────────────────────────────────────────────────────

/// The lifecycle status of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// Session created, awaiting the provider's outcome.
    Created,
    /// Provider confirmed payment (terminal).
    Paid,
    /// Provider reported failure (terminal).
    Failed,
    /// Session lapsed without completion (terminal).
    Expired,
}

impl CheckoutStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed | Self::Expired)
    }

    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from checkout session transitions.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Attempted transition out of a terminal status.
    #[error("invalid checkout transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: CheckoutStatus,
        /// Attempted target status.
        to: CheckoutStatus,
    },
}

// ─── Session ─────────────────────────────────────────────────────────

/// A purchase attempt tied to `(account, plan)`.
///
/// Identity is immutable; `status` is the only field that changes, and only
/// along the transitions above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Unique session identifier.
    pub id: CheckoutSessionId,
    /// The purchasing account.
    pub account_id: AccountId,
    /// The plan being purchased.
    pub plan_id: PlanId,
    /// Current lifecycle status.
    pub status: CheckoutStatus,
    /// When the session was created.
    pub created_at: Timestamp,
}

impl CheckoutSession {
    /// Open a new purchase attempt in status `Created`.
    pub fn new(account_id: AccountId, plan_id: PlanId, created_at: Timestamp) -> Self {
        Self {
            id: CheckoutSessionId::new(),
            account_id,
            plan_id,
            status: CheckoutStatus::Created,
            created_at,
        }
    }

    /// Record that the provider confirmed payment (CREATED → PAID).
    pub fn mark_paid(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutStatus::Paid)
    }

    /// Record that the provider reported failure (CREATED → FAILED).
    pub fn mark_failed(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutStatus::Failed)
    }

    /// Record that the session lapsed (CREATED → EXPIRED).
    pub fn mark_expired(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutStatus::Expired)
    }

    fn transition(&mut self, to: CheckoutStatus) -> Result<(), CheckoutError> {
        if self.status.is_terminal() {
            return Err(CheckoutError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> CheckoutSession {
        CheckoutSession::new(
            AccountId::new(),
            PlanId::new("monthly"),
            Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
        )
    }

    #[test]
    fn test_new_session_is_created() {
        let session = make_session();
        assert_eq!(session.status, CheckoutStatus::Created);
        assert!(!session.status.is_terminal());
    }

    #[test]
    fn test_created_to_paid() {
        let mut session = make_session();
        session.mark_paid().unwrap();
        assert_eq!(session.status, CheckoutStatus::Paid);
        assert!(session.status.is_terminal());
    }

    #[test]
    fn test_created_to_failed() {
        let mut session = make_session();
        session.mark_failed().unwrap();
        assert_eq!(session.status, CheckoutStatus::Failed);
    }

    #[test]
    fn test_created_to_expired() {
        let mut session = make_session();
        session.mark_expired().unwrap();
        assert_eq!(session.status, CheckoutStatus::Expired);
    }

    #[test]
    fn test_cannot_leave_terminal_status() {
        let mut session = make_session();
        session.mark_paid().unwrap();
        assert!(session.mark_failed().is_err());
        assert!(session.mark_expired().is_err());
        assert!(session.mark_paid().is_err());
        assert_eq!(session.status, CheckoutStatus::Paid);
    }

    #[test]
    fn test_repeated_creates_are_distinct_sessions() {
        let a = make_session();
        let b = make_session();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CheckoutStatus::Created.to_string(), "created");
        assert_eq!(CheckoutStatus::Paid.to_string(), "paid");
        assert_eq!(CheckoutStatus::Failed.to_string(), "failed");
        assert_eq!(CheckoutStatus::Expired.to_string(), "expired");
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = make_session();
        let json = serde_json::to_string(&session).unwrap();
        let parsed: CheckoutSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, parsed);
    }
}
