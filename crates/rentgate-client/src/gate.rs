//! # Access Gate
//!
//! Maps an entitlement snapshot (plus whether the user is signed in at all)
//! to exactly one of the four things the dashboard can show. The gate is the
//! single decision point — pages ask the gate, they never inspect the
//! snapshot themselves.

use rentgate_entitlement::EntitlementSnapshot;

/// What the dashboard presents, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    /// Not signed in: show the sign-in screen.
    SignIn,
    /// Signed in but not entitled (expired, or verification failed):
    /// data visible, all write affordances disabled, renewal prompt shown.
    ReadOnly,
    /// Valid and within the trial window: full access plus the countdown
    /// advisory.
    TrialAdvisory {
        /// Days shown in the countdown.
        days_remaining: i64,
    },
    /// Valid, outside the trial window: full access, no advisory.
    Full,
}

/// The gate itself. Stateless; one instance serves the whole app shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Decide the view for a (possibly absent) snapshot.
    ///
    /// `None` means no authenticated session exists, which precedes any
    /// entitlement question.
    pub fn decide(&self, snapshot: Option<&EntitlementSnapshot>) -> GateView {
        let Some(snapshot) = snapshot else {
            return GateView::SignIn;
        };

        if !snapshot.is_valid {
            return GateView::ReadOnly;
        }

        if snapshot.is_trial {
            // A valid trial always carries a finite expiry; 0 only if the
            // snapshot was produced by something other than the evaluator.
            return GateView::TrialAdvisory {
                days_remaining: snapshot.days_remaining.unwrap_or(0),
            };
        }

        GateView::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(is_valid: bool, is_trial: bool, days_remaining: Option<i64>) -> EntitlementSnapshot {
        EntitlementSnapshot {
            is_valid,
            is_trial,
            days_remaining,
            can_edit: is_valid,
        }
    }

    #[test]
    fn test_no_session_is_sign_in() {
        assert_eq!(AccessGate.decide(None), GateView::SignIn);
    }

    #[test]
    fn test_invalid_is_read_only() {
        let snap = snapshot(false, false, Some(-3));
        assert_eq!(AccessGate.decide(Some(&snap)), GateView::ReadOnly);
    }

    #[test]
    fn test_fail_closed_is_read_only() {
        let snap = EntitlementSnapshot::fail_closed();
        assert_eq!(AccessGate.decide(Some(&snap)), GateView::ReadOnly);
    }

    #[test]
    fn test_trial_shows_countdown() {
        let snap = snapshot(true, true, Some(9));
        assert_eq!(
            AccessGate.decide(Some(&snap)),
            GateView::TrialAdvisory { days_remaining: 9 }
        );
    }

    #[test]
    fn test_valid_outside_window_is_full() {
        let snap = snapshot(true, false, Some(200));
        assert_eq!(AccessGate.decide(Some(&snap)), GateView::Full);
    }

    #[test]
    fn test_perpetual_is_full() {
        let snap = snapshot(true, false, None);
        assert_eq!(AccessGate.decide(Some(&snap)), GateView::Full);
    }
}
