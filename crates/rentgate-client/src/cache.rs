//! # Client Entitlement Cache
//!
//! A TTL cache over one account's verification result, so the dashboard does
//! not hit `/license-verify` on every page interaction.
//!
//! ## Rules
//!
//! - A cached snapshot younger than the TTL (10 minutes) is served without a
//!   network call.
//! - At or past the TTL the cache refetches; `get(true)` skips the cache
//!   outright (the post-payment page uses this so a successful purchase is
//!   visible immediately).
//! - Verification failure after retries yields the fail-closed snapshot —
//!   read-only, never wrongly editable — and does NOT overwrite a previously
//!   cached value: the failure result is served but not stored, so the next
//!   call retries the network instead of trusting a cached denial for a
//!   full TTL.

use std::sync::Arc;

use parking_lot::Mutex;

use rentgate_core::{Clock, Timestamp};
use rentgate_entitlement::EntitlementSnapshot;

use crate::verify::EntitlementVerifier;

/// Cache time-to-live in seconds (10 minutes).
pub const CACHE_TTL_SECS: i64 = 600;

/// Cache slot state.
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// No verification has completed yet.
    Empty,
    /// A snapshot and the instant it was fetched.
    Cached {
        snapshot: EntitlementSnapshot,
        fetched_at: Timestamp,
    },
}

/// TTL cache over an [`EntitlementVerifier`].
pub struct EntitlementCache {
    verifier: Arc<dyn EntitlementVerifier>,
    clock: Arc<dyn Clock>,
    slot: Mutex<Slot>,
    ttl_secs: i64,
}

impl EntitlementCache {
    /// Build a cache with the default 10-minute TTL.
    pub fn new(verifier: Arc<dyn EntitlementVerifier>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(verifier, clock, CACHE_TTL_SECS)
    }

    /// Build a cache with an explicit TTL in seconds.
    pub fn with_ttl(
        verifier: Arc<dyn EntitlementVerifier>,
        clock: Arc<dyn Clock>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            verifier,
            clock,
            slot: Mutex::new(Slot::Empty),
            ttl_secs,
        }
    }

    /// Get the current snapshot, consulting the cache unless `skip_cache`.
    ///
    /// Never returns an error: a verification failure becomes the
    /// fail-closed snapshot.
    pub async fn get(&self, skip_cache: bool) -> EntitlementSnapshot {
        let now = self.clock.now();

        if !skip_cache {
            if let Slot::Cached {
                snapshot,
                fetched_at,
            } = *self.slot.lock()
            {
                // Strictly younger than the TTL: age == TTL refetches.
                if fetched_at.seconds_until(&now) < self.ttl_secs {
                    return snapshot;
                }
            }
        }

        match self.verifier.verify().await {
            Ok(snapshot) => {
                *self.slot.lock() = Slot::Cached {
                    snapshot,
                    fetched_at: now,
                };
                snapshot
            }
            Err(e) => {
                tracing::warn!("entitlement verification failed, failing closed: {e}");
                // Served, not stored: the stale slot (if any) stays so the
                // next call retries instead of caching the denial.
                EntitlementSnapshot::fail_closed()
            }
        }
    }

    /// Drop any cached snapshot.
    pub fn invalidate(&self) {
        *self.slot.lock() = Slot::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use rentgate_core::FixedClock;

    use crate::error::ClientError;
    use crate::verify::VerifyFuture;

    /// Scripted verifier: a fixed result plus a call counter.
    struct ScriptedVerifier {
        result: Mutex<Result<EntitlementSnapshot, ()>>,
        calls: AtomicU32,
    }

    impl ScriptedVerifier {
        fn ok(snapshot: EntitlementSnapshot) -> Self {
            Self {
                result: Mutex::new(Ok(snapshot)),
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Mutex::new(Err(())),
                calls: AtomicU32::new(0),
            }
        }

        fn set(&self, result: Result<EntitlementSnapshot, ()>) {
            *self.result.lock() = result;
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EntitlementVerifier for ScriptedVerifier {
        fn verify(&self) -> VerifyFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let scripted = *self.result.lock();
            let result =
                scripted.map_err(|_| ClientError::Config("scripted failure".to_string()));
            Box::pin(async move { result })
        }
    }

    fn valid_snapshot() -> EntitlementSnapshot {
        EntitlementSnapshot {
            is_valid: true,
            is_trial: false,
            days_remaining: Some(42),
            can_edit: true,
        }
    }

    fn world(
        verifier: ScriptedVerifier,
    ) -> (Arc<ScriptedVerifier>, FixedClock, EntitlementCache) {
        let verifier = Arc::new(verifier);
        let clock = FixedClock::at(Timestamp::parse("2026-03-01T12:00:00Z").unwrap());
        let cache = EntitlementCache::new(verifier.clone(), Arc::new(clock.clone()));
        (verifier, clock, cache)
    }

    #[tokio::test]
    async fn test_fresh_snapshot_is_served_from_cache() {
        let (verifier, _clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        assert_eq!(cache.get(false).await, valid_snapshot());
        assert_eq!(cache.get(false).await, valid_snapshot());
        assert_eq!(cache.get(false).await, valid_snapshot());
        assert_eq!(verifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_hit_just_inside_ttl() {
        let (verifier, clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        clock.advance_secs(CACHE_TTL_SECS - 1);
        cache.get(false).await;
        assert_eq!(verifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_refetch_at_ttl_boundary() {
        let (verifier, clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        clock.advance_secs(CACHE_TTL_SECS);
        cache.get(false).await;
        assert_eq!(verifier.calls(), 2);
    }

    #[tokio::test]
    async fn test_refetch_past_ttl() {
        let (verifier, clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        clock.advance_secs(CACHE_TTL_SECS + 1);
        cache.get(false).await;
        assert_eq!(verifier.calls(), 2);
    }

    #[tokio::test]
    async fn test_skip_cache_always_fetches() {
        let (verifier, _clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        cache.get(true).await;
        cache.get(true).await;
        assert_eq!(verifier.calls(), 3);
    }

    #[tokio::test]
    async fn test_verification_failure_fails_closed() {
        let (_verifier, _clock, cache) = world(ScriptedVerifier::failing());

        let snapshot = cache.get(false).await;
        assert_eq!(snapshot, EntitlementSnapshot::fail_closed());
        assert!(!snapshot.can_edit);
    }

    #[tokio::test]
    async fn test_failure_does_not_poison_cache() {
        // A transient failure must not pin the fail-closed answer for a TTL:
        // the next call goes back to the network.
        let (verifier, _clock, cache) = world(ScriptedVerifier::failing());

        assert_eq!(cache.get(false).await, EntitlementSnapshot::fail_closed());
        assert_eq!(verifier.calls(), 1);

        // Backend recovers.
        verifier.set(Ok(valid_snapshot()));
        assert_eq!(cache.get(false).await, valid_snapshot());
        assert_eq!(verifier.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_preserves_stale_slot_for_retry_not_reuse() {
        // Seed a good snapshot, expire it, then fail the refetch. The caller
        // sees fail-closed (the stale value is past its TTL) and the next
        // call retries the network.
        let (verifier, clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        clock.advance_secs(CACHE_TTL_SECS + 1);
        verifier.set(Err(()));

        assert_eq!(cache.get(false).await, EntitlementSnapshot::fail_closed());
        assert_eq!(cache.get(false).await, EntitlementSnapshot::fail_closed());
        // One seed call plus one attempt per post-expiry get.
        assert_eq!(verifier.calls(), 3);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (verifier, _clock, cache) = world(ScriptedVerifier::ok(valid_snapshot()));

        cache.get(false).await;
        cache.invalidate();
        cache.get(false).await;
        assert_eq!(verifier.calls(), 2);
    }
}
