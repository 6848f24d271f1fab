//! # Background Cache Refresher
//!
//! Keeps the entitlement cache warm so the user never waits on a
//! verification round-trip mid-session. Re-verifies on a fixed interval;
//! the cache's own failure handling applies, so a dead backend degrades
//! the gate to read-only rather than crashing the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::cache::EntitlementCache;

/// Interval between background refreshes. Matches the cache TTL: the timer
/// re-verifies exactly as a cached snapshot ages out, whether or not any
/// read traffic would have noticed.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(crate::cache::CACHE_TTL_SECS as u64);

/// Owns the background refresh task; aborts it on drop.
pub struct CacheRefresher {
    handle: JoinHandle<()>,
}

impl CacheRefresher {
    /// Spawn a refresher over `cache` with the default interval.
    pub fn spawn(cache: Arc<EntitlementCache>) -> Self {
        Self::spawn_with_interval(cache, REFRESH_INTERVAL)
    }

    /// Spawn a refresher with an explicit interval.
    pub fn spawn_with_interval(cache: Arc<EntitlementCache>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it, the caller already
            // verified on startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let snapshot = cache.get(true).await;
                tracing::debug!(
                    valid = snapshot.is_valid,
                    can_edit = snapshot.can_edit,
                    "background entitlement refresh"
                );
            }
        });
        Self { handle }
    }

    /// Stop the refresh loop.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for CacheRefresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use rentgate_core::{FixedClock, Timestamp};
    use rentgate_entitlement::EntitlementSnapshot;

    use crate::error::ClientError;
    use crate::verify::{EntitlementVerifier, VerifyFuture};

    struct CountingVerifier {
        calls: AtomicU32,
    }

    impl EntitlementVerifier for CountingVerifier {
        fn verify(&self) -> VerifyFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async {
                Ok::<_, ClientError>(EntitlementSnapshot {
                    is_valid: true,
                    is_trial: false,
                    days_remaining: Some(30),
                    can_edit: true,
                })
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresher_reverifies_on_interval() {
        let verifier = Arc::new(CountingVerifier {
            calls: AtomicU32::new(0),
        });
        let clock = FixedClock::at(Timestamp::parse("2026-03-01T12:00:00Z").unwrap());
        let cache = Arc::new(EntitlementCache::new(verifier.clone(), Arc::new(clock)));

        let refresher =
            CacheRefresher::spawn_with_interval(cache, Duration::from_secs(60));

        // Three intervals of paused tokio time.
        tokio::time::sleep(Duration::from_secs(185)).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 3);

        refresher.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_the_loop() {
        let verifier = Arc::new(CountingVerifier {
            calls: AtomicU32::new(0),
        });
        let clock = FixedClock::at(Timestamp::parse("2026-03-01T12:00:00Z").unwrap());
        let cache = Arc::new(EntitlementCache::new(verifier.clone(), Arc::new(clock)));

        let refresher =
            CacheRefresher::spawn_with_interval(cache, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(65)).await;
        let before = verifier.calls.load(Ordering::SeqCst);
        assert!(before >= 1);

        refresher.shutdown();
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), before);
    }
}
