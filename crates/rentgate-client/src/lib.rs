//! # rentgate-client — Dashboard-Side Entitlement Plumbing
//!
//! What the dashboard process runs to answer "what may I show right now?":
//!
//! - **Verifier** (`verify.rs`): the HTTP call to `/license-verify`, with
//!   transport-level retry and a hard 5-second timeout.
//! - **Cache** (`cache.rs`): a 10-minute TTL over the verification result,
//!   failing closed (read-only, never wrongly editable) when the backend is
//!   unreachable.
//! - **Refresher** (`refresher.rs`): a background task that keeps the cache
//!   warm for the lifetime of the session.
//! - **Gate** (`gate.rs`): snapshot → one of four views (sign-in, read-only,
//!   trial advisory, full access).
//!
//! ## Wiring
//!
//! ```no_run
//! # async fn wire() -> Result<(), rentgate_client::ClientError> {
//! use std::sync::Arc;
//! use rentgate_client::{AccessGate, CacheRefresher, EntitlementCache, HttpVerifier};
//! use rentgate_core::SystemClock;
//!
//! let verifier = Arc::new(HttpVerifier::new("http://localhost:8080", "tok_abc")?);
//! let cache = Arc::new(EntitlementCache::new(verifier, Arc::new(SystemClock)));
//! let _refresher = CacheRefresher::spawn(cache.clone());
//!
//! let snapshot = cache.get(false).await;
//! let view = AccessGate.decide(Some(&snapshot));
//! # let _ = view; Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod gate;
pub mod refresher;
mod retry;
pub mod verify;

// ─── Cache re-exports ────────────────────────────────────────────────

pub use cache::{EntitlementCache, CACHE_TTL_SECS};

// ─── Verifier re-exports ─────────────────────────────────────────────

pub use verify::{EntitlementVerifier, HttpVerifier, VerifyFuture};

// ─── Refresher re-exports ────────────────────────────────────────────

pub use refresher::{CacheRefresher, REFRESH_INTERVAL};

// ─── Gate re-exports ─────────────────────────────────────────────────

pub use gate::{AccessGate, GateView};

// ─── Error re-exports ────────────────────────────────────────────────

pub use error::ClientError;
