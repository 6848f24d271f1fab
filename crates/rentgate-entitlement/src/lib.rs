//! # rentgate-entitlement — Entitlement Domain Core
//!
//! The state and temporal logic behind "may this account edit right now?".
//! Everything else in the product (dashboard pages, CRUD hooks, charts) is
//! presentation that consumes the answer computed here.
//!
//! ## Pieces
//!
//! - **Evaluator** (`snapshot.rs`): pure function
//!   `(now, expires_at) → EntitlementSnapshot`. No I/O, exhaustively testable.
//!
//! - **Entitlement record** (`record.rs`): the persisted per-account state —
//!   an optional expiration instant (`None` = perpetual) plus the ledger of
//!   applied payments that makes settlement idempotent.
//!
//! - **Checkout sessions** (`checkout.rs`): `Created → Paid | Failed | Expired`.
//!   Transitions are driven by the payment provider and observed, not
//!   performed, by this subsystem.
//!
//! - **Settlement** (`settlement.rs`): the only writer of `expires_at`.
//!   Extends, never shortens: `new = max(now, current) + days`. Duplicate
//!   delivery of the same `payment_id` is a no-op returning the
//!   already-applied result.
//!
//! - **Store** (`store.rs`): the persistence contract with an atomic
//!   read-modify-write primitive, and an in-memory implementation. Concurrent
//!   settlements for the same account serialize through
//!   [`store::EntitlementStore::update_entitlement`], which is what keeps
//!   `expires_at` monotonically non-decreasing under races.
//!
//! ## Invariants
//!
//! - `expires_at`, once set, never moves backward.
//! - Applying the same `payment_id` twice yields the same result as once.
//! - The snapshot is derived state, never a source of truth.

pub mod checkout;
pub mod error;
pub mod record;
pub mod settlement;
pub mod snapshot;
pub mod store;

// ─── Snapshot re-exports ─────────────────────────────────────────────

pub use snapshot::{evaluate, evaluate_with_window, EntitlementSnapshot, TRIAL_WINDOW_DAYS};

// ─── Record re-exports ───────────────────────────────────────────────

pub use record::{AppliedPayment, Entitlement};

// ─── Checkout re-exports ─────────────────────────────────────────────

pub use checkout::{CheckoutError, CheckoutSession, CheckoutStatus};

// ─── Settlement re-exports ───────────────────────────────────────────

pub use settlement::{apply_settlement, SettlementOutcome, MAX_SETTLEMENT_DAYS};

// ─── Store re-exports ────────────────────────────────────────────────

pub use store::{EntitlementStore, InMemoryEntitlementStore, StoreError};

// ─── Error re-exports ────────────────────────────────────────────────

pub use error::EntitlementError;
