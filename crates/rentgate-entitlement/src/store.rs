//! # Entitlement Store
//!
//! The persistence contract for entitlement records and checkout sessions,
//! plus an in-memory implementation used by the server default wiring and
//! every test.
//!
//! ## Atomicity
//!
//! [`EntitlementStore::update_entitlement`] is the store's atomic
//! read-modify-write primitive. Settlement is the single point of contention
//! on `expires_at` for a given account: the closure runs while the
//! implementation holds whatever exclusion it provides (a write lock here, a
//! row lock or compare-and-set in a SQL-backed implementation), so two
//! concurrent extensions cannot both read the same stale expiry.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use rentgate_core::{AccountId, CheckoutSessionId};

use crate::checkout::{CheckoutSession, CheckoutStatus};
use crate::error::EntitlementError;
use crate::record::Entitlement;

/// Errors from the backing store.
///
/// Transient by definition — callers surface these for the caller's retry
/// policy (webhooks) or fail closed (verification).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend is unreachable or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract for entitlements and checkout sessions.
///
/// Implementations must be `Send + Sync`; the store is shared across request
/// handlers behind an `Arc`.
pub trait EntitlementStore: Send + Sync {
    /// Load an account's entitlement record.
    fn get_entitlement(&self, account_id: &AccountId) -> Result<Option<Entitlement>, StoreError>;

    /// Insert or replace an entitlement record.
    fn put_entitlement(&self, entitlement: Entitlement) -> Result<(), StoreError>;

    /// Atomically mutate an account's entitlement record.
    ///
    /// The closure observes the current record and mutates it in place; the
    /// store guarantees no other writer interleaves. Fails with
    /// `AccountNotFound` when the account has no record — settlement never
    /// provisions accounts.
    fn update_entitlement(
        &self,
        account_id: &AccountId,
        f: &mut dyn FnMut(&mut Entitlement) -> Result<(), EntitlementError>,
    ) -> Result<Entitlement, EntitlementError>;

    /// Persist a new checkout session.
    fn insert_session(&self, session: CheckoutSession) -> Result<(), StoreError>;

    /// Load a checkout session.
    fn get_session(
        &self,
        session_id: &CheckoutSessionId,
    ) -> Result<Option<CheckoutSession>, StoreError>;

    /// Record a provider-driven session status change.
    fn set_session_status(
        &self,
        session_id: &CheckoutSessionId,
        status: CheckoutStatus,
    ) -> Result<(), EntitlementError>;
}

/// In-memory store backed by `parking_lot::RwLock` maps.
///
/// The write lock held across `update_entitlement`'s closure provides the
/// serialization the trait contract requires.
#[derive(Default)]
pub struct InMemoryEntitlementStore {
    entitlements: RwLock<HashMap<AccountId, Entitlement>>,
    sessions: RwLock<HashMap<CheckoutSessionId, CheckoutSession>>,
}

impl InMemoryEntitlementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entitlement records (readiness probes).
    pub fn entitlement_count(&self) -> usize {
        self.entitlements.read().len()
    }

    /// Number of checkout sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl EntitlementStore for InMemoryEntitlementStore {
    fn get_entitlement(&self, account_id: &AccountId) -> Result<Option<Entitlement>, StoreError> {
        Ok(self.entitlements.read().get(account_id).cloned())
    }

    fn put_entitlement(&self, entitlement: Entitlement) -> Result<(), StoreError> {
        self.entitlements
            .write()
            .insert(entitlement.account_id, entitlement);
        Ok(())
    }

    fn update_entitlement(
        &self,
        account_id: &AccountId,
        f: &mut dyn FnMut(&mut Entitlement) -> Result<(), EntitlementError>,
    ) -> Result<Entitlement, EntitlementError> {
        let mut guard = self.entitlements.write();
        let entitlement = guard
            .get_mut(account_id)
            .ok_or(EntitlementError::AccountNotFound(*account_id))?;
        f(entitlement)?;
        Ok(entitlement.clone())
    }

    fn insert_session(&self, session: CheckoutSession) -> Result<(), StoreError> {
        self.sessions.write().insert(session.id, session);
        Ok(())
    }

    fn get_session(
        &self,
        session_id: &CheckoutSessionId,
    ) -> Result<Option<CheckoutSession>, StoreError> {
        Ok(self.sessions.read().get(session_id).cloned())
    }

    fn set_session_status(
        &self,
        session_id: &CheckoutSessionId,
        status: CheckoutStatus,
    ) -> Result<(), EntitlementError> {
        let mut guard = self.sessions.write();
        let session = guard
            .get_mut(session_id)
            .ok_or(EntitlementError::SessionNotFound(*session_id))?;
        match status {
            CheckoutStatus::Paid => session.mark_paid()?,
            CheckoutStatus::Failed => session.mark_failed()?,
            CheckoutStatus::Expired => session.mark_expired()?,
            CheckoutStatus::Created => {
                return Err(EntitlementError::InvalidPayload(
                    "cannot transition a session back to created".to_string(),
                ))
            }
        }
        Ok(())
    }
}
