//! # Entitlement Error Taxonomy
//!
//! Domain errors for entitlement operations. The API layer maps these to
//! HTTP status codes; nothing here knows about HTTP.

use thiserror::Error;

use rentgate_core::{AccountId, CheckoutSessionId, PlanId};

use crate::checkout::CheckoutError;
use crate::store::StoreError;

/// Errors from entitlement operations.
///
/// `Unauthenticated` lives at the API layer (it is a property of the request,
/// not of the domain); every other failure class is here.
#[derive(Error, Debug)]
pub enum EntitlementError {
    /// The account has no entitlement record. Every account is provisioned
    /// one at signup, so this is a data integrity violation — terminal, not
    /// retried.
    #[error("no entitlement record for {0}")]
    AccountNotFound(AccountId),

    /// The requested plan does not exist in the catalog.
    #[error("unknown plan: {0}")]
    PlanNotFound(PlanId),

    /// The checkout session does not exist.
    #[error("unknown checkout session: {0}")]
    SessionNotFound(CheckoutSessionId),

    /// The checkout session belongs to a different account.
    #[error("checkout session {0} is not owned by the requesting account")]
    Forbidden(CheckoutSessionId),

    /// A mutation carried a missing or non-positive field.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Checkout session lifecycle violation.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The backing store failed transiently.
    #[error(transparent)]
    Store(#[from] StoreError),
}
