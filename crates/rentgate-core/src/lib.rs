//! # rentgate-core — Foundational Types for Rentgate
//!
//! Rentgate is the licensing/entitlement subsystem that gates write access to
//! a property-rental management dashboard. This crate is the bedrock of the
//! workspace: it defines the type-system primitives every other crate builds
//! on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `AccountId`,
//!    `CheckoutSessionId`, `PlanId`, `PaymentId` — all newtypes with validated
//!    constructors. No bare strings or UUIDs for identifiers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with seconds
//!    precision. All expiry math (`plus_days`, `seconds_until`) lives on this
//!    type so there is exactly one place where day arithmetic can go wrong.
//!
//! 3. **Injected time source.** Nothing outside [`clock::SystemClock`] calls
//!    `Timestamp::now()` directly in production paths — entitlement evaluation
//!    and cache freshness take their instant from a [`clock::Clock`], which
//!    tests replace with [`clock::FixedClock`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rentgate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a wire.

pub mod clock;
pub mod error;
pub mod identity;
pub mod plan;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use identity::{AccountId, CheckoutSessionId, PaymentId, PlanId};
pub use plan::{Plan, PlanCatalog};
pub use temporal::Timestamp;
