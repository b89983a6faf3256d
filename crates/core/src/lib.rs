//! Plant Shop Core - Shared domain types.
//!
//! This crate provides the types used by the plant shop API:
//! - `api` - JSON-over-HTTP storefront (signup, catalog, favorites, cart)
//! - `integration-tests` - Black-box tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Database encoding is opt-in via the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
