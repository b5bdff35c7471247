//! Stockist Core - Shared types library.
//!
//! This crate provides common types used across all Stockist crates, chiefly
//! `stockist-identity` (credential, session, and retailer-approval subsystem)
//! and its integration-test crate.
//!
//! # Architecture
//!
//! The core crate contains only types and transition logic - no I/O, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles,
//!   and approval statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
