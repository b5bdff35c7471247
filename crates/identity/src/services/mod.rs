//! Services layered over the directory.
//!
//! - [`sessions`] - Session minting, validation, and revocation
//! - [`approval`] - Admin-triggered approval lifecycle driver
//! - [`auth`] - The facade the UI collaborator calls

pub mod approval;
pub mod auth;
pub mod sessions;
