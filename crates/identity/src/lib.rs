//! Stockist Identity - credential, session, and retailer-approval subsystem.
//!
//! This crate is the core the marketplace UI collaborates with. It:
//!
//! - issues and validates credentials ([`directory::AccountRepository`])
//! - mints and tracks sessions ([`services::SessionService`])
//! - assigns roles and centralizes capability checks
//!   ([`services::AuthService::has_role`])
//! - drives retailer accounts through the pending → approved/rejected
//!   approval workflow ([`services::ApprovalService`])
//!
//! # Architecture
//!
//! State lives in a process-owned [`Directory`] handle that is injected into
//! every service - there is no ambient global registry. Approval status is
//! stored once, on the account; the operational [`models::RetailerRecord`]
//! view joins it in at read time, so the credential registry and the
//! retailer registry cannot diverge.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`directory`] - Account and retailer registries plus repositories
//! - [`models`] - Domain types (accounts, sessions, retailer records)
//! - [`services`] - Session manager, approval driver, and the auth facade
//! - [`seed`] - Deterministic seed accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod directory;
pub mod models;
pub mod seed;
pub mod services;

pub use config::{ConfigError, IdentityConfig};
pub use directory::{AccountRepository, Directory, RepositoryError, RetailerRepository};
pub use models::{
    Account, BusinessProfile, Enrollment, RetailerFilter, RetailerRecord, Session,
};
pub use services::approval::ApprovalService;
pub use services::auth::{AuthError, AuthService, SignUp};
pub use services::sessions::{SessionError, SessionService};
