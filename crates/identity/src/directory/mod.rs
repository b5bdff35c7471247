//! The directory: process-owned registries behind one lock.
//!
//! # Tables
//!
//! - `accounts` - Credential registry, keyed by email
//! - `retailers` - Operational retailer registry, keyed by retailer ID
//!
//! The [`Directory`] is an explicit, injected store handle owned by the
//! process (initialized at startup, dropped at shutdown) - the replacement
//! for the ambient browser-global registries of the original UI. A single
//! async `RwLock` over both tables serializes every mutating operation, so
//! a write that touches both registries is atomic and the cross-registry
//! invariant holds after every call.
//!
//! Approval status is stored once, on the account. The retailer table holds
//! operational fields only; [`Tables::project_retailer`] joins the status in
//! by email when a [`RetailerRecord`] leaves the directory.

pub mod accounts;
pub mod retailers;

pub use accounts::AccountRepository;
pub use retailers::RetailerRepository;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::IdentityConfig;
use crate::models::RetailerRecord;
use crate::seed;

use accounts::AccountsTable;
use retailers::{RetailerRow, RetailersTable};

/// Errors surfaced by directory operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated (duplicate email, duplicate
    /// enrollment). Raised before any write occurs.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced entity does not exist. No partial write occurs.
    #[error("not found: {0}")]
    NotFound(String),

    /// The two registries disagree - a retailer account with no mirrored
    /// record, or a record whose backing account is missing. Indicates a
    /// synchronization bug; callers must fail loudly, never skip.
    #[error("consistency violation: {0}")]
    Consistency(String),
}

/// Both registries, guarded together.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) accounts: AccountsTable,
    pub(crate) retailers: RetailersTable,
}

impl Tables {
    /// Project a retailer row into its public record, joining the approval
    /// status from the owning account by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Consistency` if the backing account is
    /// missing or is not a retailer.
    pub(crate) fn project_retailer(
        &self,
        row: &RetailerRow,
    ) -> Result<RetailerRecord, RepositoryError> {
        let account = self.accounts.find_by_email(&row.email).ok_or_else(|| {
            RepositoryError::Consistency(format!(
                "retailer record {} has no backing account for {}",
                row.id, row.email
            ))
        })?;

        let status = account.approval_status.ok_or_else(|| {
            RepositoryError::Consistency(format!(
                "retailer record {} is backed by non-retailer account {}",
                row.id, account.id
            ))
        })?;

        Ok(row.project(status))
    }
}

/// Handle to the identity directory.
///
/// Cheaply cloneable; every clone shares the same underlying tables. Inject
/// one handle into each service at startup.
#[derive(Debug, Clone)]
pub struct Directory {
    tables: Arc<RwLock<Tables>>,
}

impl Directory {
    /// Create a directory seeded with the deterministic accounts from the
    /// configuration (one admin, one pre-approved retailer).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the configured seed accounts
    /// collide with each other.
    pub fn new(config: &IdentityConfig) -> Result<Self, RepositoryError> {
        let mut tables = Tables::default();
        seed::apply(&mut tables, config)?;

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// Acquire the write lock over both tables.
    ///
    /// Every mutating operation runs under this single guard, which is what
    /// makes cross-table writes atomic.
    pub(crate) async fn begin(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    /// Acquire a shared read view over both tables.
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }
}
