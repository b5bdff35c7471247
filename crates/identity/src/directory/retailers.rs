//! Retailer registry: operational records and repository.
//!
//! The registry synchronizer half of the subsystem. Enrollment happens in
//! the same transaction as account creation (see
//! [`super::AccountRepository::create_retailer`]); approval transitions
//! come through [`RetailerRepository::apply_transition`], which joins the
//! record to its account by email and writes the status once, on the
//! account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use stockist_core::{ApprovalAction, ApprovalStatus, Email, Price, RetailerId, RetailerType};

use super::{Directory, RepositoryError};
use crate::models::{Account, Enrollment, RetailerFilter, RetailerRecord};

/// Internal row type for the retailer table.
///
/// Deliberately carries no approval status; that lives on the account and
/// is joined in at projection time.
#[derive(Debug, Clone)]
pub(crate) struct RetailerRow {
    pub(crate) id: RetailerId,
    pub(crate) name: String,
    pub(crate) email: Email,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) retailer_type: RetailerType,
    pub(crate) registration_date: DateTime<Utc>,
    pub(crate) last_order_date: Option<DateTime<Utc>>,
    pub(crate) total_orders: u32,
    pub(crate) total_spent: Price,
}

impl RetailerRow {
    /// Build the public record, attaching the projected approval status.
    pub(crate) fn project(&self, status: ApprovalStatus) -> RetailerRecord {
        RetailerRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            retailer_type: self.retailer_type,
            status,
            registration_date: self.registration_date,
            last_order_date: self.last_order_date,
            total_orders: self.total_orders,
            total_spent: self.total_spent,
        }
    }
}

/// In-memory retailer table, in enrollment order.
#[derive(Debug)]
pub(crate) struct RetailersTable {
    rows: Vec<RetailerRow>,
    next_seq: u32,
}

impl Default for RetailersTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_seq: 1,
        }
    }
}

impl RetailersTable {
    /// Enroll a retailer account, assigning the next registry ID.
    ///
    /// New records carry zeroed order stats; status comes from the account
    /// via projection, so a freshly enrolled retailer reads as pending.
    pub(crate) fn enroll(
        &mut self,
        account: &Account,
        enrollment: Enrollment,
        now: DateTime<Utc>,
    ) -> Result<RetailerRow, RepositoryError> {
        if self.row_by_email(&account.email).is_some() {
            return Err(RepositoryError::Conflict(format!(
                "retailer already enrolled for {}",
                account.email
            )));
        }

        let row = RetailerRow {
            id: RetailerId::from_sequence(self.next_seq),
            name: account.profile.business_name.clone(),
            email: account.email.clone(),
            phone: enrollment.phone,
            address: enrollment.address,
            retailer_type: enrollment.retailer_type,
            registration_date: now,
            last_order_date: None,
            total_orders: 0,
            total_spent: Price::default(),
        };
        self.next_seq += 1;
        self.rows.push(row.clone());

        Ok(row)
    }

    pub(crate) fn row_by_id(&self, id: &RetailerId) -> Option<&RetailerRow> {
        self.rows.iter().find(|row| row.id == *id)
    }

    fn row_by_id_mut(&mut self, id: &RetailerId) -> Option<&mut RetailerRow> {
        self.rows.iter_mut().find(|row| row.id == *id)
    }

    pub(crate) fn row_by_email(&self, email: &Email) -> Option<&RetailerRow> {
        self.rows.iter().find(|row| row.email == *email)
    }

    /// Rows in enrollment (registration) order.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &RetailerRow> {
        self.rows.iter()
    }
}

/// Repository for retailer registry operations.
pub struct RetailerRepository<'a> {
    directory: &'a Directory,
}

impl<'a> RetailerRepository<'a> {
    /// Create a new retailer repository.
    #[must_use]
    pub const fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    /// Fetch a record by registry ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID and
    /// `RepositoryError::Consistency` if the backing account is missing.
    pub async fn get(&self, id: &RetailerId) -> Result<RetailerRecord, RepositoryError> {
        let tables = self.directory.read().await;
        let row = tables
            .retailers
            .row_by_id(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("retailer {id}")))?;
        tables.project_retailer(row)
    }

    /// Fetch the record mirroring an account, by its email join key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Consistency` if a record exists but its
    /// backing account is gone.
    pub async fn get_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<RetailerRecord>, RepositoryError> {
        let tables = self.directory.read().await;
        match tables.retailers.row_by_email(email) {
            Some(row) => Ok(Some(tables.project_retailer(row)?)),
            None => Ok(None),
        }
    }

    /// List records in registration order, filtered by the conjunction of
    /// any provided criteria.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Consistency` if any record has no backing
    /// account.
    pub async fn list(
        &self,
        filter: &RetailerFilter,
    ) -> Result<Vec<RetailerRecord>, RepositoryError> {
        let tables = self.directory.read().await;
        let mut records = Vec::new();
        for row in tables.retailers.rows() {
            let record = tables.project_retailer(row)?;
            if filter.matches(&record) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Apply an approval transition to the retailer with the given registry
    /// ID.
    ///
    /// Runs as one atomic write: record lookup by ID, account join by
    /// email, then a single status write on the account. Repeating a
    /// transition is a no-op that returns the same end state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown registry ID and
    /// `RepositoryError::Consistency` if the record's backing account is
    /// missing or not a retailer. No partial write occurs in either case.
    pub async fn apply_transition(
        &self,
        id: &RetailerId,
        action: ApprovalAction,
    ) -> Result<RetailerRecord, RepositoryError> {
        let mut tables = self.directory.begin().await;

        let email = tables
            .retailers
            .row_by_id(id)
            .map(|row| row.email.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("retailer {id}")))?;

        let account = tables.accounts.find_by_email(&email).ok_or_else(|| {
            RepositoryError::Consistency(format!(
                "retailer record {id} has no backing account for {email}"
            ))
        })?;
        let account_id = account.id;
        let current = account.approval_status.ok_or_else(|| {
            RepositoryError::Consistency(format!(
                "retailer record {id} is backed by non-retailer account {account_id}"
            ))
        })?;

        let next = current.apply(action);
        tables.accounts.set_approval_status(account_id, next)?;

        let row = tables
            .retailers
            .row_by_id(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("retailer {id}")))?;
        Ok(row.project(next))
    }

    /// Record a completed order against a retailer: bump the order count,
    /// add to lifetime spend, and stamp the last order date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown registry ID.
    pub async fn record_order(
        &self,
        id: &RetailerId,
        amount: Decimal,
    ) -> Result<RetailerRecord, RepositoryError> {
        let mut tables = self.directory.begin().await;

        let row = {
            let row = tables
                .retailers
                .row_by_id_mut(id)
                .ok_or_else(|| RepositoryError::NotFound(format!("retailer {id}")))?;
            row.total_orders += 1;
            row.total_spent = row.total_spent.plus(amount);
            row.last_order_date = Some(Utc::now());
            row.clone()
        };

        tables.project_retailer(&row)
    }
}
