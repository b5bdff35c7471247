//! Credential registry: account storage and repository.
//!
//! Accounts are keyed by email, compared exactly as stored. Seed accounts
//! live ahead of registered accounts in lookup order, so the built-in
//! admin and retailer always resolve first (identifiers are unique in
//! practice, but the precedence is fixed for determinism).

use chrono::Utc;
use secrecy::SecretString;

use stockist_core::{ApprovalStatus, Email, Role, UserId};

use super::{Directory, RepositoryError};
use crate::models::{Account, BusinessProfile, Enrollment, RetailerRecord};

/// In-memory account table.
#[derive(Debug)]
pub(crate) struct AccountsTable {
    /// Built-in seed accounts, resolved ahead of registered ones.
    seeds: Vec<Account>,
    /// Self-registered accounts, in registration order.
    registered: Vec<Account>,
    next_id: i32,
}

impl Default for AccountsTable {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            registered: Vec::new(),
            next_id: 1,
        }
    }
}

impl AccountsTable {
    /// Insert a seed account.
    pub(crate) fn insert_seed(
        &mut self,
        email: Email,
        secret: SecretString,
        role: Role,
        business_name: &str,
        approval_status: Option<ApprovalStatus>,
    ) -> Result<Account, RepositoryError> {
        let account = self.build(email, secret, role, business_name, approval_status)?;
        self.seeds.push(account.clone());
        Ok(account)
    }

    /// Insert a registered account. Retailers start pending; admins carry
    /// no approval status.
    pub(crate) fn insert(
        &mut self,
        email: Email,
        secret: SecretString,
        role: Role,
        business_name: &str,
    ) -> Result<Account, RepositoryError> {
        let approval_status = match role {
            Role::Retailer => Some(ApprovalStatus::Pending),
            Role::Admin => None,
        };
        let account = self.build(email, secret, role, business_name, approval_status)?;
        self.registered.push(account.clone());
        Ok(account)
    }

    fn build(
        &mut self,
        email: Email,
        secret: SecretString,
        role: Role,
        business_name: &str,
        approval_status: Option<ApprovalStatus>,
    ) -> Result<Account, RepositoryError> {
        if self.find_by_email(&email).is_some() {
            return Err(RepositoryError::Conflict("email already registered".to_owned()));
        }

        let id = UserId::new(self.next_id);
        self.next_id += 1;

        Ok(Account {
            id,
            email,
            secret,
            role,
            profile: BusinessProfile {
                business_name: business_name.to_owned(),
                created_at: Utc::now(),
            },
            approval_status,
        })
    }

    /// Look up an account by email, seeds first.
    pub(crate) fn find_by_email(&self, email: &Email) -> Option<&Account> {
        self.seeds
            .iter()
            .chain(self.registered.iter())
            .find(|account| account.email == *email)
    }

    pub(crate) fn find_by_id(&self, id: UserId) -> Option<&Account> {
        self.seeds
            .iter()
            .chain(self.registered.iter())
            .find(|account| account.id == id)
    }

    fn find_by_id_mut(&mut self, id: UserId) -> Option<&mut Account> {
        self.seeds
            .iter_mut()
            .chain(self.registered.iter_mut())
            .find(|account| account.id == id)
    }

    /// Set a retailer account's approval status.
    ///
    /// Idempotent: setting the current status again is a no-op, not an
    /// error.
    pub(crate) fn set_approval_status(
        &mut self,
        id: UserId,
        status: ApprovalStatus,
    ) -> Result<(), RepositoryError> {
        let account = self
            .find_by_id_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("account {id}")))?;

        if account.role != Role::Retailer {
            return Err(RepositoryError::Consistency(format!(
                "account {id} is not a retailer"
            )));
        }

        account.approval_status = Some(status);
        Ok(())
    }
}

/// Repository for credential registry operations.
///
/// The credential store never touches the retailer registry on its own;
/// the one cross-registry write ([`Self::create_retailer`]) runs both
/// inserts under a single transaction so registration is all-or-nothing.
pub struct AccountRepository<'a> {
    directory: &'a Directory,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered; no state is mutated in that case.
    pub async fn register(
        &self,
        email: &Email,
        secret: &str,
        role: Role,
        business_name: &str,
    ) -> Result<Account, RepositoryError> {
        let mut tables = self.directory.begin().await;
        tables.accounts.insert(
            email.clone(),
            SecretString::from(secret.to_owned()),
            role,
            business_name,
        )
    }

    /// Register a retailer account and enroll its registry record in one
    /// transaction.
    ///
    /// The new account starts `Pending`; the record mirrors it by
    /// construction. If registration fails, no record is created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered or enrolled.
    pub async fn create_retailer(
        &self,
        email: &Email,
        secret: &str,
        business_name: &str,
        enrollment: Enrollment,
    ) -> Result<(Account, RetailerRecord), RepositoryError> {
        let mut tables = self.directory.begin().await;

        let account = tables.accounts.insert(
            email.clone(),
            SecretString::from(secret.to_owned()),
            Role::Retailer,
            business_name,
        )?;

        let row = tables.retailers.enroll(&account, enrollment, Utc::now())?;
        let record = tables.project_retailer(&row)?;

        tracing::info!(
            user_id = %account.id,
            retailer_id = %record.id,
            "registered retailer account"
        );

        Ok((account, record))
    }

    /// Look up an account by email. Seed accounts resolve first.
    pub async fn find_by_email(&self, email: &Email) -> Option<Account> {
        let tables = self.directory.read().await;
        tables.accounts.find_by_email(email).cloned()
    }

    /// Look up an account by ID.
    pub async fn find_by_id(&self, id: UserId) -> Option<Account> {
        let tables = self.directory.read().await;
        tables.accounts.find_by_id(id).cloned()
    }

    /// Set a retailer account's approval status. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown account and
    /// `RepositoryError::Consistency` for a non-retailer account.
    pub async fn set_approval_status(
        &self,
        id: UserId,
        status: ApprovalStatus,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.directory.begin().await;
        tables.accounts.set_approval_status(id, status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::IdentityConfig;

    fn directory() -> Directory {
        Directory::new(&IdentityConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("new@biz.com").unwrap();

        repo.register(&email, "pw123", Role::Retailer, "New Biz")
            .await
            .unwrap();
        let err = repo
            .register(&email, "other", Role::Retailer, "Other Biz")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_seed_email_cannot_be_reregistered() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("admin@example.com").unwrap();

        let err = repo
            .register(&email, "pw123", Role::Retailer, "Imposter")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_new_retailer_starts_pending() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("new@biz.com").unwrap();

        let (account, record) = repo
            .create_retailer(&email, "pw123", "New Biz", Enrollment::default())
            .await
            .unwrap();
        assert_eq!(account.approval_status, Some(ApprovalStatus::Pending));
        assert_eq!(record.status, ApprovalStatus::Pending);
        assert_eq!(record.email, email);
        assert_eq!(record.total_orders, 0);
    }

    #[tokio::test]
    async fn test_admin_account_has_no_approval_status() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("ops@example.com").unwrap();

        let account = repo
            .register(&email, "s3cret99", Role::Admin, "Ops")
            .await
            .unwrap();
        assert_eq!(account.approval_status, None);
    }

    #[tokio::test]
    async fn test_set_approval_status_is_idempotent() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("new@biz.com").unwrap();

        let (account, _) = repo
            .create_retailer(&email, "pw123", "New Biz", Enrollment::default())
            .await
            .unwrap();

        repo.set_approval_status(account.id, ApprovalStatus::Approved)
            .await
            .unwrap();
        repo.set_approval_status(account.id, ApprovalStatus::Approved)
            .await
            .unwrap();

        let account = repo.find_by_id(account.id).await.unwrap();
        assert_eq!(account.approval_status, Some(ApprovalStatus::Approved));
    }

    #[tokio::test]
    async fn test_set_approval_status_rejects_admin_account() {
        let directory = directory();
        let repo = AccountRepository::new(&directory);
        let email = Email::parse("ops@example.com").unwrap();

        let account = repo
            .register(&email, "s3cret99", Role::Admin, "Ops")
            .await
            .unwrap();
        let err = repo
            .set_approval_status(account.id, ApprovalStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Consistency(_)));
    }
}
