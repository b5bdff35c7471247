//! Approval lifecycle service.
//!
//! Drives retailer accounts through pending → approved/rejected. All
//! transitions are admin-triggered; neither end state is terminal, so an
//! admin can suspend an approved retailer or reactivate a rejected one.
//! Capability checks belong to the boundary (see
//! [`crate::services::auth::AuthService::has_role`]); this service trusts
//! its caller.

use rust_decimal::Decimal;

use stockist_core::{ApprovalAction, RetailerId};

use crate::directory::{Directory, RepositoryError, RetailerRepository};
use crate::models::{RetailerFilter, RetailerRecord};

/// Admin-facing driver for the retailer approval lifecycle and the
/// registry listings behind the management UI.
pub struct ApprovalService {
    directory: Directory,
}

impl ApprovalService {
    /// Create a new approval service.
    #[must_use]
    pub const fn new(directory: Directory) -> Self {
        Self { directory }
    }

    /// Approve (or reactivate) a retailer. Valid from any current state
    /// and idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown registry ID and
    /// `RepositoryError::Consistency` if the record has no backing
    /// retailer account. No partial write occurs.
    pub async fn approve(&self, id: &RetailerId) -> Result<RetailerRecord, RepositoryError> {
        self.transition(id, ApprovalAction::Approve).await
    }

    /// Reject (or suspend) a retailer. Valid from any current state and
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::approve`].
    pub async fn reject(&self, id: &RetailerId) -> Result<RetailerRecord, RepositoryError> {
        self.transition(id, ApprovalAction::Reject).await
    }

    async fn transition(
        &self,
        id: &RetailerId,
        action: ApprovalAction,
    ) -> Result<RetailerRecord, RepositoryError> {
        let record = RetailerRepository::new(&self.directory)
            .apply_transition(id, action)
            .await?;

        tracing::info!(
            retailer_id = %record.id,
            status = %record.status,
            "approval transition applied"
        );
        Ok(record)
    }

    /// Fetch one retailer record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown registry ID.
    pub async fn get(&self, id: &RetailerId) -> Result<RetailerRecord, RepositoryError> {
        RetailerRepository::new(&self.directory).get(id).await
    }

    /// List retailer records in registration order, filtered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Consistency` if any record has lost its
    /// backing account.
    pub async fn list(
        &self,
        filter: &RetailerFilter,
    ) -> Result<Vec<RetailerRecord>, RepositoryError> {
        RetailerRepository::new(&self.directory).list(filter).await
    }

    /// Record a completed order against a retailer's operational stats.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown registry ID.
    pub async fn record_order(
        &self,
        id: &RetailerId,
        amount: Decimal,
    ) -> Result<RetailerRecord, RepositoryError> {
        RetailerRepository::new(&self.directory)
            .record_order(id, amount)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::IdentityConfig;
    use crate::directory::AccountRepository;
    use crate::models::Enrollment;
    use stockist_core::{ApprovalStatus, Email};

    async fn setup() -> (Directory, RetailerRecord) {
        let directory = Directory::new(&IdentityConfig::default()).unwrap();
        let email = Email::parse("new@biz.com").unwrap();
        let (_, record) = AccountRepository::new(&directory)
            .create_retailer(&email, "pw123", "New Biz", Enrollment::default())
            .await
            .unwrap();
        (directory, record)
    }

    #[tokio::test]
    async fn test_approve_then_reject_then_approve() {
        let (directory, record) = setup().await;
        let approvals = ApprovalService::new(directory);

        approvals.approve(&record.id).await.unwrap();
        approvals.reject(&record.id).await.unwrap();
        let last = approvals.approve(&record.id).await.unwrap();

        assert_eq!(last.status, ApprovalStatus::Approved);
        // No residue from intermediate states.
        let fetched = approvals.get(&record.id).await.unwrap();
        assert_eq!(fetched.status, ApprovalStatus::Approved);
        assert_eq!(fetched.total_orders, record.total_orders);
    }

    #[tokio::test]
    async fn test_repeated_approve_is_idempotent() {
        let (directory, record) = setup().await;
        let approvals = ApprovalService::new(directory);

        let first = approvals.approve(&record.id).await.unwrap();
        let second = approvals.approve(&record.id).await.unwrap();
        assert_eq!(first.status, second.status);
    }

    #[tokio::test]
    async fn test_unknown_retailer_is_not_found() {
        let (directory, _) = setup().await;
        let approvals = ApprovalService::new(directory);

        let err = approvals
            .approve(&RetailerId::from("RET-404"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_both_views_agree_after_transition() {
        let (directory, record) = setup().await;
        let approvals = ApprovalService::new(directory.clone());

        approvals.approve(&record.id).await.unwrap();

        let account = AccountRepository::new(&directory)
            .find_by_email(&record.email)
            .await
            .unwrap();
        let projected = approvals.get(&record.id).await.unwrap();
        assert_eq!(account.approval_status, Some(projected.status));
        assert_eq!(projected.status, ApprovalStatus::Approved);
    }
}
