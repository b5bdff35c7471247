//! Account domain types.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use stockist_core::{ApprovalStatus, Email, Role, UserId};

/// An identity record in the credential registry.
///
/// Created on successful registration, mutated only by approval
/// transitions, never hard-deleted. Retailer accounts carry an approval
/// status; admin accounts carry `None`.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique, immutable account ID.
    pub id: UserId,
    /// Login identifier, unique and case-sensitive as stored.
    pub email: Email,
    /// Credential secret, stored verbatim (mock design; hardening is an
    /// explicit non-goal). `SecretString` keeps it out of Debug output.
    pub(crate) secret: SecretString,
    /// Account role.
    pub role: Role,
    /// Business profile metadata.
    pub profile: BusinessProfile,
    /// Approval lifecycle status; `Some` only when `role` is retailer.
    pub approval_status: Option<ApprovalStatus>,
}

impl Account {
    /// Compare a presented secret against the stored one.
    ///
    /// Verbatim comparison, matching the mock credential design.
    pub(crate) fn verify_secret(&self, presented: &str) -> bool {
        self.secret.expose_secret() == presented
    }
}

/// Business profile metadata attached to an account.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    /// Business name supplied at registration.
    pub business_name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(secret: &str) -> Account {
        Account {
            id: UserId::new(1),
            email: Email::parse("owner@biz.com").unwrap_or_else(|_| unreachable!()),
            secret: SecretString::from(secret.to_owned()),
            role: Role::Retailer,
            profile: BusinessProfile {
                business_name: "Biz".to_owned(),
                created_at: Utc::now(),
            },
            approval_status: Some(ApprovalStatus::Pending),
        }
    }

    #[test]
    fn test_verify_secret_verbatim() {
        let account = account("pw123");
        assert!(account.verify_secret("pw123"));
        assert!(!account.verify_secret("PW123"));
        assert!(!account.verify_secret(""));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let account = account("pw123");
        let debug = format!("{account:?}");
        assert!(!debug.contains("pw123"));
    }
}
