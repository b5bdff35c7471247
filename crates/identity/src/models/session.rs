//! Session domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockist_core::{ApprovalStatus, Role, UserId};

/// A short-lived proof of authentication bound to one account and one role.
///
/// Tokens are opaque random values; expiry is a passive TTL check performed
/// at use time, never an active eviction sweep. The resolved role and, for
/// retailers, approval status ride on the session so the caller can branch
/// without another registry read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token presented on each call.
    pub access_token: String,
    /// Opaque token for re-issuing an expired session.
    pub refresh_token: String,
    /// When the session was minted.
    pub issued_at: DateTime<Utc>,
    /// When the session stops validating.
    pub expires_at: DateTime<Utc>,
    /// Owning account.
    pub user_id: UserId,
    /// Role resolved at sign-in.
    pub role: Role,
    /// Approval status resolved at sign-in; `Some` only for retailers.
    pub approval_status: Option<ApprovalStatus>,
}

impl Session {
    /// Whether the session has expired as of `now` (`now >= expires_at`).
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(now: DateTime<Utc>) -> Session {
        Session {
            access_token: "token".to_owned(),
            refresh_token: "refresh".to_owned(),
            issued_at: now,
            expires_at: now + Duration::seconds(3600),
            user_id: UserId::new(1),
            role: Role::Retailer,
            approval_status: Some(ApprovalStatus::Pending),
        }
    }

    #[test]
    fn test_not_expired_before_ttl() {
        let now = Utc::now();
        let session = session(now);
        assert!(!session.is_expired_at(now + Duration::seconds(3599)));
    }

    #[test]
    fn test_expired_exactly_at_ttl() {
        let now = Utc::now();
        let session = session(now);
        assert!(session.is_expired_at(now + Duration::seconds(3600)));
        assert!(session.is_expired_at(now + Duration::seconds(3601)));
    }
}
