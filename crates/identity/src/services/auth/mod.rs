//! Authentication facade.
//!
//! The public surface the UI collaborator calls: `sign_in`, `sign_up`,
//! `sign_out`, plus the centralized capability check every collaborator is
//! expected to use instead of ad hoc role string comparison.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};

use stockist_core::{Email, Role};

use crate::config::IdentityConfig;
use crate::directory::{AccountRepository, Directory, RepositoryError};
use crate::models::{Account, Enrollment, RetailerRecord, Session};
use crate::services::sessions::SessionService;

/// Business name recorded when self-service registration omits one.
const DEFAULT_BUSINESS_NAME: &str = "New Business";

/// Result of a successful registration: the new account, its registry
/// record, and the auto-issued session.
#[derive(Debug)]
pub struct SignUp {
    /// The freshly created account (approval status pending).
    pub account: Account,
    /// The mirrored retailer registry record.
    pub record: RetailerRecord,
    /// Session issued by the auto-login that follows registration.
    pub session: Session,
}

/// Authentication facade.
///
/// Orchestrates the credential registry, retailer registry, and session
/// manager behind the three boundary operations.
pub struct AuthService {
    directory: Directory,
    sessions: SessionService,
}

impl AuthService {
    /// Create a new authentication facade over a directory.
    #[must_use]
    pub fn new(directory: Directory, config: &IdentityConfig) -> Self {
        let sessions = SessionService::new(directory.clone(), config.session_ttl());
        Self {
            directory,
            sessions,
        }
    }

    /// Sign in with an identifier and secret.
    ///
    /// The returned session carries the resolved role and, for retailers,
    /// the approval status, so the caller can branch without another
    /// registry read. Branching itself is the UI's concern.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair matches no
    /// account; no session is issued and no state changes.
    pub async fn sign_in(&self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
        let session = self.sessions.authenticate(identifier, secret).await?;
        tracing::info!(user_id = %session.user_id, role = %session.role, "sign-in");
        Ok(session)
    }

    /// Register a retailer and sign them in.
    ///
    /// Registration, registry enrollment, and auto-login form one logical
    /// transaction: a duplicate email leaves both registries untouched and
    /// issues no session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is already
    /// registered, `AuthError::InvalidEmail` for a malformed email, and
    /// `AuthError::EmptySecret` for an empty secret.
    pub async fn sign_up(
        &self,
        email: &str,
        secret: &str,
        business_name: Option<&str>,
    ) -> Result<SignUp, AuthError> {
        let email = Email::parse(email)?;
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let business_name = business_name.unwrap_or(DEFAULT_BUSINESS_NAME);
        let (account, record) = AccountRepository::new(&self.directory)
            .create_retailer(&email, secret, business_name, Enrollment::default())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateEmail,
                other => AuthError::Repository(other),
            })?;

        // Auto-login after registration.
        let session = self.sessions.authenticate(email.as_str(), secret).await?;

        tracing::info!(user_id = %account.id, retailer_id = %record.id, "sign-up");
        Ok(SignUp {
            account,
            record,
            session,
        })
    }

    /// Sign out: revoke the session holding this access token.
    ///
    /// Deterministic and idempotent; an unknown token is a no-op.
    pub async fn sign_out(&self, access_token: &str) {
        self.sessions.revoke(access_token).await;
    }

    /// Validate a held access token as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionExpired` for unknown, revoked, or
    /// expired tokens.
    pub async fn validate(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        Ok(self.sessions.validate(access_token, now).await?)
    }

    /// Whether a session grants the given role.
    ///
    /// The single capability authority - collaborators query this instead
    /// of comparing role strings themselves.
    #[must_use]
    pub fn has_role(session: &Session, role: Role) -> bool {
        session.role == role
    }

    /// The underlying session manager.
    #[must_use]
    pub const fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// The underlying directory handle.
    #[must_use]
    pub const fn directory(&self) -> &Directory {
        &self.directory
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;
    use stockist_core::ApprovalStatus;

    fn facade() -> AuthService {
        let config = IdentityConfig::default();
        let directory = Directory::new(&config).unwrap();
        AuthService::new(directory, &config)
    }

    #[tokio::test]
    async fn test_sign_up_issues_pending_account_and_session() {
        let auth = facade();
        let signup = auth
            .sign_up("new@biz.com", "pw123", Some("New Biz"))
            .await
            .unwrap();

        assert_eq!(signup.account.approval_status, Some(ApprovalStatus::Pending));
        assert_eq!(signup.record.status, ApprovalStatus::Pending);
        assert_eq!(signup.record.name, "New Biz");
        assert_eq!(signup.session.user_id, signup.account.id);
        assert_eq!(signup.session.approval_status, Some(ApprovalStatus::Pending));
    }

    #[tokio::test]
    async fn test_sign_up_defaults_business_name() {
        let auth = facade();
        let signup = auth.sign_up("new@biz.com", "pw123", None).await.unwrap();
        assert_eq!(signup.record.name, DEFAULT_BUSINESS_NAME);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_empty_secret() {
        let auth = facade();
        let err = auth.sign_up("new@biz.com", "", None).await.unwrap_err();
        assert!(matches!(err, AuthError::EmptySecret));
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_duplicate_error() {
        let auth = facade();
        auth.sign_up("new@biz.com", "pw123", None).await.unwrap();
        let err = auth
            .sign_up("new@biz.com", "other", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_has_role_is_the_capability_check() {
        let auth = facade();
        let session = auth
            .sign_in(seed::ADMIN_EMAIL, seed::ADMIN_SECRET)
            .await
            .unwrap();
        assert!(AuthService::has_role(&session, Role::Admin));
        assert!(!AuthService::has_role(&session, Role::Retailer));
    }

    #[tokio::test]
    async fn test_sign_out_then_validate_fails() {
        let auth = facade();
        let session = auth
            .sign_in(seed::ADMIN_EMAIL, seed::ADMIN_SECRET)
            .await
            .unwrap();

        auth.sign_out(&session.access_token).await;
        let err = auth
            .validate(&session.access_token, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }
}
