//! Session service.
//!
//! Mints, validates, and revokes sessions. Tokens are opaque 256-bit random
//! values; a session expires passively when its fixed TTL elapses - there
//! is no eviction sweep, the check happens at use time. Each account holds
//! at most one live session: authenticating again replaces the previous
//! one.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use thiserror::Error;
use tokio::sync::RwLock;

use stockist_core::{Email, UserId};

use crate::directory::{AccountRepository, Directory};
use crate::models::{Account, Session};

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Identifier/secret pair does not match any account. No session is
    /// issued and no state changes.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The presented token is unknown, revoked, or past its TTL.
    #[error("session expired")]
    Expired,
}

/// Session manager.
///
/// Owns the live-session slot for each account (at most one) and performs
/// identifier resolution through the credential registry.
pub struct SessionService {
    directory: Directory,
    ttl: Duration,
    active: RwLock<HashMap<UserId, Session>>,
}

impl SessionService {
    /// Create a new session service with a fixed TTL.
    #[must_use]
    pub fn new(directory: Directory, ttl: Duration) -> Self {
        Self {
            directory,
            ttl,
            active: RwLock::new(HashMap::new()),
        }
    }

    /// Authenticate an identifier/secret pair and mint a session.
    ///
    /// Resolves the identifier through the credential registry (seed
    /// accounts first), compares the secret verbatim, and on match issues a
    /// session carrying the resolved role and approval status. Any prior
    /// session for the same account is replaced.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` if the identifier is
    /// unknown or the secret does not match; no session is issued.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Session, SessionError> {
        // A malformed identifier can't match any account; same outcome.
        let Ok(email) = Email::parse(identifier) else {
            return Err(SessionError::InvalidCredentials);
        };

        let account = AccountRepository::new(&self.directory)
            .find_by_email(&email)
            .await
            .ok_or(SessionError::InvalidCredentials)?;

        if !account.verify_secret(secret) {
            tracing::debug!(identifier, "secret mismatch");
            return Err(SessionError::InvalidCredentials);
        }

        let session = self.issue(&account, Utc::now());
        self.active
            .write()
            .await
            .insert(account.id, session.clone());

        tracing::info!(user_id = %account.id, role = %account.role, "session issued");
        Ok(session)
    }

    /// Validate a held access token as of `now`.
    ///
    /// Expired sessions are dropped on the spot - the passive counterpart
    /// of an eviction sweep.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Expired` for unknown, revoked, or expired
    /// tokens.
    pub async fn validate(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let mut active = self.active.write().await;

        let found = active
            .iter()
            .find(|(_, session)| session.access_token == access_token)
            .map(|(user_id, session)| (*user_id, session.clone()));

        let Some((user_id, session)) = found else {
            return Err(SessionError::Expired);
        };

        if session.is_expired_at(now) {
            active.remove(&user_id);
            return Err(SessionError::Expired);
        }

        Ok(session)
    }

    /// Revoke the session holding this access token.
    ///
    /// Subsequent validation of its tokens fails with
    /// [`SessionError::Expired`]. Revoking an unknown token is a no-op.
    pub async fn revoke(&self, access_token: &str) {
        let mut active = self.active.write().await;
        let before = active.len();
        active.retain(|_, session| session.access_token != access_token);
        if active.len() < before {
            tracing::info!("session revoked");
        }
    }

    /// Whether a session has expired as of `now`.
    #[must_use]
    pub fn is_expired(session: &Session, now: DateTime<Utc>) -> bool {
        session.is_expired_at(now)
    }

    /// The live session for an account, if any.
    pub async fn active_session(&self, user_id: UserId) -> Option<Session> {
        self.active.read().await.get(&user_id).cloned()
    }

    fn issue(&self, account: &Account, now: DateTime<Utc>) -> Session {
        Session {
            access_token: mint_token(),
            refresh_token: mint_token(),
            issued_at: now,
            expires_at: now + self.ttl,
            user_id: account.id,
            role: account.role,
            approval_status: account.approval_status,
        }
    }
}

/// Mint an opaque token: 256 random bits, base64url without padding.
fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
