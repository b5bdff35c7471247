//! Shared helpers for Stockist integration tests.
//!
//! The identity subsystem is a library, so the tests exercise it directly -
//! there is no server to stand up. Each test builds an isolated, seeded
//! directory via [`harness`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use stockist_identity::{ApprovalService, AuthService, Directory, IdentityConfig};

/// A fully wired subsystem over one fresh, seeded directory.
pub struct Harness {
    /// The shared store handle.
    pub directory: Directory,
    /// The facade the UI collaborator calls.
    pub auth: AuthService,
    /// The admin-facing approval driver.
    pub approvals: ApprovalService,
}

/// Build an isolated subsystem instance with default configuration.
///
/// # Panics
///
/// Panics if the default seed accounts fail to apply, which would mean the
/// built-in seed data itself is broken.
#[must_use]
pub fn harness() -> Harness {
    init_tracing();

    let config = IdentityConfig::default();
    #[allow(clippy::unwrap_used)]
    let directory = Directory::new(&config).unwrap();

    Harness {
        auth: AuthService::new(directory.clone(), &config),
        approvals: ApprovalService::new(directory.clone()),
        directory,
    }
}

/// Install a test subscriber once; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
