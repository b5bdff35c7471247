//! Deterministic seed accounts.
//!
//! Two accounts exist in every directory regardless of registry contents:
//! an admin and a pre-approved retailer. Their identifiers and secrets are
//! fixed so admin tooling and tests resolve them deterministically; both
//! can be overridden through [`crate::IdentityConfig`].

use stockist_core::{ApprovalStatus, RetailerType, Role};

use crate::config::IdentityConfig;
use crate::directory::{RepositoryError, Tables};
use crate::models::Enrollment;

/// Seed admin login identifier.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Seed admin secret.
pub const ADMIN_SECRET: &str = "admin123";
/// Seed retailer login identifier.
pub const RETAILER_EMAIL: &str = "retailer@example.com";
/// Seed retailer secret.
pub const RETAILER_SECRET: &str = "retailer123";
/// Seed retailer business name.
pub const RETAILER_NAME: &str = "Evergreen Goods";

/// Insert the seed accounts into freshly initialized tables.
///
/// The seed retailer is pre-approved and enrolled in the registry, so
/// admin listings are never empty and the mirror invariant holds for seeds
/// exactly as it does for registrations.
pub(crate) fn apply(
    tables: &mut Tables,
    config: &IdentityConfig,
) -> Result<(), RepositoryError> {
    tables.accounts.insert_seed(
        config.seed_admin_email.clone(),
        config.seed_admin_secret.clone(),
        Role::Admin,
        "Marketplace Operations",
        None,
    )?;

    let retailer = tables.accounts.insert_seed(
        config.seed_retailer_email.clone(),
        config.seed_retailer_secret.clone(),
        Role::Retailer,
        &config.seed_retailer_name,
        Some(ApprovalStatus::Approved),
    )?;

    let now = retailer.profile.created_at;
    tables.retailers.enroll(
        &retailer,
        Enrollment {
            phone: "(555) 012-3456".to_owned(),
            address: "12 Harbor St, Portland, OR".to_owned(),
            retailer_type: RetailerType::Retail,
        },
        now,
    )?;

    Ok(())
}
