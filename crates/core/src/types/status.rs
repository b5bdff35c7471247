//! Role, approval-status, and retailer-type enums.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Determines which surface of the marketplace an account may use. Retailer
/// accounts additionally carry an approval status; admin accounts do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A marketplace retailer; subject to the approval lifecycle.
    Retailer,
    /// A marketplace administrator; may drive approval transitions.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retailer => write!(f, "retailer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retailer" => Ok(Self::Retailer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Retailer approval lifecycle status.
///
/// Every retailer account starts `Pending`. Neither `Approved` nor
/// `Rejected` is terminal: an admin may suspend an approved retailer or
/// reactivate a rejected one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting an admin decision.
    #[default]
    Pending,
    /// Cleared to participate in the marketplace.
    Approved,
    /// Barred from the marketplace (suspended or declined).
    Rejected,
}

impl ApprovalStatus {
    /// Apply an admin-triggered action to this status.
    ///
    /// Valid from any current state and idempotent: re-applying an action
    /// whose target is the current state is a no-op, not an error.
    #[must_use]
    pub const fn apply(self, action: ApprovalAction) -> Self {
        action.target()
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid approval status: {s}")),
        }
    }
}

/// An admin-triggered approval transition.
///
/// The only transitions the lifecycle admits; there are no system-triggered
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    /// Approve (or reactivate) the retailer.
    Approve,
    /// Reject (or suspend) the retailer.
    Reject,
}

impl ApprovalAction {
    /// The status this action drives the retailer into.
    #[must_use]
    pub const fn target(self) -> ApprovalStatus {
        match self {
            Self::Approve => ApprovalStatus::Approved,
            Self::Reject => ApprovalStatus::Rejected,
        }
    }
}

/// Retailer business type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetailerType {
    /// Storefront retail business.
    #[default]
    Retail,
    /// Wholesale buyer.
    Wholesale,
    /// Distribution partner.
    Distribution,
}

impl std::fmt::Display for RetailerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retail => write!(f, "retail"),
            Self::Wholesale => write!(f, "wholesale"),
            Self::Distribution => write!(f, "distribution"),
        }
    }
}

impl std::str::FromStr for RetailerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retail" => Ok(Self::Retail),
            "wholesale" => Ok(Self::Wholesale),
            "distribution" => Ok(Self::Distribution),
            _ => Err(format!("invalid retailer type: {s}")),
        }
    }
}
