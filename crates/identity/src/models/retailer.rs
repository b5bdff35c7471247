//! Retailer registry domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockist_core::{ApprovalStatus, Email, Price, RetailerId, RetailerType};

/// The operational, query-optimized view of a retailer used by
/// admin-facing listings.
///
/// `status` is projected from the owning account's approval status at read
/// time - the registry itself stores no status, so the two views cannot
/// diverge.
#[derive(Debug, Clone, Serialize)]
pub struct RetailerRecord {
    /// Registry-assigned ID (`RET-NNN`), distinct from the account ID.
    pub id: RetailerId,
    /// Business name.
    pub name: String,
    /// Join key to the owning account.
    pub email: Email,
    /// Contact phone number.
    pub phone: String,
    /// Business address.
    pub address: String,
    /// Business type.
    pub retailer_type: RetailerType,
    /// Approval status, projected from the owning account.
    pub status: ApprovalStatus,
    /// When the retailer registered.
    pub registration_date: DateTime<Utc>,
    /// When the retailer last placed an order, if ever.
    pub last_order_date: Option<DateTime<Utc>>,
    /// Lifetime order count.
    pub total_orders: u32,
    /// Lifetime spend.
    pub total_spent: Price,
}

/// Operational details captured at enrollment.
///
/// Self-service registration only collects a business name, so these
/// default to empty; seed and back-office enrollments fill them in.
#[derive(Debug, Clone, Default)]
pub struct Enrollment {
    /// Contact phone number.
    pub phone: String,
    /// Business address.
    pub address: String,
    /// Business type.
    pub retailer_type: RetailerType,
}

/// Filter for retailer listings.
///
/// Provided criteria are combined as a conjunction; an empty filter matches
/// every record.
#[derive(Debug, Clone, Default)]
pub struct RetailerFilter {
    /// Match only records with this approval status.
    pub status: Option<ApprovalStatus>,
    /// Match only records with this business type.
    pub retailer_type: Option<RetailerType>,
    /// Case-insensitive substring match against name, email, or ID.
    pub search_text: Option<String>,
}

impl RetailerFilter {
    /// Whether a record satisfies every provided criterion.
    #[must_use]
    pub fn matches(&self, record: &RetailerRecord) -> bool {
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }

        if let Some(retailer_type) = self.retailer_type
            && record.retailer_type != retailer_type
        {
            return false;
        }

        if let Some(query) = &self.search_text {
            let query = query.to_lowercase();
            let hit = record.name.to_lowercase().contains(&query)
                || record.email.as_str().to_lowercase().contains(&query)
                || record.id.as_str().to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> RetailerRecord {
        RetailerRecord {
            id: RetailerId::from("RET-007"),
            name: "Harbor Lights Trading".to_owned(),
            email: Email::parse("owner@harborlights.com").unwrap(),
            phone: "(555) 012-3456".to_owned(),
            address: "12 Harbor St, Portland, OR".to_owned(),
            retailer_type: RetailerType::Wholesale,
            status: ApprovalStatus::Approved,
            registration_date: Utc::now(),
            last_order_date: None,
            total_orders: 0,
            total_spent: Price::default(),
        }
    }

    #[test]
    fn test_empty_filter_matches() {
        assert!(RetailerFilter::default().matches(&record()));
    }

    #[test]
    fn test_status_filter() {
        let filter = RetailerFilter {
            status: Some(ApprovalStatus::Pending),
            ..Default::default()
        };
        assert!(!filter.matches(&record()));
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let filter = RetailerFilter {
            search_text: Some("harbor lights".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&record()));
    }

    #[test]
    fn test_search_matches_id_substring() {
        let filter = RetailerFilter {
            search_text: Some("ret-007".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&record()));
    }

    #[test]
    fn test_criteria_are_a_conjunction() {
        let filter = RetailerFilter {
            status: Some(ApprovalStatus::Approved),
            retailer_type: Some(RetailerType::Retail),
            ..Default::default()
        };
        // Status matches but type does not.
        assert!(!filter.matches(&record()));
    }
}
