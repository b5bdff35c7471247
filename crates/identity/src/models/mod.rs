//! Domain types for the identity subsystem.
//!
//! These types represent validated domain objects separate from the
//! directory's internal row types.

pub mod account;
pub mod retailer;
pub mod session;

pub use account::{Account, BusinessProfile};
pub use retailer::{Enrollment, RetailerFilter, RetailerRecord};
pub use session::Session;
