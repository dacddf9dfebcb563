//! Membership domain module.
//!
//! Handles the membership lifecycle: creation under plan-tier category caps,
//! calendar-month expiry windows, and expired-only renewal.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `plan` - Plan catalog (tier caps and duration month counts)
//! - `errors` - Membership error taxonomy

mod aggregate;
mod errors;
mod plan;

pub use aggregate::{Membership, MembershipPatch, CREATED_STATUS};
pub use errors::MembershipError;
pub use plan::{PlanDuration, PlanTier};
