//! Plan catalog: tier and billing-duration definitions.
//!
//! Pure lookup tables, no persistence. Tiers cap how many course categories a
//! membership may reference; durations map billing labels to month counts.

use serde::{Deserialize, Serialize};

/// Membership plan tier.
///
/// Closed enumeration: unrecognized tier labels are rejected at the boundary,
/// never defaulted to a higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Entry tier - a single course category.
    Silver,

    /// Higher tier - up to three course categories.
    Gold,
}

impl PlanTier {
    /// Maximum number of course categories a membership on this tier may
    /// reference.
    pub fn max_courses(&self) -> u32 {
        match self {
            PlanTier::Silver => 1,
            PlanTier::Gold => 3,
        }
    }

    /// Returns the wire label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            PlanTier::Silver => "silver",
            PlanTier::Gold => "gold",
        }
    }

    /// Resolves a wire label to a tier. Unrecognized labels resolve to None.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "silver" => Some(PlanTier::Silver),
            "gold" => Some(PlanTier::Gold),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Billing period label mapped to a calendar month count.
///
/// Closed enumeration: anything outside the four recognized labels is a
/// validation failure, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanDuration {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "quarterly")]
    Quarterly,
    #[serde(rename = "half-yearly")]
    HalfYearly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl PlanDuration {
    /// Number of calendar months in this billing period.
    pub fn months(&self) -> u32 {
        match self {
            PlanDuration::Monthly => 1,
            PlanDuration::Quarterly => 3,
            PlanDuration::HalfYearly => 6,
            PlanDuration::Yearly => 12,
        }
    }

    /// Returns the wire label for this duration.
    pub fn label(&self) -> &'static str {
        match self {
            PlanDuration::Monthly => "monthly",
            PlanDuration::Quarterly => "quarterly",
            PlanDuration::HalfYearly => "half-yearly",
            PlanDuration::Yearly => "yearly",
        }
    }

    /// Resolves a wire label to a duration. Unrecognized labels resolve to
    /// None and must be treated as a validation failure by the caller.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "monthly" => Some(PlanDuration::Monthly),
            "quarterly" => Some(PlanDuration::Quarterly),
            "half-yearly" => Some(PlanDuration::HalfYearly),
            "yearly" => Some(PlanDuration::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
