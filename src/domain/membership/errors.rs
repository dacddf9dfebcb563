//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NoPriorMembership | 404 |
//! | CategoryNotFound | 404 |
//! | CategoryLimitExceeded | 400 |
//! | InvalidPlanTier | 400 |
//! | InvalidDuration | 400 |
//! | StillActive | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, MembershipId, StudentId};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No category with the given display name exists.
    CategoryNotFound(String),

    /// Renewal quote requested for a category the student has never held a
    /// membership in.
    NoPriorMembership {
        student_id: StudentId,
        category_id: CategoryId,
    },

    /// More categories requested than the plan tier allows.
    CategoryLimitExceeded { limit: u32, requested: usize },

    /// Unrecognized plan tier label.
    InvalidPlanTier(String),

    /// Unrecognized billing duration label.
    InvalidDuration(String),

    /// Renewal attempted on a membership that has not yet expired.
    StillActive(MembershipId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn category_not_found(name: impl Into<String>) -> Self {
        MembershipError::CategoryNotFound(name.into())
    }

    pub fn no_prior_membership(student_id: StudentId, category_id: CategoryId) -> Self {
        MembershipError::NoPriorMembership {
            student_id,
            category_id,
        }
    }

    pub fn category_limit_exceeded(limit: u32, requested: usize) -> Self {
        MembershipError::CategoryLimitExceeded { limit, requested }
    }

    pub fn invalid_plan_tier(label: impl Into<String>) -> Self {
        MembershipError::InvalidPlanTier(label.into())
    }

    pub fn invalid_duration(label: impl Into<String>) -> Self {
        MembershipError::InvalidDuration(label.into())
    }

    pub fn still_active(id: MembershipId) -> Self {
        MembershipError::StillActive(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) | MembershipError::NoPriorMembership { .. } => {
                ErrorCode::MembershipNotFound
            }
            MembershipError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            MembershipError::CategoryLimitExceeded { .. } => ErrorCode::CategoryLimitExceeded,
            MembershipError::InvalidPlanTier(_) => ErrorCode::ValidationFailed,
            MembershipError::InvalidDuration(_) => ErrorCode::InvalidDuration,
            MembershipError::StillActive(_) => ErrorCode::MembershipStillActive,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::CategoryNotFound(name) => {
                format!("Category not found: {}", name)
            }
            MembershipError::NoPriorMembership {
                student_id,
                category_id,
            } => format!(
                "No membership found for student {} in category {}",
                student_id, category_id
            ),
            MembershipError::CategoryLimitExceeded { limit, requested } => format!(
                "Category limit exceeded: plan allows {}, got {}",
                limit, requested
            ),
            MembershipError::InvalidPlanTier(label) => {
                format!("Invalid plan type: {}", label)
            }
            MembershipError::InvalidDuration(label) => {
                format!("Invalid duration: {}", label)
            }
            MembershipError::StillActive(id) => {
                format!("Membership {} is still active", id)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_membership_id() -> MembershipId {
        MembershipId::new()
    }

    #[test]
    fn not_found_creates_correctly() {
        let id = test_membership_id();
        let err = MembershipError::not_found(id);
        assert!(matches!(err, MembershipError::NotFound(i) if i == id));
        assert_eq!(err.code(), ErrorCode::MembershipNotFound);
    }

    #[test]
    fn category_limit_exceeded_creates_correctly() {
        let err = MembershipError::category_limit_exceeded(1, 3);
        assert_eq!(err.code(), ErrorCode::CategoryLimitExceeded);
        let msg = err.message();
        assert!(msg.contains("allows 1"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn invalid_duration_message_includes_label() {
        let err = MembershipError::invalid_duration("weekly");
        assert_eq!(err.code(), ErrorCode::InvalidDuration);
        assert!(err.message().contains("weekly"));
    }

    #[test]
    fn still_active_message_includes_id() {
        let id = test_membership_id();
        let err = MembershipError::still_active(id);
        assert_eq!(err.code(), ErrorCode::MembershipStillActive);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn no_prior_membership_maps_to_not_found_code() {
        let err = MembershipError::no_prior_membership(StudentId::new(), CategoryId::new());
        assert_eq!(err.code(), ErrorCode::MembershipNotFound);
    }

    #[test]
    fn display_matches_message() {
        let err = MembershipError::invalid_plan_tier("platinum");
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_domain_error() {
        let err = MembershipError::not_found(test_membership_id());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn converts_from_domain_error() {
        let domain_err = DomainError::validation("amount", "must be positive");
        let membership_err: MembershipError = domain_err.into();
        assert!(matches!(
            membership_err,
            MembershipError::ValidationFailed { ref field, .. } if field == "amount"
        ));
    }

    #[test]
    fn unexpected_domain_error_becomes_infrastructure() {
        let domain_err = DomainError::new(ErrorCode::DatabaseError, "connection lost");
        let membership_err: MembershipError = domain_err.into();
        assert!(matches!(membership_err, MembershipError::Infrastructure(_)));
    }
}
