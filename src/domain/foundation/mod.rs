//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the CourseHub membership domain.

mod amount;
mod errors;
mod ids;
mod timestamp;

pub use amount::Amount;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CategoryId, CourseId, MembershipId, StudentId};
pub use timestamp::Timestamp;
