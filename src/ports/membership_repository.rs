//! Membership repository port (write side).
//!
//! Defines the contract for persisting and retrieving Membership aggregates.
//!
//! # Design
//!
//! - **Per-document atomicity**: no multi-document transactions are assumed
//! - **Conditional renewal**: `renew_if_expired` is a single conditional
//!   update so two concurrent renewals resolve to exactly one winner

use crate::domain::foundation::{CategoryId, DomainError, MembershipId, StudentId, Timestamp};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Repository port for Membership aggregate persistence.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// All memberships held by a student, newest first.
    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Membership>, DomainError>;

    /// The student's most recent membership referencing the given category,
    /// or `None` if they never held one. Used for renewal quotes.
    async fn find_latest_by_student_and_category(
        &self,
        student_id: &StudentId,
        category_id: &CategoryId,
    ) -> Result<Option<Membership>, DomainError>;

    /// List every membership, newest first.
    async fn list_all(&self) -> Result<Vec<Membership>, DomainError>;

    /// Atomically renew the membership's validity window, but only if it has
    /// expired as of `now`.
    ///
    /// Implementations must perform the expiry check and the window update as
    /// one atomic step (`... WHERE expiry_date <= now`). Returns the renewed
    /// membership, or `None` when no row matched: either the id is unknown or
    /// the membership is still active, including the case where a concurrent
    /// renewal won the race. The caller disambiguates with `find_by_id`.
    async fn renew_if_expired(
        &self,
        id: &MembershipId,
        now: Timestamp,
        new_expiry: Timestamp,
    ) -> Result<Option<Membership>, DomainError>;

    /// Hard-delete a membership. No tombstone is kept.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError>;
}
