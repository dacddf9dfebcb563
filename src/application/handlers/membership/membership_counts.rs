//! Per-student membership counts query handler.
//!
//! Active and expired partition by comparing each membership's `expiry_date`
//! to the clock at query time. A membership at exactly its expiry instant
//! counts as expired.

use std::sync::Arc;

use crate::domain::foundation::{StudentId, Timestamp};
use crate::domain::membership::MembershipError;
use crate::ports::{EnrollmentReader, MembershipRepository};

/// Query for a student's membership counts.
#[derive(Debug, Clone)]
pub struct MembershipCountsQuery {
    pub student_id: StudentId,
}

/// Counts returned by [`MembershipCountsHandler::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipCounts {
    pub active: u64,
    pub expired: u64,
    /// Count of the student's self-paced enrollments.
    pub self_paced_enrollments: u64,
}

/// Handler for the per-student counts view.
pub struct MembershipCountsHandler {
    repository: Arc<dyn MembershipRepository>,
    enrollments: Arc<dyn EnrollmentReader>,
}

impl MembershipCountsHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        enrollments: Arc<dyn EnrollmentReader>,
    ) -> Self {
        Self {
            repository,
            enrollments,
        }
    }

    /// A student with no memberships gets all-zero counts.
    pub async fn handle(
        &self,
        query: MembershipCountsQuery,
    ) -> Result<MembershipCounts, MembershipError> {
        let memberships = self.repository.find_by_student(&query.student_id).await?;
        let now = Timestamp::now();

        let expired = memberships.iter().filter(|m| m.is_expired(now)).count() as u64;
        let active = memberships.len() as u64 - expired;

        let self_paced_enrollments = self
            .enrollments
            .count_self_paced(&query.student_id)
            .await?;

        Ok(MembershipCounts {
            active,
            expired,
            self_paced_enrollments,
        })
    }
}
