//! Enrollment reader port.
//!
//! Enrollments are owned by the enrollment service; the engine reads them to
//! answer how many self-paced courses a student has consumed under
//! membership. Both operations filter on the self-paced flag.

use crate::domain::foundation::{CourseId, DomainError, StudentId, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A self-paced enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentView {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub enrolled_at: Timestamp,
}

/// Read-only access to the self-paced enrollment store.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Count of the student's self-paced enrollments.
    async fn count_self_paced(&self, student_id: &StudentId) -> Result<u64, DomainError>;

    /// The student's self-paced enrollments restricted to the given courses.
    async fn find_self_paced(
        &self,
        student_id: &StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<EnrollmentView>, DomainError>;
}
