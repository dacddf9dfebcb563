//! Get a student's memberships query handler.
//!
//! Besides the membership list, the response carries the student's
//! self-paced enrollments in courses covered by those memberships. The join
//! runs on ids: membership categories -> courses in those categories ->
//! enrollments in those courses.

use std::sync::Arc;

use crate::domain::foundation::{CategoryId, StudentId};
use crate::domain::membership::MembershipError;
use crate::ports::{
    CategoryCatalog, CourseCatalog, EnrollmentReader, EnrollmentView, MembershipRepository,
    StudentDirectory,
};

use super::view::{assemble_views, MembershipView};

/// Query for a student's memberships and covered self-paced enrollments.
#[derive(Debug, Clone)]
pub struct GetStudentMembershipsQuery {
    pub student_id: StudentId,
}

/// Result of [`GetStudentMembershipsHandler::handle`].
#[derive(Debug, Clone)]
pub struct StudentMemberships {
    pub memberships: Vec<MembershipView>,
    /// Self-paced enrollments in courses covered by the memberships above.
    pub enrollments: Vec<EnrollmentView>,
}

/// Handler for the per-student membership view.
pub struct GetStudentMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
    courses: Arc<dyn CourseCatalog>,
    enrollments: Arc<dyn EnrollmentReader>,
}

impl GetStudentMembershipsHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        students: Arc<dyn StudentDirectory>,
        categories: Arc<dyn CategoryCatalog>,
        courses: Arc<dyn CourseCatalog>,
        enrollments: Arc<dyn EnrollmentReader>,
    ) -> Self {
        Self {
            repository,
            students,
            categories,
            courses,
            enrollments,
        }
    }

    /// A student with no memberships gets empty lists, not an error.
    pub async fn handle(
        &self,
        query: GetStudentMembershipsQuery,
    ) -> Result<StudentMemberships, MembershipError> {
        let memberships = self.repository.find_by_student(&query.student_id).await?;

        let mut category_ids: Vec<CategoryId> = Vec::new();
        for membership in &memberships {
            for id in &membership.category_ids {
                if !category_ids.contains(id) {
                    category_ids.push(*id);
                }
            }
        }

        let enrollments = if category_ids.is_empty() {
            Vec::new()
        } else {
            let courses = self.courses.list_by_categories(&category_ids).await?;
            let course_ids: Vec<_> = courses.iter().map(|c| c.id).collect();
            self.enrollments
                .find_self_paced(&query.student_id, &course_ids)
                .await?
        };

        let memberships = assemble_views(
            self.students.as_ref(),
            self.categories.as_ref(),
            memberships,
        )
        .await?;

        Ok(StudentMemberships {
            memberships,
            enrollments,
        })
    }
}
