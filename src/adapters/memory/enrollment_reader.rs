//! In-memory implementation of EnrollmentReader.

use crate::domain::foundation::{CourseId, DomainError, StudentId};
use crate::ports::{EnrollmentReader, EnrollmentView};
use async_trait::async_trait;
use std::sync::Mutex;

struct EnrollmentRecord {
    view: EnrollmentView,
    self_paced: bool,
}

/// In-memory enrollment store seeded by tests.
pub struct InMemoryEnrollmentReader {
    enrollments: Mutex<Vec<EnrollmentRecord>>,
}

impl InMemoryEnrollmentReader {
    pub fn new() -> Self {
        Self {
            enrollments: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, view: EnrollmentView, self_paced: bool) {
        self.enrollments
            .lock()
            .unwrap()
            .push(EnrollmentRecord { view, self_paced });
    }
}

impl Default for InMemoryEnrollmentReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryEnrollmentReader {
    async fn count_self_paced(&self, student_id: &StudentId) -> Result<u64, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.self_paced && &e.view.student_id == student_id)
            .count() as u64)
    }

    async fn find_self_paced(
        &self,
        student_id: &StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.self_paced
                    && &e.view.student_id == student_id
                    && course_ids.contains(&e.view.course_id)
            })
            .map(|e| e.view.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn enrollment(student_id: StudentId, course_id: CourseId) -> EnrollmentView {
        EnrollmentView {
            student_id,
            course_id,
            enrolled_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn counts_only_self_paced_enrollments() {
        let reader = InMemoryEnrollmentReader::new();
        let student = StudentId::new();
        reader.insert(enrollment(student, CourseId::new()), true);
        reader.insert(enrollment(student, CourseId::new()), false);
        reader.insert(enrollment(StudentId::new(), CourseId::new()), true);

        assert_eq!(reader.count_self_paced(&student).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_self_paced_filters_by_course() {
        let reader = InMemoryEnrollmentReader::new();
        let student = StudentId::new();
        let in_scope = CourseId::new();
        let out_of_scope = CourseId::new();
        reader.insert(enrollment(student, in_scope), true);
        reader.insert(enrollment(student, out_of_scope), true);

        let found = reader.find_self_paced(&student, &[in_scope]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].course_id, in_scope);
    }
}
