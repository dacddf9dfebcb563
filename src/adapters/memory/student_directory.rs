//! In-memory implementation of StudentDirectory.

use crate::domain::foundation::{DomainError, StudentId};
use crate::ports::{StudentDirectory, StudentSummary};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory student lookup seeded by tests.
pub struct InMemoryStudentDirectory {
    students: Mutex<Vec<StudentSummary>>,
}

impl InMemoryStudentDirectory {
    pub fn new() -> Self {
        Self {
            students: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, student: StudentSummary) {
        self.students.lock().unwrap().push(student);
    }
}

impl Default for InMemoryStudentDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn get_summary(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<StudentSummary>, DomainError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == student_id)
            .cloned())
    }
}
