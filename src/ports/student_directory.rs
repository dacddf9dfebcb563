//! Student directory port.
//!
//! Students are owned by the accounts service; the engine only needs
//! display summaries for read-side joins.

use crate::domain::foundation::{DomainError, StudentId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Display summary of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Read-only lookup of student display data.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Display summary for a student, or `None` if unknown.
    async fn get_summary(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<StudentSummary>, DomainError>;
}
