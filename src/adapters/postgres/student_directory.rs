//! PostgreSQL implementation of StudentDirectory.

use crate::domain::foundation::{DomainError, ErrorCode, StudentId};
use crate::ports::{StudentDirectory, StudentSummary};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed student lookup.
pub struct PostgresStudentDirectory {
    pool: PgPool,
}

impl PostgresStudentDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
}

impl From<StudentRow> for StudentSummary {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
        }
    }
}

#[async_trait]
impl StudentDirectory for PostgresStudentDirectory {
    async fn get_summary(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<StudentSummary>, DomainError> {
        let row: Option<StudentRow> =
            sqlx::query_as("SELECT id, name, email, phone FROM students WHERE id = $1")
                .bind(student_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find student: {}", e),
                    )
                })?;

        Ok(row.map(StudentSummary::from))
    }
}
