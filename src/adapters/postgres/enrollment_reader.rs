//! PostgreSQL implementation of EnrollmentReader.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, StudentId, Timestamp};
use crate::ports::{EnrollmentReader, EnrollmentView};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed enrollment reads.
pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    student_id: Uuid,
    course_id: Uuid,
    enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for EnrollmentView {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            student_id: StudentId::from_uuid(row.student_id),
            course_id: CourseId::from_uuid(row.course_id),
            enrolled_at: Timestamp::from_datetime(row.enrolled_at),
        }
    }
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn count_self_paced(&self, student_id: &StudentId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND self_paced = TRUE",
        )
        .bind(student_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count enrollments: {}", e),
            )
        })?;

        Ok(count as u64)
    }

    async fn find_self_paced(
        &self,
        student_id: &StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = course_ids.iter().map(|c| *c.as_uuid()).collect();
        let rows: Vec<EnrollmentRow> = sqlx::query_as(
            "SELECT student_id, course_id, enrolled_at FROM enrollments \
             WHERE student_id = $1 AND self_paced = TRUE AND course_id = ANY($2)",
        )
        .bind(student_id.as_uuid())
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollments: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(EnrollmentView::from).collect())
    }
}
