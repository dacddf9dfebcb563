//! PostgreSQL implementation of CourseCatalog.

use crate::domain::foundation::{CategoryId, CourseId, DomainError, ErrorCode};
use crate::ports::{CourseCatalog, CourseSummary};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed course lookup.
pub struct PostgresCourseCatalog {
    pool: PgPool,
}

impl PostgresCourseCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    name: String,
    category_id: Uuid,
}

impl From<CourseRow> for CourseSummary {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::from_uuid(row.id),
            name: row.name,
            category_id: CategoryId::from_uuid(row.category_id),
        }
    }
}

#[async_trait]
impl CourseCatalog for PostgresCourseCatalog {
    async fn list_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CourseSummary>, DomainError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = category_ids.iter().map(|c| *c.as_uuid()).collect();
        let rows: Vec<CourseRow> =
            sqlx::query_as("SELECT id, name, category_id FROM courses WHERE category_id = ANY($1)")
                .bind(&uuids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to list courses: {}", e),
                    )
                })?;

        Ok(rows.into_iter().map(CourseSummary::from).collect())
    }
}
