//! PostgreSQL implementation of CategoryCatalog.

use crate::domain::foundation::{Amount, CategoryId, DomainError, ErrorCode};
use crate::ports::{CategoryCatalog, CategorySummary};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed category lookup.
pub struct PostgresCategoryCatalog {
    pool: PgPool,
}

impl PostgresCategoryCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    fee: i64,
}

impl TryFrom<CategoryRow> for CategorySummary {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let fee = Amount::new(row.fee).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid category fee: {}", e),
            )
        })?;
        Ok(Self {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            fee,
        })
    }
}

#[async_trait]
impl CategoryCatalog for PostgresCategoryCatalog {
    async fn get_summaries(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CategorySummary>, DomainError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = category_ids.iter().map(|c| *c.as_uuid()).collect();
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, fee FROM categories WHERE id = ANY($1)")
                .bind(&uuids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find categories: {}", e),
                    )
                })?;

        let summaries: Vec<CategorySummary> = rows
            .into_iter()
            .map(CategorySummary::try_from)
            .collect::<Result<_, _>>()?;

        // ANY($1) does not preserve input order; reorder to match the request.
        Ok(category_ids
            .iter()
            .filter_map(|id| summaries.iter().find(|s| &s.id == id).cloned())
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CategoryId>, DomainError> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to find category: {}", e),
                )
            })?;

        Ok(id.map(CategoryId::from_uuid))
    }
}
