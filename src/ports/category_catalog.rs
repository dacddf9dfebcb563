//! Category catalog port.
//!
//! Categories are owned by the course-catalog service. The engine resolves
//! category ids to display summaries and, for renewal quotes, display names
//! back to ids. All joins past this lookup carry the id, never the name.

use crate::domain::foundation::{Amount, CategoryId, DomainError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Display summary of a course category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub fee: Amount,
}

/// Read-only lookup of category display data.
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// Display summaries for the given category ids, in the order requested.
    /// Unknown ids are skipped.
    async fn get_summaries(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CategorySummary>, DomainError>;

    /// Resolve a category display name to its id, or `None` if absent.
    async fn find_by_name(&self, name: &str) -> Result<Option<CategoryId>, DomainError>;
}
