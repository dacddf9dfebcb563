//! Course catalog port.

use crate::domain::foundation::{CategoryId, CourseId, DomainError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Display summary of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub category_id: CategoryId,
}

/// Read-only lookup of courses by category.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// All courses belonging to any of the given categories.
    async fn list_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CourseSummary>, DomainError>;
}
