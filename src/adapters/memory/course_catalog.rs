//! In-memory implementation of CourseCatalog.

use crate::domain::foundation::{CategoryId, DomainError};
use crate::ports::{CourseCatalog, CourseSummary};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory course lookup seeded by tests.
pub struct InMemoryCourseCatalog {
    courses: Mutex<Vec<CourseSummary>>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self {
            courses: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, course: CourseSummary) {
        self.courses.lock().unwrap().push(course);
    }
}

impl Default for InMemoryCourseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn list_by_categories(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CourseSummary>, DomainError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| category_ids.contains(&c.category_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CourseId;

    #[tokio::test]
    async fn lists_only_courses_in_requested_categories() {
        let catalog = InMemoryCourseCatalog::new();
        let physics = CategoryId::new();
        let biology = CategoryId::new();
        catalog.insert(CourseSummary {
            id: CourseId::new(),
            name: "Mechanics".to_string(),
            category_id: physics,
        });
        catalog.insert(CourseSummary {
            id: CourseId::new(),
            name: "Genetics".to_string(),
            category_id: biology,
        });

        let courses = catalog.list_by_categories(&[physics]).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Mechanics");
    }
}
