//! In-memory implementation of CategoryCatalog.

use crate::domain::foundation::{CategoryId, DomainError};
use crate::ports::{CategoryCatalog, CategorySummary};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory category lookup seeded by tests.
pub struct InMemoryCategoryCatalog {
    categories: Mutex<Vec<CategorySummary>>,
}

impl InMemoryCategoryCatalog {
    pub fn new() -> Self {
        Self {
            categories: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, category: CategorySummary) {
        self.categories.lock().unwrap().push(category);
    }
}

impl Default for InMemoryCategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryCatalog for InMemoryCategoryCatalog {
    async fn get_summaries(
        &self,
        category_ids: &[CategoryId],
    ) -> Result<Vec<CategorySummary>, DomainError> {
        let categories = self.categories.lock().unwrap();
        Ok(category_ids
            .iter()
            .filter_map(|id| categories.iter().find(|c| &c.id == id).cloned())
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CategoryId>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Amount;

    fn category(name: &str) -> CategorySummary {
        CategorySummary {
            id: CategoryId::new(),
            name: name.to_string(),
            fee: Amount::new(50_000).unwrap(),
        }
    }

    #[tokio::test]
    async fn summaries_preserve_requested_order_and_skip_unknown() {
        let catalog = InMemoryCategoryCatalog::new();
        let first = category("NEET");
        let second = category("JEE");
        catalog.insert(first.clone());
        catalog.insert(second.clone());

        let summaries = catalog
            .get_summaries(&[second.id, CategoryId::new(), first.id])
            .await
            .unwrap();
        assert_eq!(summaries, vec![second, first]);
    }

    #[tokio::test]
    async fn find_by_name_resolves_exact_match() {
        let catalog = InMemoryCategoryCatalog::new();
        let neet = category("NEET");
        catalog.insert(neet.clone());

        assert_eq!(catalog.find_by_name("NEET").await.unwrap(), Some(neet.id));
        assert_eq!(catalog.find_by_name("neet").await.unwrap(), None);
    }
}
