//! List all memberships query handler.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{CategoryCatalog, MembershipRepository, StudentDirectory};

use super::view::{assemble_views, MembershipView};

/// Handler for listing every membership, newest first.
pub struct ListMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
}

impl ListMembershipsHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        students: Arc<dyn StudentDirectory>,
        categories: Arc<dyn CategoryCatalog>,
    ) -> Self {
        Self {
            repository,
            students,
            categories,
        }
    }

    /// An empty store yields an empty list, not an error.
    pub async fn handle(&self) -> Result<Vec<MembershipView>, MembershipError> {
        let memberships = self.repository.list_all().await?;
        assemble_views(
            self.students.as_ref(),
            self.categories.as_ref(),
            memberships,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCategoryCatalog, InMemoryMembershipRepository, InMemoryStudentDirectory,
    };
    use crate::domain::foundation::{Amount, CategoryId, MembershipId, StudentId, Timestamp};
    use crate::domain::membership::{Membership, PlanDuration, PlanTier};

    fn handler(repository: Arc<InMemoryMembershipRepository>) -> ListMembershipsHandler {
        ListMembershipsHandler::new(
            repository,
            Arc::new(InMemoryStudentDirectory::new()),
            Arc::new(InMemoryCategoryCatalog::new()),
        )
    }

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let h = handler(Arc::new(InMemoryMembershipRepository::new()));
        assert!(h.handle().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_all_memberships() {
        let repository = Arc::new(InMemoryMembershipRepository::new());
        for _ in 0..3 {
            let m = Membership::create(
                MembershipId::new(),
                StudentId::new(),
                vec![CategoryId::new()],
                Amount::new(10_000).unwrap(),
                PlanTier::Silver,
                PlanDuration::Monthly,
                Timestamp::now(),
            )
            .unwrap();
            repository.save(&m).await.unwrap();
        }

        let h = handler(repository);
        assert_eq!(h.handle().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_infrastructure() {
        let h = handler(Arc::new(InMemoryMembershipRepository::failing()));
        let err = h.handle().await.unwrap_err();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
    }
}
