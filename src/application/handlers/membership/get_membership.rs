//! Get membership by id query handler.

use std::sync::Arc;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::MembershipError;
use crate::ports::{CategoryCatalog, MembershipRepository, StudentDirectory};

use super::view::{assemble_view, MembershipView};

/// Query for a single membership.
#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub membership_id: MembershipId,
}

/// Handler for fetching a membership by id.
pub struct GetMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
}

impl GetMembershipHandler {
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

    /// # Errors
    ///
    /// - `NotFound` if no membership has the given id
    /// - `Infrastructure` on storage failure
    pub async fn handle(&self, query: GetMembershipQuery) -> Result<MembershipView, MembershipError> {
        let membership = self
            .repository
            .find_by_id(&query.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(query.membership_id))?;

        assemble_view(self.students.as_ref(), self.categories.as_ref(), membership).await
    }
}
