//! Delete membership command handler.

use std::sync::Arc;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

/// Command to hard-delete a membership.
#[derive(Debug, Clone)]
pub struct DeleteMembershipCommand {
    pub membership_id: MembershipId,
}

/// Handler for deleting memberships. The delete is hard; no tombstone is
/// kept and the id is gone afterwards.
pub struct DeleteMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl DeleteMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `NotFound` if no membership has the given id
    /// - `Infrastructure` on storage failure
    pub async fn handle(&self, command: DeleteMembershipCommand) -> Result<(), MembershipError> {
        self.repository
            .find_by_id(&command.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(command.membership_id))?;

        self.repository.delete(&command.membership_id).await?;

        tracing::info!(membership_id = %command.membership_id, "Membership deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMembershipRepository;
    use crate::domain::foundation::{Amount, CategoryId, StudentId, Timestamp};
    use crate::domain::membership::{Membership, PlanDuration, PlanTier};

    fn membership() -> Membership {
        Membership::create(
            MembershipId::new(),
            StudentId::new(),
            vec![CategoryId::new()],
            Amount::new(10_000).unwrap(),
            PlanTier::Silver,
            PlanDuration::Monthly,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn deletes_existing_membership() {
        let m = membership();
        let repository = Arc::new(InMemoryMembershipRepository::with_membership(m.clone()));
        let handler = DeleteMembershipHandler::new(repository.clone());

        handler
            .handle(DeleteMembershipCommand { membership_id: m.id })
            .await
            .unwrap();
        assert!(repository.find_by_id(&m.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let handler = DeleteMembershipHandler::new(Arc::new(InMemoryMembershipRepository::new()));
        let err = handler
            .handle(DeleteMembershipCommand {
                membership_id: MembershipId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleted_id_stays_gone() {
        let m = membership();
        let handler = DeleteMembershipHandler::new(Arc::new(
            InMemoryMembershipRepository::with_membership(m.clone()),
        ));

        handler
            .handle(DeleteMembershipCommand { membership_id: m.id })
            .await
            .unwrap();
        let err = handler
            .handle(DeleteMembershipCommand { membership_id: m.id })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::NotFound(_)));
    }
}
