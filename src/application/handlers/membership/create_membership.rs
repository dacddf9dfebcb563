//! Create membership command handler.

use std::sync::Arc;

use crate::domain::foundation::{Amount, CategoryId, MembershipId, StudentId, Timestamp};
use crate::domain::membership::{Membership, MembershipError, PlanDuration, PlanTier};
use crate::ports::{CategoryCatalog, MembershipRepository, StudentDirectory};

use super::view::{assemble_view, MembershipView};

/// Command to create a new membership.
///
/// Plan and duration arrive as wire labels so that an unrecognized label
/// surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Clone)]
pub struct CreateMembershipCommand {
    pub student_id: StudentId,
    pub category_ids: Vec<CategoryId>,
    pub amount_cents: i64,
    pub plan_type: String,
    pub duration: String,
}

/// Handler for creating memberships.
pub struct CreateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
}

impl CreateMembershipHandler {
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

    /// Create a membership starting now.
    ///
    /// # Errors
    ///
    /// - `InvalidPlanTier` / `InvalidDuration` for unrecognized labels
    /// - `ValidationFailed` for a non-positive amount or duplicate categories
    /// - `CategoryLimitExceeded` when the tier cap is exceeded
    /// - `Infrastructure` on storage failure
    pub async fn handle(
        &self,
        command: CreateMembershipCommand,
    ) -> Result<MembershipView, MembershipError> {
        let plan = PlanTier::from_label(&command.plan_type)
            .ok_or_else(|| MembershipError::invalid_plan_tier(command.plan_type.clone()))?;
        let duration = PlanDuration::from_label(&command.duration)
            .ok_or_else(|| MembershipError::invalid_duration(command.duration.clone()))?;
        let amount = Amount::new(command.amount_cents)
            .map_err(|e| MembershipError::validation("amount", e.to_string()))?;

        let membership = Membership::create(
            MembershipId::new(),
            command.student_id,
            command.category_ids,
            amount,
            plan,
            duration,
            Timestamp::now(),
        )?;

        self.repository.save(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            student_id = %membership.student_id,
            plan = %membership.plan,
            "Membership created"
        );

        assemble_view(self.students.as_ref(), self.categories.as_ref(), membership).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCategoryCatalog, InMemoryMembershipRepository, InMemoryStudentDirectory,
    };

    fn handler_with(repository: InMemoryMembershipRepository) -> CreateMembershipHandler {
        CreateMembershipHandler::new(
            Arc::new(repository),
            Arc::new(InMemoryStudentDirectory::new()),
            Arc::new(InMemoryCategoryCatalog::new()),
        )
    }

    fn command(plan_type: &str, duration: &str, n_categories: usize) -> CreateMembershipCommand {
        CreateMembershipCommand {
            student_id: StudentId::new(),
            category_ids: (0..n_categories).map(|_| CategoryId::new()).collect(),
            amount_cents: 49_900,
            plan_type: plan_type.to_string(),
            duration: duration.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_silver_membership_with_one_category() {
        let handler = handler_with(InMemoryMembershipRepository::new());
        let view = handler.handle(command("silver", "monthly", 1)).await.unwrap();

        assert_eq!(view.membership.plan, PlanTier::Silver);
        assert_eq!(view.membership.max_courses, 1);
        assert_eq!(view.membership.category_ids.len(), 1);
    }

    #[tokio::test]
    async fn persists_the_created_membership() {
        let repository = Arc::new(InMemoryMembershipRepository::new());
        let handler = CreateMembershipHandler::new(
            repository.clone(),
            Arc::new(InMemoryStudentDirectory::new()),
            Arc::new(InMemoryCategoryCatalog::new()),
        );

        let view = handler.handle(command("gold", "yearly", 3)).await.unwrap();
        let stored = repository
            .find_by_id(&view.membership.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, view.membership);
    }

    #[tokio::test]
    async fn rejects_unknown_plan_tier() {
        let handler = handler_with(InMemoryMembershipRepository::new());
        let err = handler
            .handle(command("platinum", "monthly", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::InvalidPlanTier(ref l) if l == "platinum"));
    }

    #[tokio::test]
    async fn rejects_unknown_duration() {
        let handler = handler_with(InMemoryMembershipRepository::new());
        let err = handler
            .handle(command("silver", "weekly", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::InvalidDuration(ref l) if l == "weekly"));
    }

    #[tokio::test]
    async fn rejects_category_count_over_tier_cap() {
        let handler = handler_with(InMemoryMembershipRepository::new());
        let err = handler
            .handle(command("silver", "monthly", 2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MembershipError::CategoryLimitExceeded {
                limit: 1,
                requested: 2
            }
        ));
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let handler = handler_with(InMemoryMembershipRepository::new());
        let mut cmd = command("silver", "monthly", 1);
        cmd.amount_cents = 0;
        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_infrastructure() {
        let handler = handler_with(InMemoryMembershipRepository::failing());
        let err = handler
            .handle(command("silver", "monthly", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
    }
}
