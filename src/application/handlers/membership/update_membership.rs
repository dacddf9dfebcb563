//! Update membership command handler.
//!
//! Only categories, amount, plan, and duration are patchable. The validity
//! window belongs to renewal; patching the duration takes effect at the next
//! renewal without moving the current window.

use std::sync::Arc;

use crate::domain::foundation::{Amount, CategoryId, MembershipId, Timestamp};
use crate::domain::membership::{MembershipError, MembershipPatch, PlanDuration, PlanTier};
use crate::ports::{CategoryCatalog, MembershipRepository, StudentDirectory};

use super::view::{assemble_view, MembershipView};

/// Command to patch an existing membership.
///
/// All fields are optional; absent fields are left untouched. Labels and the
/// amount arrive raw so invalid input maps to validation errors.
#[derive(Debug, Clone, Default)]
pub struct UpdateMembershipCommand {
    pub membership_id: MembershipId,
    pub category_ids: Option<Vec<CategoryId>>,
    pub amount_cents: Option<i64>,
    pub plan_type: Option<String>,
    pub duration: Option<String>,
}

/// Handler for updating memberships.
pub struct UpdateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
}

impl UpdateMembershipHandler {
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

    /// Apply a constrained patch with full invariant re-validation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no membership has the given id
    /// - `InvalidPlanTier` / `InvalidDuration` for unrecognized labels
    /// - `ValidationFailed` / `CategoryLimitExceeded` if the patched state
    ///   would violate an invariant
    /// - `Infrastructure` on storage failure
    pub async fn handle(
        &self,
        command: UpdateMembershipCommand,
    ) -> Result<MembershipView, MembershipError> {
        let plan = match &command.plan_type {
            Some(label) => Some(
                PlanTier::from_label(label)
                    .ok_or_else(|| MembershipError::invalid_plan_tier(label.clone()))?,
            ),
            None => None,
        };
        let duration = match &command.duration {
            Some(label) => Some(
                PlanDuration::from_label(label)
                    .ok_or_else(|| MembershipError::invalid_duration(label.clone()))?,
            ),
            None => None,
        };
        let amount = match command.amount_cents {
            Some(cents) => Some(
                Amount::new(cents)
                    .map_err(|e| MembershipError::validation("amount", e.to_string()))?,
            ),
            None => None,
        };

        let mut membership = self
            .repository
            .find_by_id(&command.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(command.membership_id))?;

        let patch = MembershipPatch {
            category_ids: command.category_ids,
            amount,
            plan,
            duration,
        };
        membership.apply_patch(patch, Timestamp::now())?;

        self.repository.update(&membership).await?;

        tracing::info!(membership_id = %membership.id, "Membership updated");

        assemble_view(self.students.as_ref(), self.categories.as_ref(), membership).await
    }
}
