//! Renew membership command handler.
//!
//! Renewal is race-safe: the expiry check and the window update happen in one
//! conditional repository operation, so two concurrent renewals of the same
//! membership resolve to exactly one winner. The loser sees `StillActive`.

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::MembershipError;
use crate::ports::{CategoryCatalog, MembershipRepository, StudentDirectory};

use super::view::{assemble_view, MembershipView};

/// Command to renew an expired membership.
#[derive(Debug, Clone)]
pub struct RenewMembershipCommand {
    pub membership_id: MembershipId,
}

/// Handler for renewing memberships.
pub struct RenewMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    students: Arc<dyn StudentDirectory>,
    categories: Arc<dyn CategoryCatalog>,
}

impl RenewMembershipHandler {
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

    /// Renew the membership's validity window to `[now, now + duration]`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no membership has the given id
    /// - `StillActive` if the membership has not yet expired, including when
    ///   a concurrent renewal won the race
    /// - `Infrastructure` on storage failure
    pub async fn handle(
        &self,
        command: RenewMembershipCommand,
    ) -> Result<MembershipView, MembershipError> {
        let membership = self
            .repository
            .find_by_id(&command.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(command.membership_id))?;

        let now = Timestamp::now();
        let new_expiry = now.add_months(membership.duration.months());

        let renewed = self
            .repository
            .renew_if_expired(&command.membership_id, now, new_expiry)
            .await?;

        match renewed {
            Some(renewed) => {
                tracing::info!(
                    membership_id = %renewed.id,
                    expiry_date = %renewed.expiry_date,
                    "Membership renewed"
                );
                assemble_view(self.students.as_ref(), self.categories.as_ref(), renewed).await
            }
            // No row matched the conditional update. Either the membership
            // vanished between the two calls or it is (still, or again after
            // a lost race) active.
            None => match self.repository.find_by_id(&command.membership_id).await? {
                Some(_) => Err(MembershipError::still_active(command.membership_id)),
                None => Err(MembershipError::not_found(command.membership_id)),
            },
        }
    }
}
