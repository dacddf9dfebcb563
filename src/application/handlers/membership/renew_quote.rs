//! Renewal quote query handler.
//!
//! Quotes the price of renewing a student's expired membership in a category
//! identified by display name. The name is resolved to a category id at the
//! boundary; everything past that point joins on the id.

use std::sync::Arc;

use crate::domain::foundation::{Amount, MembershipId, StudentId, Timestamp};
use crate::domain::membership::MembershipError;
use crate::ports::{CategoryCatalog, MembershipRepository};

/// Query for a renewal price quote.
#[derive(Debug, Clone)]
pub struct RenewQuoteQuery {
    pub student_id: StudentId,
    pub category_name: String,
}

/// Quote returned by [`RenewQuoteHandler::handle`].
///
/// The amount is what the student paid for the membership being renewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewQuote {
    pub membership_id: MembershipId,
    pub amount: Amount,
}

/// Handler for renewal quotes.
pub struct RenewQuoteHandler {
    repository: Arc<dyn MembershipRepository>,
    categories: Arc<dyn CategoryCatalog>,
}

impl RenewQuoteHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        categories: Arc<dyn CategoryCatalog>,
    ) -> Self {
        Self {
            repository,
            categories,
        }
    }

    /// # Errors
    ///
    /// - `CategoryNotFound` if no category has the given display name
    /// - `NoPriorMembership` if the student never held a membership in it
    /// - `StillActive` if the membership to renew has not yet expired
    /// - `Infrastructure` on storage failure
    pub async fn handle(&self, query: RenewQuoteQuery) -> Result<RenewQuote, MembershipError> {
        let category_id = self
            .categories
            .find_by_name(&query.category_name)
            .await?
            .ok_or_else(|| MembershipError::category_not_found(query.category_name.clone()))?;

        let membership = self
            .repository
            .find_latest_by_student_and_category(&query.student_id, &category_id)
            .await?
            .ok_or_else(|| MembershipError::no_prior_membership(query.student_id, category_id))?;

        if membership.is_active(Timestamp::now()) {
            return Err(MembershipError::still_active(membership.id));
        }

        Ok(RenewQuote {
            membership_id: membership.id,
            amount: membership.amount,
        })
    }
}
