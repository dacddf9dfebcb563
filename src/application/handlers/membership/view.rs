//! Read-side view of a membership joined with display data.
//!
//! Every read operation returns memberships enriched with the owning
//! student's summary and the covered categories' summaries. Joins are by id;
//! a missing student or category degrades the view instead of failing it.

use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{CategoryCatalog, CategorySummary, StudentDirectory, StudentSummary};

/// A membership with its display joins resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipView {
    pub membership: Membership,
    /// `None` when the student record no longer exists in the directory.
    pub student: Option<StudentSummary>,
    /// Summaries for the categories that still exist, in membership order.
    pub categories: Vec<CategorySummary>,
}

/// Resolve the display joins for one membership.
pub async fn assemble_view(
    students: &dyn StudentDirectory,
    categories: &dyn CategoryCatalog,
    membership: Membership,
) -> Result<MembershipView, MembershipError> {
    let student = students.get_summary(&membership.student_id).await?;
    let category_summaries = categories.get_summaries(&membership.category_ids).await?;
    Ok(MembershipView {
        membership,
        student,
        categories: category_summaries,
    })
}

/// Resolve the display joins for a batch of memberships.
pub async fn assemble_views(
    students: &dyn StudentDirectory,
    categories: &dyn CategoryCatalog,
    memberships: Vec<Membership>,
) -> Result<Vec<MembershipView>, MembershipError> {
    let mut views = Vec::with_capacity(memberships.len());
    for membership in memberships {
        views.push(assemble_view(students, categories, membership).await?);
    }
    Ok(views)
}
