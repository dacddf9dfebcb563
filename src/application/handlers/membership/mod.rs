//! Membership lifecycle handlers.

mod create_membership;
mod delete_membership;
mod get_membership;
mod get_student_memberships;
mod list_memberships;
mod membership_counts;
mod renew_membership;
mod renew_quote;
mod update_membership;
mod view;

pub use create_membership::{CreateMembershipCommand, CreateMembershipHandler};
pub use delete_membership::{DeleteMembershipCommand, DeleteMembershipHandler};
pub use get_membership::{GetMembershipHandler, GetMembershipQuery};
pub use get_student_memberships::{
    GetStudentMembershipsHandler, GetStudentMembershipsQuery, StudentMemberships,
};
pub use list_memberships::ListMembershipsHandler;
pub use membership_counts::{MembershipCounts, MembershipCountsHandler, MembershipCountsQuery};
pub use renew_membership::{RenewMembershipCommand, RenewMembershipHandler};
pub use renew_quote::{RenewQuote, RenewQuoteHandler, RenewQuoteQuery};
pub use update_membership::{UpdateMembershipCommand, UpdateMembershipHandler};
pub use view::MembershipView;
