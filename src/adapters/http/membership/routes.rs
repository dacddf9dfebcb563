//! Axum router configuration for membership endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    create_membership, delete_membership, get_membership, get_membership_counts,
    get_renew_amount, get_student_memberships, list_memberships, renew_membership,
    update_membership, MembershipAppState,
};

/// Create the membership API router.
///
/// # Routes
///
/// - `POST /create` - Create a new membership
/// - `GET /getAll` - List every membership
/// - `GET /get/:id` - Fetch one membership
/// - `GET /getmembership/:student_id` - A student's memberships plus covered
///   self-paced enrollments
/// - `GET /membership-count/:student_id` - Active/expired/self-paced counts
/// - `GET /get-renew-amount?category=NAME&user_id=ID` - Renewal price quote
/// - `POST /renew/:id` - Renew an expired membership
/// - `POST /update/:id` - Patch an existing membership
/// - `DELETE /delete/:id` - Hard-delete a membership
///
/// Route names follow the paths existing clients already call.
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/create", post(create_membership))
        .route("/getAll", get(list_memberships))
        .route("/get/:id", get(get_membership))
        .route("/getmembership/:student_id", get(get_student_memberships))
        .route("/membership-count/:student_id", get(get_membership_counts))
        .route("/get-renew-amount", get(get_renew_amount))
        .route("/renew/:id", post(renew_membership))
        .route("/update/:id", post(update_membership))
        .route("/delete/:id", delete(delete_membership))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::memory::{
        InMemoryCategoryCatalog, InMemoryCourseCatalog, InMemoryEnrollmentReader,
        InMemoryMembershipRepository, InMemoryStudentDirectory,
    };

    fn test_state() -> MembershipAppState {
        MembershipAppState {
            repository: Arc::new(InMemoryMembershipRepository::new()),
            students: Arc::new(InMemoryStudentDirectory::new()),
            categories: Arc::new(InMemoryCategoryCatalog::new()),
            courses: Arc::new(InMemoryCourseCatalog::new()),
            enrollments: Arc::new(InMemoryEnrollmentReader::new()),
        }
    }

    #[test]
    fn membership_routes_creates_router() {
        let router = membership_routes();
        let _: Router<()> = router.with_state(test_state());
    }
}
