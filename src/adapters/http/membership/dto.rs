//! Data transfer objects for the membership HTTP API.
//!
//! Every response body carries the same envelope fields:
//! `{ success, message?, data?, error? }`. Request bodies and the quote
//! payload use snake_case keys; the counts and student-memberships
//! responses put their extra fields next to `success` rather than under
//! `data`, matching the paths existing clients already parse.

use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    MembershipCounts, MembershipView, RenewQuote, StudentMemberships,
};
use crate::domain::foundation::{CategoryId, StudentId};
use crate::domain::membership::Membership;
use crate::ports::{CategorySummary, EnrollmentView, StudentSummary};

// ════════════════════════════════════════════════════════════════════════════════
// Response Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Uniform response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// Success envelope carrying data and a human-readable message.
    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope. `data` is always absent.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Success envelope without a data payload (delete).
#[derive(Debug, Serialize, Deserialize)]
pub struct EmptyResponse {
    pub success: bool,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for POST /create: `{student_id, category_ids, amount,
/// plan_type, duration}`.
///
/// `plan_type` and `duration` are plain strings so that an unrecognized
/// label becomes a validation failure in the envelope, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateMembershipRequest {
    pub student_id: StudentId,
    pub category_ids: Vec<CategoryId>,
    /// Price in cents.
    pub amount: i64,
    pub plan_type: String,
    pub duration: String,
}

/// Request body for POST /update/:id. All fields optional, same keys as
/// the create body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMembershipRequest {
    pub category_ids: Option<Vec<CategoryId>>,
    pub amount: Option<i64>,
    pub plan_type: Option<String>,
    pub duration: Option<String>,
}

/// Query parameters for GET /get-renew-amount.
#[derive(Debug, Deserialize)]
pub struct RenewQuoteParams {
    pub category: String,
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Student display summary on the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<StudentSummary> for StudentResponse {
    fn from(s: StudentSummary) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name,
            email: s.email,
            phone: s.phone,
        }
    }
}

/// Category display summary on the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    /// Fee in cents.
    pub fee: i64,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(c: CategorySummary) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            fee: c.fee.as_cents(),
        }
    }
}

/// A membership with its display joins resolved.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: String,
    pub student_id: String,
    pub category_ids: Vec<String>,
    pub categories: Vec<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentResponse>,
    /// Price in cents.
    pub amount: i64,
    pub plan_type: String,
    pub max_courses: u32,
    pub duration: String,
    pub start_date: String,
    pub expiry_date: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MembershipView> for MembershipResponse {
    fn from(view: MembershipView) -> Self {
        let m = view.membership;
        Self {
            id: m.id.to_string(),
            student_id: m.student_id.to_string(),
            category_ids: m.category_ids.iter().map(|c| c.to_string()).collect(),
            categories: view.categories.into_iter().map(Into::into).collect(),
            student: view.student.map(Into::into),
            amount: m.amount.as_cents(),
            plan_type: m.plan.label().to_string(),
            max_courses: m.max_courses,
            duration: m.duration.label().to_string(),
            start_date: m.start_date.to_string(),
            expiry_date: m.expiry_date.to_string(),
            status: m.status,
            created_at: m.created_at.to_string(),
            updated_at: m.updated_at.to_string(),
        }
    }
}

impl From<Membership> for MembershipResponse {
    fn from(m: Membership) -> Self {
        MembershipResponse::from(MembershipView {
            membership: m,
            student: None,
            categories: Vec::new(),
        })
    }
}

/// A self-paced enrollment on the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: String,
}

impl From<EnrollmentView> for EnrollmentResponse {
    fn from(e: EnrollmentView) -> Self {
        Self {
            student_id: e.student_id.to_string(),
            course_id: e.course_id.to_string(),
            enrolled_at: e.enrolled_at.to_string(),
        }
    }
}

/// Response body for GET /getmembership/:student_id:
/// `{success, data: Membership[], enrolled_courses: Enrollment[]}`.
///
/// The enrollments ride next to `data`, not inside it.
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentMembershipsResponse {
    pub success: bool,
    pub data: Vec<MembershipResponse>,
    pub enrolled_courses: Vec<EnrollmentResponse>,
}

impl From<StudentMemberships> for StudentMembershipsResponse {
    fn from(result: StudentMemberships) -> Self {
        Self {
            success: true,
            data: result.memberships.into_iter().map(Into::into).collect(),
            enrolled_courses: result.enrollments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for GET /membership-count/:student_id:
/// `{success, totalSelfPacedMemberships, activeMembershipsCount,
/// expiredMembershipsCount}` — the counts sit at the top level, there is
/// no `data` wrapper.
///
/// `totalSelfPacedMemberships` counts self-paced enrollments; the name is
/// kept for wire compatibility with existing clients.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCountsResponse {
    pub success: bool,
    pub total_self_paced_memberships: u64,
    pub active_memberships_count: u64,
    pub expired_memberships_count: u64,
}

impl From<MembershipCounts> for MembershipCountsResponse {
    fn from(counts: MembershipCounts) -> Self {
        Self {
            success: true,
            total_self_paced_memberships: counts.self_paced_enrollments,
            active_memberships_count: counts.active,
            expired_memberships_count: counts.expired,
        }
    }
}

/// Payload of GET /get-renew-amount: `{amount, membership_id}` under
/// `data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenewQuoteResponse {
    pub membership_id: String,
    /// Price of the prior membership, in cents.
    pub amount: i64,
}

impl From<RenewQuote> for RenewQuoteResponse {
    fn from(quote: RenewQuote) -> Self {
        Self {
            membership_id: quote.membership_id.to_string(),
            amount: quote.amount.as_cents(),
        }
    }
}
