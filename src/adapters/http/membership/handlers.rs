//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers and map domain errors onto the response envelope.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use crate::application::handlers::membership::{
    CreateMembershipCommand, CreateMembershipHandler, DeleteMembershipCommand,
    DeleteMembershipHandler, GetMembershipHandler, GetMembershipQuery,
    GetStudentMembershipsHandler, GetStudentMembershipsQuery, ListMembershipsHandler,
    MembershipCountsHandler, MembershipCountsQuery, RenewMembershipCommand,
    RenewMembershipHandler, RenewQuoteHandler, RenewQuoteQuery, UpdateMembershipCommand,
    UpdateMembershipHandler,
};
use crate::domain::foundation::{MembershipId, StudentId};
use crate::domain::membership::MembershipError;
use crate::ports::{
    CategoryCatalog, CourseCatalog, EnrollmentReader, MembershipRepository, StudentDirectory,
};

use super::dto::{
    ApiResponse, CreateMembershipRequest, EmptyResponse, MembershipCountsResponse,
    MembershipResponse, RenewQuoteParams, RenewQuoteResponse, StudentMembershipsResponse,
    UpdateMembershipRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; all dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct MembershipAppState {
    pub repository: Arc<dyn MembershipRepository>,
    pub students: Arc<dyn StudentDirectory>,
    pub categories: Arc<dyn CategoryCatalog>,
    pub courses: Arc<dyn CourseCatalog>,
    pub enrollments: Arc<dyn EnrollmentReader>,
}

impl MembershipAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_handler(&self) -> CreateMembershipHandler {
        CreateMembershipHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
        )
    }

    pub fn get_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
        )
    }

    pub fn list_handler(&self) -> ListMembershipsHandler {
        ListMembershipsHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
        )
    }

    pub fn student_memberships_handler(&self) -> GetStudentMembershipsHandler {
        GetStudentMembershipsHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
            self.courses.clone(),
            self.enrollments.clone(),
        )
    }

    pub fn counts_handler(&self) -> MembershipCountsHandler {
        MembershipCountsHandler::new(self.repository.clone(), self.enrollments.clone())
    }

    pub fn renew_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
        )
    }

    pub fn update_handler(&self) -> UpdateMembershipHandler {
        UpdateMembershipHandler::new(
            self.repository.clone(),
            self.students.clone(),
            self.categories.clone(),
        )
    }

    pub fn delete_handler(&self) -> DeleteMembershipHandler {
        DeleteMembershipHandler::new(self.repository.clone())
    }

    pub fn renew_quote_handler(&self) -> RenewQuoteHandler {
        RenewQuoteHandler::new(self.repository.clone(), self.categories.clone())
    }
}

// Ids arrive as path strings; a malformed id is a validation failure in the
// envelope, not a router-level rejection.
fn parse_membership_id(raw: &str) -> Result<MembershipId, MembershipApiError> {
    raw.parse()
        .map_err(|_| MembershipError::validation("id", format!("invalid membership id: {raw}")).into())
}

fn parse_student_id(raw: &str) -> Result<StudentId, MembershipApiError> {
    raw.parse()
        .map_err(|_| MembershipError::validation("student_id", format!("invalid student id: {raw}")).into())
}

/// `Json` whose rejection is the response envelope instead of axum's
/// plain-text body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = MembershipApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                Err(MembershipError::validation("body", rejection.body_text()).into())
            }
        }
    }
}

/// `Query` with the same envelope treatment for missing or malformed
/// parameters.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = MembershipApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                Err(MembershipError::validation("query", rejection.body_text()).into())
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create - Create a new membership
pub async fn create_membership(
    State(state): State<MembershipAppState>,
    ApiJson(request): ApiJson<CreateMembershipRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.create_handler();
    let cmd = CreateMembershipCommand {
        student_id: request.student_id,
        category_ids: request.category_ids,
        amount_cents: request.amount,
        plan_type: request.plan_type,
        duration: request.duration,
    };

    let view = handler.handle(cmd).await?;

    let body = ApiResponse::ok_with_message(
        "Membership created successfully",
        MembershipResponse::from(view),
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /renew/:id - Renew an expired membership
pub async fn renew_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let membership_id = parse_membership_id(&id)?;
    let handler = state.renew_handler();

    let view = handler
        .handle(RenewMembershipCommand { membership_id })
        .await?;

    let body = ApiResponse::ok_with_message(
        "Membership renewed successfully",
        MembershipResponse::from(view),
    );
    Ok(Json(body))
}

/// POST /update/:id - Patch an existing membership
pub async fn update_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateMembershipRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let membership_id = parse_membership_id(&id)?;
    let handler = state.update_handler();
    let cmd = UpdateMembershipCommand {
        membership_id,
        category_ids: request.category_ids,
        amount_cents: request.amount,
        plan_type: request.plan_type,
        duration: request.duration,
    };

    let view = handler.handle(cmd).await?;

    let body = ApiResponse::ok_with_message(
        "Membership updated successfully",
        MembershipResponse::from(view),
    );
    Ok(Json(body))
}

/// DELETE /delete/:id - Hard-delete a membership
pub async fn delete_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let membership_id = parse_membership_id(&id)?;
    let handler = state.delete_handler();

    handler.handle(DeleteMembershipCommand { membership_id }).await?;

    let body = EmptyResponse {
        success: true,
        message: "Membership deleted successfully".to_string(),
    };
    Ok(Json(body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /get/:id - Fetch one membership
pub async fn get_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let membership_id = parse_membership_id(&id)?;
    let handler = state.get_handler();

    let view = handler.handle(GetMembershipQuery { membership_id }).await?;

    Ok(Json(ApiResponse::ok(MembershipResponse::from(view))))
}

/// GET /getAll - List every membership
pub async fn list_memberships(
    State(state): State<MembershipAppState>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.list_handler();
    let views = handler.handle().await?;

    let data: Vec<MembershipResponse> = views.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /getmembership/:student_id - A student's memberships with their
/// covered self-paced enrollments
pub async fn get_student_memberships(
    State(state): State<MembershipAppState>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let student_id = parse_student_id(&student_id)?;
    let handler = state.student_memberships_handler();

    let result = handler
        .handle(GetStudentMembershipsQuery { student_id })
        .await?;

    // `enrolled_courses` sits beside `data`, so no ApiResponse wrapper here.
    Ok(Json(StudentMembershipsResponse::from(result)))
}

/// GET /membership-count/:student_id - Active/expired counts plus self-paced
/// enrollment count, all at the top level of the body
pub async fn get_membership_counts(
    State(state): State<MembershipAppState>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let student_id = parse_student_id(&student_id)?;
    let handler = state.counts_handler();

    let counts = handler.handle(MembershipCountsQuery { student_id }).await?;

    Ok(Json(MembershipCountsResponse::from(counts)))
}

/// GET /get-renew-amount?category=NAME&user_id=ID - Renewal price quote
pub async fn get_renew_amount(
    State(state): State<MembershipAppState>,
    ApiQuery(params): ApiQuery<RenewQuoteParams>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let student_id = parse_student_id(&params.user_id)?;
    let handler = state.renew_quote_handler();

    let quote = handler
        .handle(RenewQuoteQuery {
            student_id,
            category_name: params.category,
        })
        .await?;

    Ok(Json(ApiResponse::ok(RenewQuoteResponse::from(quote))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to envelope HTTP responses.
pub struct MembershipApiError(MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::DomainError> for MembershipApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        Self(MembershipError::infrastructure(err.to_string()))
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            MembershipError::NotFound(_)
            | MembershipError::NoPriorMembership { .. }
            | MembershipError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
            MembershipError::CategoryLimitExceeded { .. }
            | MembershipError::InvalidPlanTier(_)
            | MembershipError::InvalidDuration(_)
            | MembershipError::StillActive(_)
            | MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Storage failures are logged with detail but surface generically.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Internal error handling membership request");
            "Internal server error".to_string()
        } else {
            self.0.message()
        };

        let body: ApiResponse<()> = ApiResponse::error(message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CategoryId, StudentId};

    #[test]
    fn api_error_maps_not_found_to_404() {
        let err = MembershipApiError(MembershipError::not_found(MembershipId::new()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_category_not_found_to_404() {
        let err = MembershipApiError(MembershipError::category_not_found("Astrology"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_no_prior_membership_to_404() {
        let err = MembershipApiError(MembershipError::no_prior_membership(
            StudentId::new(),
            CategoryId::new(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_invalid_plan_tier_to_400() {
        let err = MembershipApiError(MembershipError::invalid_plan_tier("platinum"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_still_active_to_400() {
        let err = MembershipApiError(MembershipError::still_active(MembershipId::new()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_category_limit_to_400() {
        let err = MembershipApiError(MembershipError::category_limit_exceeded(1, 3));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_infrastructure_to_500() {
        let err = MembershipApiError(MembershipError::infrastructure("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_membership_id_is_a_validation_failure() {
        let err = parse_membership_id("not-a-uuid").unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn well_formed_membership_id_parses() {
        assert!(parse_membership_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[tokio::test]
    async fn malformed_json_body_maps_to_envelope_400() {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let err = ApiJson::<CreateMembershipRequest>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_maps_to_envelope_400() {
        let request = Request::builder()
            .body(axum::body::Body::from("{}"))
            .unwrap();

        let err = ApiJson::<UpdateMembershipRequest>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_query_params_map_to_envelope_400() {
        let (mut parts, _) = Request::builder()
            .uri("/get-renew-amount")
            .body(axum::body::Body::empty())
            .unwrap()
            .into_parts();

        let err = ApiQuery::<RenewQuoteParams>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
