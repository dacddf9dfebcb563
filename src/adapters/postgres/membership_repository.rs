//! PostgreSQL implementation of MembershipRepository.

use crate::domain::foundation::{
    Amount, CategoryId, DomainError, ErrorCode, MembershipId, StudentId, Timestamp,
};
use crate::domain::membership::{Membership, PlanDuration, PlanTier};
use crate::ports::MembershipRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const MEMBERSHIP_COLUMNS: &str = "id, student_id, category_ids, amount, plan, max_courses, \
     duration, start_date, expiry_date, status, created_at, updated_at";

/// PostgreSQL implementation of the MembershipRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    student_id: Uuid,
    category_ids: Vec<Uuid>,
    amount: i64,
    plan: String,
    max_courses: i32,
    duration: String,
    start_date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let plan = parse_plan(&row.plan)?;
        let duration = parse_duration(&row.duration)?;
        let amount = Amount::new(row.amount).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid amount: {}", e))
        })?;

        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            student_id: StudentId::from_uuid(row.student_id),
            category_ids: row
                .category_ids
                .into_iter()
                .map(CategoryId::from_uuid)
                .collect(),
            amount,
            plan,
            max_courses: row.max_courses as u32,
            duration,
            start_date: Timestamp::from_datetime(row.start_date),
            expiry_date: Timestamp::from_datetime(row.expiry_date),
            status: row.status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_plan(s: &str) -> Result<PlanTier, DomainError> {
    PlanTier::from_label(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan value: {}", s),
        )
    })
}

fn parse_duration(s: &str) -> Result<PlanDuration, DomainError> {
    PlanDuration::from_label(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid duration value: {}", s),
        )
    })
}

fn category_uuids(membership: &Membership) -> Vec<Uuid> {
    membership
        .category_ids
        .iter()
        .map(|c| *c.as_uuid())
        .collect()
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, student_id, category_ids, amount, plan, max_courses,
                duration, start_date, expiry_date, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.student_id.as_uuid())
        .bind(category_uuids(membership))
        .bind(membership.amount.as_cents())
        .bind(membership.plan.label())
        .bind(membership.max_courses as i32)
        .bind(membership.duration.label())
        .bind(membership.start_date.as_datetime())
        .bind(membership.expiry_date.as_datetime())
        .bind(&membership.status)
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save membership: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                category_ids = $2,
                amount = $3,
                plan = $4,
                max_courses = $5,
                duration = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(category_uuids(membership))
        .bind(membership.amount.as_cents())
        .bind(membership.plan.label())
        .bind(membership.max_courses as i32)
        .bind(membership.duration.label())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update membership: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find membership: {}", e),
            )
        })?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships \
             WHERE student_id = $1 ORDER BY created_at DESC"
        ))
        .bind(student_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find memberships: {}", e),
            )
        })?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_latest_by_student_and_category(
        &self,
        student_id: &StudentId,
        category_id: &CategoryId,
    ) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships \
             WHERE student_id = $1 AND $2 = ANY(category_ids) \
             ORDER BY start_date DESC LIMIT 1"
        ))
        .bind(student_id.as_uuid())
        .bind(category_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find membership: {}", e),
            )
        })?;

        row.map(Membership::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list memberships: {}", e),
            )
        })?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn renew_if_expired(
        &self,
        id: &MembershipId,
        now: Timestamp,
        new_expiry: Timestamp,
    ) -> Result<Option<Membership>, DomainError> {
        // One conditional UPDATE: the expiry check and the window move are
        // atomic, so concurrent renewals resolve to a single winner.
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "UPDATE memberships \
             SET start_date = $2, expiry_date = $3, updated_at = $2 \
             WHERE id = $1 AND expiry_date <= $2 \
             RETURNING {MEMBERSHIP_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(now.as_datetime())
        .bind(new_expiry.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to renew membership: {}", e),
            )
        })?;

        row.map(Membership::try_from).transpose()
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete membership: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }

        Ok(())
    }
}
