//! Membership aggregate entity.
//!
//! A Membership is a time-boxed entitlement granting a student access to a
//! bounded number of course categories.
//!
//! # Design Decisions
//!
//! - **Money in cents**: All monetary values stored as i64 cents (not floats)
//! - **Computed expiry**: active/expired is always derived from `expiry_date`
//!   vs the clock; the stored status marker is write-once audit data and is
//!   never consulted for classification
//! - **Snapshot of the cap**: `max_courses` is copied from the plan catalog
//!   at creation so history survives later catalog changes

use crate::domain::foundation::{Amount, CategoryId, MembershipId, StudentId, Timestamp};
use serde::{Deserialize, Serialize};

use super::{MembershipError, PlanDuration, PlanTier};

/// Marker written to `status` at creation. Kept for wire compatibility with
/// older clients; expiry classification never reads it.
pub const CREATED_STATUS: &str = "success";

/// Membership aggregate.
///
/// # Invariants
///
/// - `category_ids.len() <= max_courses`, with `max_courses` snapshotted from
///   the plan tier at creation (and re-snapshotted when the plan is patched)
/// - `category_ids` contains no duplicates
/// - `expiry_date > start_date`, guaranteed by construction: the expiry is
///   always `start_date` plus the duration's calendar months
/// - Renewal requires `expiry_date <= now` and only moves the time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier, immutable after creation.
    pub id: MembershipId,

    /// Student who owns this membership. Assumed valid by the caller.
    pub student_id: StudentId,

    /// Course categories covered, bounded by the plan tier cap.
    pub category_ids: Vec<CategoryId>,

    /// Price paid, in cents.
    pub amount: Amount,

    /// Plan tier determining the category cap.
    pub plan: PlanTier,

    /// Category cap snapshotted from the tier at creation.
    pub max_courses: u32,

    /// Billing period label; resolved to months on every (re)computation.
    pub duration: PlanDuration,

    /// Start of the current validity window.
    pub start_date: Timestamp,

    /// End of the current validity window.
    pub expiry_date: Timestamp,

    /// Write-once creation marker. See module docs.
    pub status: String,

    /// When the membership was created.
    pub created_at: Timestamp,

    /// When the membership was last modified.
    pub updated_at: Timestamp,
}

/// Constrained field patch for an existing membership.
///
/// Only fields without time-window semantics are patchable; `start_date` and
/// `expiry_date` belong to renewal. Every patch re-runs full invariant
/// validation against the (possibly new) plan tier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipPatch {
    pub category_ids: Option<Vec<CategoryId>>,
    pub amount: Option<Amount>,
    pub plan: Option<PlanTier>,
    pub duration: Option<PlanDuration>,
}

impl Membership {
    /// Create a new membership starting now.
    ///
    /// Computes `max_courses` from the tier, validates the category list
    /// against it, and derives `expiry_date` from `now` plus the duration's
    /// calendar months.
    ///
    /// # Errors
    ///
    /// - `CategoryLimitExceeded` if more categories than the tier allows
    /// - `ValidationFailed` if the category list contains duplicates
    pub fn create(
        id: MembershipId,
        student_id: StudentId,
        category_ids: Vec<CategoryId>,
        amount: Amount,
        plan: PlanTier,
        duration: PlanDuration,
        now: Timestamp,
    ) -> Result<Self, MembershipError> {
        let max_courses = plan.max_courses();
        validate_categories(&category_ids, max_courses)?;

        let expiry_date = now.add_months(duration.months());

        Ok(Self {
            id,
            student_id,
            category_ids,
            amount,
            plan,
            max_courses,
            duration,
            start_date: now,
            expiry_date,
            status: CREATED_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether the membership has expired as of `now`.
    ///
    /// This comparison is the single source of truth for active/expired
    /// classification; the stored `status` field is never consulted.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiry_date <= now
    }

    /// Whether the membership is active as of `now`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.is_expired(now)
    }

    /// Renew an expired membership in place.
    ///
    /// Resets the validity window to `[now, now + duration months]`.
    /// Identity, categories, amount, plan, and duration are untouched.
    ///
    /// # Errors
    ///
    /// Returns `StillActive` if the membership has not yet expired.
    pub fn renew(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        if self.is_active(now) {
            return Err(MembershipError::still_active(self.id));
        }

        self.start_date = now;
        self.expiry_date = now.add_months(self.duration.months());
        self.updated_at = now;
        Ok(())
    }

    /// Apply a constrained patch, re-validating all invariants.
    ///
    /// Changing the plan re-snapshots `max_courses` and re-checks the
    /// category cap. Changing the duration takes effect at the next renewal;
    /// the current validity window is not recomputed.
    ///
    /// # Errors
    ///
    /// Returns `CategoryLimitExceeded` or `ValidationFailed` if the patched
    /// state would violate an invariant. The membership is unchanged on error.
    pub fn apply_patch(
        &mut self,
        patch: MembershipPatch,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        let plan = patch.plan.unwrap_or(self.plan);
        let max_courses = plan.max_courses();
        let category_ids = patch
            .category_ids
            .unwrap_or_else(|| self.category_ids.clone());

        validate_categories(&category_ids, max_courses)?;

        self.plan = plan;
        self.max_courses = max_courses;
        self.category_ids = category_ids;
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_categories(
    category_ids: &[CategoryId],
    max_courses: u32,
) -> Result<(), MembershipError> {
    if category_ids.len() > max_courses as usize {
        return Err(MembershipError::category_limit_exceeded(
            max_courses,
            category_ids.len(),
        ));
    }
    for (i, id) in category_ids.iter().enumerate() {
        if category_ids[..i].contains(id) {
            return Err(MembershipError::validation(
                "category_ids",
                format!("duplicate category: {}", id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn categories(n: usize) -> Vec<CategoryId> {
        (0..n).map(|_| CategoryId::new()).collect()
    }

    fn amount() -> Amount {
        Amount::new(49900).unwrap()
    }

    fn create(
        plan: PlanTier,
        duration: PlanDuration,
        n_categories: usize,
        now: Timestamp,
    ) -> Result<Membership, MembershipError> {
        Membership::create(
            MembershipId::new(),
            StudentId::new(),
            categories(n_categories),
            amount(),
            plan,
            duration,
            now,
        )
    }

    // Construction tests

    #[test]
    fn silver_accepts_one_category() {
        let m = create(
            PlanTier::Silver,
            PlanDuration::Monthly,
            1,
            ts("2024-01-15T00:00:00Z"),
        )
        .unwrap();
        assert_eq!(m.max_courses, 1);
        assert_eq!(m.status, CREATED_STATUS);
    }

    #[test]
    fn silver_rejects_two_categories() {
        let result = create(
            PlanTier::Silver,
            PlanDuration::Monthly,
            2,
            ts("2024-01-15T00:00:00Z"),
        );
        assert!(matches!(
            result,
            Err(MembershipError::CategoryLimitExceeded {
                limit: 1,
                requested: 2
            })
        ));
    }

    #[test]
    fn gold_accepts_three_categories() {
        let m = create(
            PlanTier::Gold,
            PlanDuration::Yearly,
            3,
            ts("2024-01-15T00:00:00Z"),
        )
        .unwrap();
        assert_eq!(m.max_courses, 3);
    }

    #[test]
    fn gold_rejects_four_categories() {
        let result = create(
            PlanTier::Gold,
            PlanDuration::Yearly,
            4,
            ts("2024-01-15T00:00:00Z"),
        );
        assert!(matches!(
            result,
            Err(MembershipError::CategoryLimitExceeded {
                limit: 3,
                requested: 4
            })
        ));
    }

    #[test]
    fn duplicate_categories_are_rejected() {
        let cat = CategoryId::new();
        let result = Membership::create(
            MembershipId::new(),
            StudentId::new(),
            vec![cat, cat],
            amount(),
            PlanTier::Gold,
            PlanDuration::Monthly,
            ts("2024-01-15T00:00:00Z"),
        );
        assert!(matches!(
            result,
            Err(MembershipError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn monthly_expiry_is_one_calendar_month_out() {
        let now = ts("2024-01-15T10:00:00Z");
        let m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        assert_eq!(m.start_date, now);
        assert_eq!(m.expiry_date, now.add_months(1));
        assert!(m.expiry_date > m.start_date);
    }

    #[test]
    fn yearly_expiry_is_twelve_calendar_months_out() {
        let now = ts("2024-02-29T00:00:00Z");
        let m = create(PlanTier::Gold, PlanDuration::Yearly, 2, now).unwrap();
        // 2025 is not a leap year, so Feb 29 clamps to Feb 28
        assert_eq!(m.expiry_date, now.add_months(12));
        assert!(m.expiry_date > m.start_date);
    }

    // Expiry classification tests

    #[test]
    fn membership_is_active_before_expiry() {
        let now = ts("2024-01-15T00:00:00Z");
        let m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        assert!(m.is_active(now));
        assert!(!m.is_expired(now));
    }

    #[test]
    fn membership_is_expired_at_exact_expiry_instant() {
        let now = ts("2024-01-15T00:00:00Z");
        let m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        assert!(m.is_expired(m.expiry_date));
    }

    #[test]
    fn membership_is_expired_after_expiry() {
        let now = ts("2024-01-15T00:00:00Z");
        let m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let later = m.expiry_date.add_days(1);
        assert!(m.is_expired(later));
    }

    #[test]
    fn stored_status_does_not_drive_classification() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        m.status = "whatever".to_string();
        assert!(m.is_active(now));
        assert!(m.is_expired(m.expiry_date.add_days(1)));
    }

    // Renewal tests

    #[test]
    fn renew_fails_while_active() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let result = m.renew(now.add_days(5));
        assert!(matches!(result, Err(MembershipError::StillActive(id)) if id == m.id));
    }

    #[test]
    fn renew_succeeds_after_expiry() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let later = m.expiry_date.add_days(10);

        m.renew(later).unwrap();

        assert_eq!(m.start_date, later);
        assert_eq!(m.expiry_date, later.add_months(1));
        assert!(m.is_active(later));
    }

    #[test]
    fn renew_preserves_identity_and_terms() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Gold, PlanDuration::Quarterly, 2, now).unwrap();
        let before = m.clone();
        let later = m.expiry_date.add_days(1);

        m.renew(later).unwrap();

        assert_eq!(m.id, before.id);
        assert_eq!(m.student_id, before.student_id);
        assert_eq!(m.category_ids, before.category_ids);
        assert_eq!(m.amount, before.amount);
        assert_eq!(m.plan, before.plan);
        assert_eq!(m.duration, before.duration);
        assert_eq!(m.created_at, before.created_at);
        assert_ne!(m.start_date, before.start_date);
        assert_ne!(m.expiry_date, before.expiry_date);
    }

    #[test]
    fn renew_at_exact_expiry_instant_succeeds() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let at_expiry = m.expiry_date;
        assert!(m.renew(at_expiry).is_ok());
    }

    // Patch tests

    #[test]
    fn patch_amount_only_changes_amount() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let before = m.clone();

        let patch = MembershipPatch {
            amount: Some(Amount::new(59900).unwrap()),
            ..Default::default()
        };
        m.apply_patch(patch, now.add_days(1)).unwrap();

        assert_eq!(m.amount.as_cents(), 59900);
        assert_eq!(m.category_ids, before.category_ids);
        assert_eq!(m.expiry_date, before.expiry_date);
    }

    #[test]
    fn patch_revalidates_category_cap_against_new_plan() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Gold, PlanDuration::Monthly, 3, now).unwrap();

        // Downgrading to silver with three categories must fail
        let patch = MembershipPatch {
            plan: Some(PlanTier::Silver),
            ..Default::default()
        };
        let result = m.apply_patch(patch, now);
        assert!(matches!(
            result,
            Err(MembershipError::CategoryLimitExceeded { limit: 1, .. })
        ));
        // Unchanged on error
        assert_eq!(m.plan, PlanTier::Gold);
        assert_eq!(m.max_courses, 3);
    }

    #[test]
    fn patch_plan_resnapshots_max_courses() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();

        let patch = MembershipPatch {
            plan: Some(PlanTier::Gold),
            category_ids: Some(categories(3)),
            ..Default::default()
        };
        m.apply_patch(patch, now).unwrap();

        assert_eq!(m.plan, PlanTier::Gold);
        assert_eq!(m.max_courses, 3);
        assert_eq!(m.category_ids.len(), 3);
    }

    #[test]
    fn patch_duration_does_not_move_current_window() {
        let now = ts("2024-01-15T00:00:00Z");
        let mut m = create(PlanTier::Silver, PlanDuration::Monthly, 1, now).unwrap();
        let expiry_before = m.expiry_date;

        let patch = MembershipPatch {
            duration: Some(PlanDuration::Yearly),
            ..Default::default()
        };
        m.apply_patch(patch, now).unwrap();

        assert_eq!(m.duration, PlanDuration::Yearly);
        assert_eq!(m.expiry_date, expiry_before);

        // The new duration applies at the next renewal
        let later = m.expiry_date.add_days(1);
        m.renew(later).unwrap();
        assert_eq!(m.expiry_date, later.add_months(12));
    }
}
