//! In-memory implementation of MembershipRepository.
//!
//! Backs integration tests and local development. The mutex gives the same
//! per-document atomicity the production store provides, which is what makes
//! `renew_if_expired` race-safe here too.

use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, MembershipId, StudentId, Timestamp,
};
use crate::domain::membership::Membership;
use crate::ports::MembershipRepository;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory membership store.
pub struct InMemoryMembershipRepository {
    memberships: Mutex<Vec<Membership>>,
    fail_all: bool,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self {
            memberships: Mutex::new(Vec::new()),
            fail_all: false,
        }
    }

    /// A repository where every operation fails with a storage error.
    pub fn failing() -> Self {
        Self {
            memberships: Mutex::new(Vec::new()),
            fail_all: true,
        }
    }

    /// Seed the store with an existing membership.
    pub fn with_membership(membership: Membership) -> Self {
        Self {
            memberships: Mutex::new(vec![membership]),
            fail_all: false,
        }
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.fail_all {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated storage failure",
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        self.check_failure()?;
        self.memberships.lock().unwrap().push(membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut memberships = self.memberships.lock().unwrap();
        match memberships.iter_mut().find(|m| m.id == membership.id) {
            Some(existing) => {
                *existing = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        self.check_failure()?;
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn find_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Membership>, DomainError> {
        self.check_failure()?;
        let mut found: Vec<Membership> = self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.student_id == student_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_latest_by_student_and_category(
        &self,
        student_id: &StudentId,
        category_id: &CategoryId,
    ) -> Result<Option<Membership>, DomainError> {
        self.check_failure()?;
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.student_id == student_id && m.category_ids.contains(category_id))
            .max_by_key(|m| m.start_date)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Membership>, DomainError> {
        self.check_failure()?;
        let mut all = self.memberships.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn renew_if_expired(
        &self,
        id: &MembershipId,
        now: Timestamp,
        new_expiry: Timestamp,
    ) -> Result<Option<Membership>, DomainError> {
        self.check_failure()?;
        let mut memberships = self.memberships.lock().unwrap();
        // Lookup and conditional update under one lock, matching the
        // single-statement UPDATE of the production store.
        match memberships
            .iter_mut()
            .find(|m| &m.id == id && m.expiry_date <= now)
        {
            Some(m) => {
                m.start_date = now;
                m.expiry_date = new_expiry;
                m.updated_at = now;
                Ok(Some(m.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut memberships = self.memberships.lock().unwrap();
        match memberships.iter().position(|m| &m.id == id) {
            Some(pos) => {
                memberships.remove(pos);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            )),
        }
    }
}
