// ============================
// board-backend-lib/src/store.rs
// ============================
//! Member store abstraction with an in-memory implementation.
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppError;
use crate::member::{Member, NewMember};

/// Trait for member credential stores.
///
/// The authentication pipeline only ever reads; the CRUD operations exist
/// for the registration/profile collaborators and the test fixtures.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Look up a member by username. Exact string equality.
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError>;

    /// Whether a member with this exact username exists.
    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    /// Look up a member by id.
    async fn find_by_id(&self, id: u64) -> Result<Option<Member>, AppError>;

    /// Persist a new member. Fails on duplicate usernames and on blank
    /// required fields.
    async fn save(&self, new: NewMember) -> Result<Member, AppError>;

    /// Replace a stored member. The caller is expected to have gone through
    /// the entity's update methods so `updated_at` is already refreshed.
    async fn update(&self, member: Member) -> Result<(), AppError>;

    /// Delete a member by id.
    async fn delete(&self, id: u64) -> Result<(), AppError>;
}

/// In-memory implementation of the member store.
#[derive(Default)]
pub struct InMemoryMemberStore {
    members: DashMap<u64, Member>,
    // username -> id index; usernames are unique
    by_username: DashMap<String, u64>,
    seq: AtomicU64,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError> {
        let Some(id) = self.by_username.get(username).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.members.get(&id).map(|e| e.value().clone()))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.by_username.contains_key(username))
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Member>, AppError> {
        Ok(self.members.get(&id).map(|e| e.value().clone()))
    }

    async fn save(&self, new: NewMember) -> Result<Member, AppError> {
        new.validate()?;
        if self.by_username.contains_key(&new.username) {
            return Err(AppError::DuplicateUsername(new.username));
        }

        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let member = Member::from_new(id, new);
        self.by_username.insert(member.username.clone(), id);
        self.members.insert(id, member.clone());
        Ok(member)
    }

    async fn update(&self, member: Member) -> Result<(), AppError> {
        if !self.members.contains_key(&member.id) {
            return Err(AppError::MemberNotFound);
        }
        self.members.insert(member.id, member);
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), AppError> {
        let Some((_, member)) = self.members.remove(&id) else {
            return Err(AppError::MemberNotFound);
        };
        self.by_username.remove(&member.username);
        Ok(())
    }
}
