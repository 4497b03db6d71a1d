// ============================
// board-backend-lib/src/member.rs
// ============================
//! Member account entity with audit timestamps.
use board_common::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::password::DelegatingHasher;
use crate::error::AppError;

/// A persisted member account.
///
/// `password_hash` is always an algorithm-tagged hash, never the cleartext
/// password. `created_at` is fixed at creation; every mutation refreshes
/// `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub nickname: String,
    pub age: u32,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a member. The password arrives already hashed;
/// callers go through [`DelegatingHasher::hash`] first.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub nickname: String,
    pub age: u32,
    pub role: Role,
}

impl NewMember {
    /// Check the non-null constraints the schema would otherwise enforce.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.is_empty() {
            return Err(AppError::InvalidMember("username must not be empty".into()));
        }
        if self.name.is_empty() {
            return Err(AppError::InvalidMember("name must not be empty".into()));
        }
        if self.nickname.is_empty() {
            return Err(AppError::InvalidMember("nickname must not be empty".into()));
        }
        if self.age == 0 {
            return Err(AppError::InvalidMember("age must be set".into()));
        }
        Ok(())
    }
}

impl Member {
    pub(crate) fn from_new(id: u64, new: NewMember) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: new.username,
            password_hash: new.password_hash,
            name: new.name,
            nickname: new.nickname,
            age: new.age,
            role: new.role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn update_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
        self.touch();
    }

    pub fn update_age(&mut self, age: u32) {
        self.age = age;
        self.touch();
    }

    /// Re-hash and replace the stored password.
    pub fn update_password(
        &mut self,
        hasher: &DelegatingHasher,
        password: &str,
    ) -> Result<(), AppError> {
        self.password_hash = hasher.hash(password)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
