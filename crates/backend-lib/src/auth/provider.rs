// ============================
// board-backend-lib/src/auth/provider.rs
// ============================
//! Credential verification against the member store.
use board_common::Principal;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::password::DelegatingHasher;
use crate::error::AppError;
use crate::store::MemberStore;

/// Why an authentication attempt did not produce a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    UnknownUser,
    BadPassword,
    MalformedRequest,
    UnsupportedContentType,
}

/// Result of one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success(Principal),
    Failure(FailureReason),
}

/// Orchestrates the member store and the password hasher into a single
/// `verify(username, password)` operation.
pub struct AuthProvider {
    store: Arc<dyn MemberStore>,
    hasher: Arc<DelegatingHasher>,
    // Compared against when the username is unknown, so unknown and known
    // usernames cost the same wall time.
    dummy_hash: String,
    store_timeout: Duration,
}

impl AuthProvider {
    pub fn new(
        store: Arc<dyn MemberStore>,
        hasher: Arc<DelegatingHasher>,
        store_timeout: Duration,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash("timing-equalizer")?;
        Ok(Self {
            store,
            hasher,
            dummy_hash,
            store_timeout,
        })
    }

    /// Verify one credential pair. A single attempt per request; lockout and
    /// rate limiting live elsewhere.
    pub async fn verify(&self, username: &str, password: &str) -> Result<AuthOutcome, AppError> {
        let lookup = self.store.find_by_username(username);
        let member = tokio::time::timeout(self.store_timeout, lookup)
            .await
            .map_err(|_| AppError::StoreTimeout)??;

        let Some(member) = member else {
            // Burn a comparison anyway to flatten the timing difference
            // between unknown usernames and wrong passwords.
            let _ = self.matches_offloaded(password, self.dummy_hash.clone()).await?;
            return Ok(AuthOutcome::Failure(FailureReason::UnknownUser));
        };

        if self
            .matches_offloaded(password, member.password_hash.clone())
            .await?
        {
            Ok(AuthOutcome::Success(Principal::new(
                member.username,
                member.role,
            )))
        } else {
            Ok(AuthOutcome::Failure(FailureReason::BadPassword))
        }
    }

    /// Run the adaptive hash comparison on the blocking pool so a login
    /// storm cannot starve the async runtime.
    async fn matches_offloaded(&self, password: &str, hash: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.matches(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("hash comparison task failed: {e}")))
    }
}
