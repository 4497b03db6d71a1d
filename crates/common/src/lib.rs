// ================
// common/src/lib.rs
// ================
//! Common types shared between the board backend library and its binary:
//! member roles, the authenticated principal, and the login wire bodies.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Authority granted to a member account.
///
/// Stored with the member and copied into the principal on a successful
/// login. Serialized in its uppercase form on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Verified identity produced by a successful authentication.
///
/// Carries no password material; it exists only to drive token issuance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: HashSet<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            roles: HashSet::from([role]),
        }
    }
}

/// Body of a successful `POST /login` response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginSuccess {
    /// Signed bearer token proving the identity on later requests.
    pub token: String,
}
