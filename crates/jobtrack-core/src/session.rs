//! Signed-in user session.
//!
//! The surrounding application observes the authentication provider and,
//! on sign-in, constructs a `UserSession` that is passed down to every
//! service by injection. There is no ambient auth global: sign-out is
//! modeled by tearing the dependent services down (see the application
//! layer's `ClientSession`).

use serde::{Deserialize, Serialize};

/// The authenticated user a set of services operates for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Opaque identifier scoping the user's collections.
    pub user_id: String,
    /// Email address, for display only.
    pub email: String,
}

impl UserSession {
    /// Creates a session for a signed-in user.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}
