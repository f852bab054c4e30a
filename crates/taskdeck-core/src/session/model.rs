//! Session domain model.
//!
//! The session is the client's belief about the current user's
//! authentication status. It transitions only through the session store's
//! actions plus the global unauthorized signal.

use serde::{Deserialize, Serialize};

/// The authenticated user's identity, decoded client-side from the bearer
/// token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

/// A snapshot of the session state.
///
/// Invariant: `is_authenticated == true` implies `user` is present. The
/// constructors below are the only intended way to build a snapshot, which
/// keeps the invariant out of every call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub user: Option<UserIdentity>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    /// The state at process start: nothing known yet, status check pending.
    pub fn initial() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_loading: true,
            error: None,
        }
    }

    /// A settled, signed-in state.
    pub fn authenticated(user: UserIdentity) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            is_loading: false,
            error: None,
        }
    }

    /// A settled, signed-out state.
    pub fn unauthenticated() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_loading: false,
            error: None,
        }
    }

    /// A settled sign-in failure with a message for inline display.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_authenticated: false,
            user: None,
            is_loading: false,
            error: Some(error.into()),
        }
    }

    /// Returns the user's id when authenticated.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}
