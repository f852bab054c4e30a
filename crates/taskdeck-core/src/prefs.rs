//! Preference storage trait.
//!
//! The client persists exactly two pieces of state between runs: the bearer
//! token and the theme preference, each under a stable well-known key.

use crate::error::Result;

/// Stable key the bearer token is persisted under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Stable key the theme preference is persisted under.
pub const THEME_KEY: &str = "theme";

/// Durable storage for the client's persisted state.
///
/// Reads are infallible: implementations treat an unreadable store as
/// absent values (and log the condition), because a corrupt preferences
/// file must degrade to "signed out, default theme", never to a startup
/// failure.
pub trait PreferenceStore: Send + Sync {
    /// Returns the persisted bearer token, if any.
    fn access_token(&self) -> Option<String>;

    /// Persists the bearer token.
    fn set_access_token(&self, token: &str) -> Result<()>;

    /// Removes the persisted bearer token.
    fn clear_access_token(&self) -> Result<()>;

    /// Returns the persisted theme preference string, if any.
    fn theme(&self) -> Option<String>;

    /// Persists the theme preference.
    fn set_theme(&self, theme: &str) -> Result<()>;
}
