//! Auth gateway trait.

use crate::error::Result;
use async_trait::async_trait;

/// Remote side of session teardown.
///
/// The session store treats remote invalidation as best-effort: a failed
/// `logout` never prevents the local state reset.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Asks the backend to invalidate the current session.
    async fn logout(&self) -> Result<()>;
}
