//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session state snapshot (`SessionSnapshot`, `UserIdentity`)
//! - `gateway`: Remote session invalidation trait (`AuthGateway`)

mod gateway;
mod model;

// Re-export public API
pub use gateway::AuthGateway;
pub use model::{SessionSnapshot, UserIdentity};
