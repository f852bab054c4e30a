//! Assistant conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: Conversation message types (`MessageRole`,
//!   `ConversationMessage`)
//! - `gateway`: Chat transport trait (`ChatGateway`) and its value types
//! - `outcome`: Heuristic reply classification (`OutcomeClassifier`)

mod gateway;
mod model;
mod outcome;

// Re-export public API
pub use gateway::{ChatGateway, ChatHistory, ChatReply};
pub use model::{ConversationMessage, MessageRole};
pub use outcome::{OutcomeClassification, OutcomeClassifier, OutcomeRule, TaskOutcome};
