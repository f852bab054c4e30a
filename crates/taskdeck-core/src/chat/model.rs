//! Conversation message types.
//!
//! This module contains types for representing messages in an assistant
//! conversation, including roles and message content.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single message in a conversation transcript.
///
/// Provisional messages appended before the backend confirms carry a
/// locally generated `temp-` id and a local timestamp; backend-assigned
/// ids replace them conceptually when the transcript is reloaded from
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Message identifier (backend-assigned, or `temp-<uuid>` until then).
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}
