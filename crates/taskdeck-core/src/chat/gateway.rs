//! Chat gateway trait.
//!
//! The assistant is an opaque external collaborator: the client sends an
//! utterance and gets free text back. This trait is the seam between the
//! assistant session and the HTTP transport.

use super::model::ConversationMessage;
use crate::error::Result;
use async_trait::async_trait;

/// One exchange's worth of assistant output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// The assistant's free-text response.
    pub response: String,
    /// Backend-reported response timestamp (ISO 8601 format).
    pub timestamp: String,
    /// The conversation this exchange belongs to; assigned by the backend
    /// on the first exchange.
    pub conversation_id: Option<String>,
}

/// What the history endpoint returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatHistory {
    /// A single conversation's messages (possibly empty).
    Conversation {
        conversation_id: Option<String>,
        messages: Vec<ConversationMessage>,
    },
    /// No direct history; the backend offered a list of persisted
    /// conversation ids to pick from, most recent first.
    Conversations(Vec<String>),
}

/// Transport for the conversational assistant.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Sends one user utterance and awaits the assistant's reply.
    async fn send_message(&self, user_id: &str, message: &str) -> Result<ChatReply>;

    /// Fetches conversation history.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated user's id
    /// * `conversation_id` - A specific conversation, or `None` for the
    ///   most recent one
    async fn history(&self, user_id: &str, conversation_id: Option<&str>) -> Result<ChatHistory>;
}
