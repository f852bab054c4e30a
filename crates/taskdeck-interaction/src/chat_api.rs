//! Chat endpoint client.
//!
//! The history endpoint answers in one of two shapes: a conversation with
//! messages, or a list of persisted conversations to pick from. Both are
//! modeled explicitly and converted into the core `ChatHistory` value so
//! the assistant session never touches wire structs.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use taskdeck_core::chat::{ChatGateway, ChatHistory, ChatReply, ConversationMessage, MessageRole};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::event::{AppEvent, EventBus};
use taskdeck_core::prefs::PreferenceStore;

use crate::config::ApiConfig;
use crate::http::{network_error, operation_error};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: String,
    timestamp: String,
    #[serde(default)]
    conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: String,
    role: MessageRole,
    content: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct ConversationRef {
    id: String,
}

/// The two shapes the history endpoint can answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryBody {
    Messages {
        success: bool,
        #[serde(default)]
        messages: Vec<WireMessage>,
        #[serde(default)]
        conversation: Option<ConversationRef>,
    },
    Picker {
        conversations: Vec<ConversationRef>,
    },
}

/// Client for the per-user chat endpoints.
pub struct ChatApi {
    client: Client,
    config: ApiConfig,
    prefs: Arc<dyn PreferenceStore>,
    events: EventBus,
}

impl ChatApi {
    /// Creates a new client.
    pub fn new(config: ApiConfig, prefs: Arc<dyn PreferenceStore>, events: EventBus) -> Self {
        Self {
            client: Client::new(),
            config,
            prefs,
            events,
        }
    }

    fn bearer_token(&self) -> Result<String> {
        match self.prefs.access_token() {
            Some(token) => Ok(token),
            None => {
                self.events.publish(AppEvent::Unauthorized);
                Err(TaskdeckError::auth("No stored credential"))
            }
        }
    }

    async fn checked(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.events.publish(AppEvent::Unauthorized);
            return Err(TaskdeckError::auth(format!(
                "Credential rejected (status: {})",
                status
            )));
        }
        if !status.is_success() {
            return Err(operation_error(response).await);
        }
        Ok(response)
    }
}

impl From<WireMessage> for ConversationMessage {
    fn from(msg: WireMessage) -> Self {
        ConversationMessage {
            id: msg.id,
            role: msg.role,
            content: msg.content,
            timestamp: msg.created_at,
        }
    }
}

impl From<HistoryBody> for ChatHistory {
    fn from(body: HistoryBody) -> Self {
        match body {
            HistoryBody::Messages {
                success,
                messages,
                conversation,
            } => {
                // A non-success envelope carries nothing worth keeping.
                let messages = if success {
                    messages.into_iter().map(Into::into).collect()
                } else {
                    Vec::new()
                };
                ChatHistory::Conversation {
                    conversation_id: conversation.map(|c| c.id),
                    messages,
                }
            }
            HistoryBody::Picker { conversations } => {
                ChatHistory::Conversations(conversations.into_iter().map(|c| c.id).collect())
            }
        }
    }
}

#[async_trait]
impl ChatGateway for ChatApi {
    async fn send_message(&self, user_id: &str, message: &str) -> Result<ChatReply> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(self.config.url(&format!("/api/{}/chat", user_id)))
            .bearer_auth(token)
            .json(&ChatRequest { message })
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to send chat message", e))?;

        let response = self.checked(response).await?;
        let body: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| network_error("Failed to parse chat response", e))?;

        Ok(ChatReply {
            response: body.response,
            timestamp: body.timestamp,
            conversation_id: body.conversation_id,
        })
    }

    async fn history(&self, user_id: &str, conversation_id: Option<&str>) -> Result<ChatHistory> {
        let token = self.bearer_token()?;
        let mut request = self
            .client
            .get(self.config.url(&format!("/api/{}/chat/history", user_id)))
            .bearer_auth(token)
            .timeout(self.config.request_timeout);

        if let Some(conversation_id) = conversation_id {
            request = request.query(&[("conversation_id", conversation_id)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| network_error("Failed to fetch chat history", e))?;

        let response = self.checked(response).await?;
        let body: HistoryBody = response
            .json()
            .await
            .map_err(|e| network_error("Failed to parse chat history", e))?;

        Ok(body.into())
    }
}
