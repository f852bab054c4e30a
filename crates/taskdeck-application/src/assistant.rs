//! Assistant session.
//!
//! Manages the conversation transcript with the assistant popup and turns
//! free-text replies into task-operation outcomes. The user's message is
//! appended optimistically with a locally generated id and timestamp; the
//! backend's own ids only arrive with a history reload, at which point the
//! provisional entries are replaced wholesale.

use std::sync::Arc;

use chrono::Utc;
use taskdeck_core::chat::{
    ChatGateway, ChatHistory, ConversationMessage, MessageRole, OutcomeClassification,
    OutcomeClassifier, TaskOutcome,
};
use taskdeck_core::event::{AppEvent, EventBus};
use tokio::sync::watch;
use uuid::Uuid;

use crate::notifications::{NotificationBus, ToastKind};

/// Appended in place of an assistant reply when the exchange fails.
const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Toast shown when the exchange itself fails.
const SEND_FAILURE_MESSAGE: &str =
    "Failed to send message. Please check your connection and try again.";

/// Observable state of one assistant conversation.
#[derive(Debug, Clone, Default)]
pub struct AssistantState {
    /// Backend-assigned conversation id, set after the first exchange or
    /// a history load.
    pub conversation_id: Option<String>,
    /// The transcript, appended to monotonically between history loads.
    pub messages: Vec<ConversationMessage>,
    /// True while an exchange is in flight; gates double submission.
    pub is_sending: bool,
}

/// Client-side conversation owner for the assistant popup.
pub struct AssistantSession {
    chat: Arc<dyn ChatGateway>,
    classifier: OutcomeClassifier,
    notifications: NotificationBus,
    events: EventBus,
    user_id: String,
    state: watch::Sender<AssistantState>,
}

impl AssistantSession {
    /// Creates a session for an authenticated user with the default
    /// classifier.
    pub fn new(
        chat: Arc<dyn ChatGateway>,
        notifications: NotificationBus,
        events: EventBus,
        user_id: impl Into<String>,
    ) -> Self {
        Self::with_classifier(
            chat,
            OutcomeClassifier::default(),
            notifications,
            events,
            user_id,
        )
    }

    /// Creates a session with a custom classification rule set.
    pub fn with_classifier(
        chat: Arc<dyn ChatGateway>,
        classifier: OutcomeClassifier,
        notifications: NotificationBus,
        events: EventBus,
        user_id: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(AssistantState::default());
        Self {
            chat,
            classifier,
            notifications,
            events,
            user_id: user_id.into(),
            state,
        }
    }

    /// The current state.
    pub fn state(&self) -> AssistantState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AssistantState> {
        self.state.subscribe()
    }

    /// Sends one user utterance.
    ///
    /// The user message is appended immediately (optimistic); the
    /// assistant's reply - or a synthetic apology on failure - follows
    /// when the exchange settles. A successfully classified mutating
    /// outcome publishes the tasks-changed signal so task views refetch.
    pub async fn send_message(&self, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        if !self.begin_send() {
            // An exchange is already in flight; drop the duplicate submit.
            return;
        }

        self.append(provisional_message(MessageRole::User, content));

        match self.chat.send_message(&self.user_id, content).await {
            Ok(reply) => {
                self.append(ConversationMessage {
                    id: provisional_id(),
                    role: MessageRole::Assistant,
                    content: reply.response.clone(),
                    timestamp: reply.timestamp,
                });
                if let Some(conversation_id) = reply.conversation_id {
                    self.state.send_modify(|state| {
                        state.conversation_id.get_or_insert(conversation_id);
                    });
                }
                if let Some(verdict) = self.classifier.classify(&reply.response) {
                    self.report_outcome(&verdict);
                    if verdict.success {
                        self.events.publish(AppEvent::TasksChanged);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Chat exchange failed: {}", e);
                self.append(provisional_message(MessageRole::Assistant, APOLOGY_MESSAGE));
                self.notifications.show(SEND_FAILURE_MESSAGE, ToastKind::Error);
            }
        }

        self.state.send_modify(|state| state.is_sending = false);
    }

    /// Loads the transcript from the history endpoint.
    ///
    /// When the backend answers with a conversation list instead of
    /// messages, the most recent conversation is loaded. Errors are
    /// tolerated: an unreachable history endpoint leaves the transcript
    /// empty rather than blocking the popup.
    pub async fn load_history(&self) {
        match self.chat.history(&self.user_id, None).await {
            Ok(ChatHistory::Conversation {
                conversation_id,
                messages,
            }) if !messages.is_empty() => {
                self.state.send_modify(|state| {
                    state.messages = messages;
                    state.conversation_id = conversation_id;
                });
            }
            Ok(ChatHistory::Conversations(conversations)) => {
                if let Some(latest) = conversations.first() {
                    self.load_conversation(&latest.clone()).await;
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to load conversation history: {}", e);
            }
        }
    }

    /// Loads a specific persisted conversation.
    pub async fn load_conversation(&self, conversation_id: &str) {
        match self.chat.history(&self.user_id, Some(conversation_id)).await {
            Ok(ChatHistory::Conversation {
                conversation_id,
                messages,
            }) => {
                self.state.send_modify(|state| {
                    state.messages = messages;
                    state.conversation_id = conversation_id;
                });
            }
            Ok(ChatHistory::Conversations(_)) => {}
            Err(e) => {
                tracing::warn!("Failed to load conversation: {}", e);
            }
        }
    }

    /// Clears the transcript without touching persisted history.
    pub fn clear(&self) {
        self.state.send_replace(AssistantState::default());
    }

    fn begin_send(&self) -> bool {
        let mut started = false;
        self.state.send_if_modified(|state| {
            if state.is_sending {
                false
            } else {
                state.is_sending = true;
                started = true;
                true
            }
        });
        started
    }

    fn append(&self, message: ConversationMessage) {
        self.state.send_modify(|state| state.messages.push(message));
    }

    fn report_outcome(&self, verdict: &OutcomeClassification) {
        if !verdict.success {
            self.notifications.show(
                "Failed to perform task operation. Please try again.",
                ToastKind::Error,
            );
            return;
        }

        let message = match verdict.outcome {
            TaskOutcome::Created => "Task created successfully",
            TaskOutcome::Deleted => "Task deleted successfully",
            TaskOutcome::Updated => "Task updated successfully",
            TaskOutcome::Completed => "Task marked as complete",
            TaskOutcome::Error => return,
        };
        self.notifications.show(message, ToastKind::Success);
    }
}

fn provisional_id() -> String {
    format!("temp-{}", Uuid::new_v4())
}

fn provisional_message(role: MessageRole, content: &str) -> ConversationMessage {
    ConversationMessage {
        id: provisional_id(),
        role,
        content: content.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use taskdeck_core::TaskdeckError;
    use taskdeck_core::chat::ChatReply;
    use taskdeck_core::error::Result;

    struct MockChatGateway {
        reply: Mutex<Result<ChatReply>>,
        history: Mutex<Option<ChatHistory>>,
        history_requests: Mutex<Vec<Option<String>>>,
    }

    impl MockChatGateway {
        fn replying(response: &str) -> Self {
            Self {
                reply: Mutex::new(Ok(ChatReply {
                    response: response.to_string(),
                    timestamp: "2026-03-01T09:00:01".to_string(),
                    conversation_id: Some("conv-1".to_string()),
                })),
                history: Mutex::new(None),
                history_requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Mutex::new(Err(TaskdeckError::network("connection refused"))),
                history: Mutex::new(None),
                history_requests: Mutex::new(Vec::new()),
            }
        }

        fn with_history(self, history: ChatHistory) -> Self {
            *self.history.lock().unwrap() = Some(history);
            self
        }
    }

    #[async_trait]
    impl ChatGateway for MockChatGateway {
        async fn send_message(&self, _user_id: &str, _message: &str) -> Result<ChatReply> {
            self.reply.lock().unwrap().clone()
        }

        async fn history(
            &self,
            _user_id: &str,
            conversation_id: Option<&str>,
        ) -> Result<ChatHistory> {
            self.history_requests
                .lock()
                .unwrap()
                .push(conversation_id.map(str::to_string));
            match conversation_id {
                // A specific conversation always resolves to messages.
                Some(id) => Ok(ChatHistory::Conversation {
                    conversation_id: Some(id.to_string()),
                    messages: vec![ConversationMessage {
                        id: "m-1".to_string(),
                        role: MessageRole::User,
                        content: "add milk".to_string(),
                        timestamp: "2026-03-01T08:59:00".to_string(),
                    }],
                }),
                None => Ok(self
                    .history
                    .lock()
                    .unwrap()
                    .clone()
                    .unwrap_or(ChatHistory::Conversation {
                        conversation_id: None,
                        messages: Vec::new(),
                    })),
            }
        }
    }

    fn session_over(chat: MockChatGateway) -> (AssistantSession, NotificationBus, EventBus) {
        let notifications = NotificationBus::new();
        let events = EventBus::new();
        let session = AssistantSession::new(
            Arc::new(chat),
            notifications.clone(),
            events.clone(),
            "user-1",
        );
        (session, notifications, events)
    }

    #[tokio::test]
    async fn test_created_reply_toasts_and_publishes_refresh() {
        let (session, notifications, events) =
            session_over(MockChatGateway::replying("Task created successfully for you!"));
        let mut signals = events.subscribe();

        session.send_message("add milk to my list").await;

        let state = session.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, MessageRole::User);
        assert_eq!(state.messages[1].role, MessageRole::Assistant);
        assert_eq!(state.conversation_id.as_deref(), Some("conv-1"));
        assert!(!state.is_sending);

        assert_eq!(
            notifications.current().unwrap().message,
            "Task created successfully"
        );
        assert_eq!(signals.try_recv().unwrap(), AppEvent::TasksChanged);
    }

    #[tokio::test]
    async fn test_error_reply_toasts_failure_without_refresh() {
        let (session, notifications, events) =
            session_over(MockChatGateway::replying("Sorry, I could not find that task"));
        let mut signals = events.subscribe();

        session.send_message("delete the launch task").await;

        assert_eq!(
            notifications.current().unwrap().message,
            "Failed to perform task operation. Please try again."
        );
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unclassified_reply_neither_toasts_nor_refreshes() {
        let (session, notifications, events) =
            session_over(MockChatGateway::replying("You have 3 tasks on your list."));
        let mut signals = events.subscribe();

        session.send_message("what's on my list?").await;

        assert!(notifications.current().is_none());
        assert!(signals.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_exchange_appends_apology_and_toasts() {
        let (session, notifications, _events) = session_over(MockChatGateway::failing());

        session.send_message("add milk").await;

        let state = session.state();
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[1].content, APOLOGY_MESSAGE);
        assert!(state.messages[1].id.starts_with("temp-"));
        assert!(!state.is_sending);
        assert_eq!(
            notifications.current().unwrap().message,
            SEND_FAILURE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_user_message_is_appended_optimistically() {
        let (session, _notifications, _events) =
            session_over(MockChatGateway::replying("Anything"));

        session.send_message("  add milk  ").await;

        let state = session.state();
        // Trimmed content, provisional id, local timestamp.
        assert_eq!(state.messages[0].content, "add milk");
        assert!(state.messages[0].id.starts_with("temp-"));
    }

    #[tokio::test]
    async fn test_blank_message_is_dropped() {
        let (session, _notifications, _events) =
            session_over(MockChatGateway::replying("Anything"));
        session.send_message("   ").await;
        assert!(session.state().messages.is_empty());
    }

    #[tokio::test]
    async fn test_history_picker_falls_back_to_most_recent_conversation() {
        let chat = MockChatGateway::replying("unused").with_history(ChatHistory::Conversations(
            vec!["conv-9".to_string(), "conv-3".to_string()],
        ));
        let (session, _notifications, _events) = session_over(chat);

        session.load_history().await;

        let state = session.state();
        assert_eq!(state.conversation_id.as_deref(), Some("conv-9"));
        assert_eq!(state.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_resets_transcript_only_locally() {
        let (session, _notifications, _events) =
            session_over(MockChatGateway::replying("Task added successfully"));
        session.send_message("add milk").await;
        assert!(!session.state().messages.is_empty());

        session.clear();

        let state = session.state();
        assert!(state.messages.is_empty());
        assert!(state.conversation_id.is_none());
    }
}
