//! HTTP implementation of the task repository.
//!
//! Every call attaches the stored bearer token. A response that rejects
//! the credential publishes the global unauthorized signal instead of
//! surfacing a local error - the session store handles the sign-out, the
//! calling view only sees that its request did not complete. Each call is
//! a single attempt; retry policy belongs to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::event::{AppEvent, EventBus};
use taskdeck_core::prefs::PreferenceStore;
use taskdeck_core::task::{Task, TaskDraft, TaskPatch, TaskRepository};

use crate::config::ApiConfig;
use crate::http::{network_error, operation_error};

/// Task CRUD over the backend REST endpoints.
pub struct HttpTaskRepository {
    client: Client,
    config: ApiConfig,
    prefs: Arc<dyn PreferenceStore>,
    events: EventBus,
}

impl HttpTaskRepository {
    /// Creates a new repository client.
    pub fn new(config: ApiConfig, prefs: Arc<dyn PreferenceStore>, events: EventBus) -> Self {
        Self {
            client: Client::new(),
            config,
            prefs,
            events,
        }
    }

    /// Returns the stored credential, treating its absence like a rejected
    /// one: there is no point dispatching a request the backend will 401.
    fn bearer_token(&self) -> Result<String> {
        match self.prefs.access_token() {
            Some(token) => Ok(token),
            None => {
                self.events.publish(AppEvent::Unauthorized);
                Err(TaskdeckError::auth("No stored credential"))
            }
        }
    }

    /// Maps a response's status: credential rejections raise the global
    /// unauthorized signal, other failures become `Operation` errors.
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

    async fn parse_task(&self, response: Response) -> Result<Task> {
        response
            .json()
            .await
            .map_err(|e| network_error("Failed to parse task response", e))
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.config.url("/tasks"))
            .bearer_auth(token)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to fetch tasks", e))?;

        let response = self.checked(response).await?;
        response
            .json()
            .await
            .map_err(|e| network_error("Failed to parse task list", e))
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(self.config.url("/tasks"))
            .bearer_auth(token)
            .json(draft)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to create task", e))?;

        let response = self.checked(response).await?;
        self.parse_task(response).await
    }

    async fn update(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        patch.validate()?;
        let token = self.bearer_token()?;
        let response = self
            .client
            .patch(self.config.url(&format!("/tasks/{}", task_id)))
            .bearer_auth(token)
            .json(patch)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to update task", e))?;

        let response = self.checked(response).await?;
        self.parse_task(response).await
    }

    async fn toggle_completion(&self, task_id: &str) -> Result<Task> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(self.config.url(&format!("/tasks/{}/toggle", task_id)))
            .bearer_auth(token)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to toggle task", e))?;

        let response = self.checked(response).await?;
        self.parse_task(response).await
    }

    async fn delete(&self, task_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .delete(self.config.url(&format!("/tasks/{}", task_id)))
            .bearer_auth(token)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| network_error("Failed to delete task", e))?;

        self.checked(response).await?;
        Ok(())
    }
}
