//! Task repository trait.
//!
//! Defines the interface for task CRUD operations against the backend.

use super::model::{Task, TaskDraft, TaskPatch};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for task CRUD operations.
///
/// This trait defines the contract the task views depend on, decoupling
/// them from the specific transport (HTTP client in production, in-memory
/// fakes in tests).
///
/// # Implementation Notes
///
/// Implementations should:
/// - Attach the current session credential to every call
/// - Raise the global unauthorized signal on a rejected credential instead
///   of returning a local error the caller would have to interpret
/// - Keep `Network` and `Operation` errors distinguishable so callers can
///   choose retry messaging vs fix-input messaging
/// - Make a single attempt per call; retry policy belongs to the caller
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists all tasks owned by the current user.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Task>)`: Full task snapshot
    /// - `Err(_)`: Error occurred during retrieval
    async fn list(&self) -> Result<Vec<Task>>;

    /// Creates a new task.
    ///
    /// # Arguments
    ///
    /// * `draft` - The validated task draft
    ///
    /// # Returns
    ///
    /// - `Ok(Task)`: The created task as stored by the backend
    /// - `Err(_)`: Error occurred during creation
    async fn create(&self, draft: &TaskDraft) -> Result<Task>;

    /// Applies a partial update to an existing task.
    ///
    /// # Arguments
    ///
    /// * `task_id` - The ID of the task to update
    /// * `patch` - The fields to change
    ///
    /// # Returns
    ///
    /// - `Ok(Task)`: The updated task
    /// - `Err(_)`: Error occurred during update
    async fn update(&self, task_id: &str, patch: &TaskPatch) -> Result<Task>;

    /// Flips a task's completion flag.
    ///
    /// # Returns
    ///
    /// - `Ok(Task)`: The task with its completion flag toggled
    /// - `Err(_)`: Error occurred during toggle
    async fn toggle_completion(&self, task_id: &str) -> Result<Task>;

    /// Deletes a task.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Task deleted
    /// - `Err(_)`: Error occurred during deletion
    async fn delete(&self, task_id: &str) -> Result<()>;
}
