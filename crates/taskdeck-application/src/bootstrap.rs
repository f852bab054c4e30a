//! Application composition root.
//!
//! Builds the bus, storage, HTTP clients and stores as owned values with
//! an explicit lifecycle: initialize at application start, drop at
//! shutdown. Nothing here is a process-wide singleton, so tests build an
//! isolated `AppServices` per case.

use std::path::PathBuf;
use std::sync::Arc;

use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::event::EventBus;
use taskdeck_core::prefs::PreferenceStore;
use taskdeck_core::theme::ThemeMode;
use taskdeck_infrastructure::{FilePreferenceStore, HostThemeSource};
use taskdeck_interaction::{ApiConfig, AuthApi, ChatApi, HttpTaskRepository};
use tokio::task::JoinHandle;

use crate::assistant::AssistantSession;
use crate::notifications::NotificationBus;
use crate::session_store::SessionStore;
use crate::task_list::TaskListModel;
use crate::theme_store::ThemeStore;

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Explicit preferences file path; `None` uses the platform default.
    pub preferences_path: Option<PathBuf>,
    /// The host's theme preference at startup.
    pub host_theme: ThemeMode,
}

impl AppConfig {
    /// Loads configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            preferences_path: None,
            host_theme: ThemeMode::default(),
        }
    }
}

/// The wired application services.
///
/// Background listeners spawned by [`AppServices::start`] are aborted on
/// drop, so tearing down a test's services never leaks tasks into the
/// next case.
pub struct AppServices {
    pub events: EventBus,
    pub preferences: Arc<dyn PreferenceStore>,
    pub host_theme: HostThemeSource,
    pub notifications: NotificationBus,
    pub auth: Arc<AuthApi>,
    pub tasks: Arc<HttpTaskRepository>,
    pub chat: Arc<ChatApi>,
    pub session: Arc<SessionStore>,
    pub theme: Arc<ThemeStore>,
    listeners: Vec<JoinHandle<()>>,
}

impl AppServices {
    /// Builds the service graph without spawning anything.
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let preferences: Arc<dyn PreferenceStore> = match config.preferences_path {
            Some(path) => Arc::new(FilePreferenceStore::at(path)),
            None => Arc::new(
                FilePreferenceStore::new_default()
                    .map_err(|e| TaskdeckError::io(e.to_string()))?,
            ),
        };

        let events = EventBus::new();
        let host_theme = HostThemeSource::new(config.host_theme);
        let notifications = NotificationBus::new();

        let auth = Arc::new(AuthApi::new(config.api.clone(), preferences.clone()));
        let tasks = Arc::new(HttpTaskRepository::new(
            config.api.clone(),
            preferences.clone(),
            events.clone(),
        ));
        let chat = Arc::new(ChatApi::new(
            config.api,
            preferences.clone(),
            events.clone(),
        ));

        let session = Arc::new(SessionStore::new(preferences.clone(), auth.clone()));
        let theme = Arc::new(ThemeStore::new(preferences.clone(), &host_theme));

        Ok(Self {
            events,
            preferences,
            host_theme,
            notifications,
            auth,
            tasks,
            chat,
            session,
            theme,
            listeners: Vec::new(),
        })
    }

    /// Spawns the cross-component listeners and resolves the persisted
    /// session. Call once from within the runtime, after `initialize`.
    pub fn start(&mut self) {
        self.listeners.push(
            Arc::clone(&self.session).spawn_unauthorized_listener(&self.events),
        );
        self.listeners
            .push(Arc::clone(&self.theme).spawn_host_follower(&self.host_theme));
        self.session.check_status();
    }

    /// Creates a task list view-model wired to this service graph.
    ///
    /// The returned listener handle is the view's to abort on teardown.
    pub fn task_list(&self) -> (Arc<TaskListModel>, JoinHandle<()>) {
        let model = Arc::new(TaskListModel::new(
            self.tasks.clone(),
            self.notifications.clone(),
        ));
        let listener = Arc::clone(&model).spawn_refresh_listener(&self.events);
        (model, listener)
    }

    /// Creates an assistant session for the signed-in user, or `None`
    /// when no user is signed in.
    pub fn assistant(&self) -> Option<AssistantSession> {
        let user_id = self.session.snapshot().user_id()?.to_string();
        Some(AssistantSession::new(
            self.chat.clone(),
            self.notifications.clone(),
            self.events.clone(),
            user_id,
        ))
    }
}

impl Drop for AppServices {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}
