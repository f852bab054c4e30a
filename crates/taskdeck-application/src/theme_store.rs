//! Theme store.
//!
//! Resolves the active theme as: persisted preference if present, else the
//! host's preference. The store follows live host changes only while no
//! explicit preference has been persisted; once the user picks a theme,
//! host changes no longer override it.

use std::sync::Arc;

use taskdeck_core::prefs::PreferenceStore;
use taskdeck_core::theme::ThemeMode;
use taskdeck_infrastructure::HostThemeSource;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner of the active theme mode.
pub struct ThemeStore {
    state: watch::Sender<ThemeMode>,
    prefs: Arc<dyn PreferenceStore>,
}

impl ThemeStore {
    /// Creates a store with the initial theme resolved from the persisted
    /// preference, falling back to the host preference.
    pub fn new(prefs: Arc<dyn PreferenceStore>, host: &HostThemeSource) -> Self {
        let initial = prefs
            .theme()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| host.current());
        let (state, _) = watch::channel(initial);
        Self { state, prefs }
    }

    /// The currently applied theme.
    pub fn current(&self) -> ThemeMode {
        *self.state.borrow()
    }

    /// Subscribes to theme changes.
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.state.subscribe()
    }

    /// Persists and applies an explicit preference.
    ///
    /// From this point on the host preference is ignored.
    pub fn set_theme(&self, mode: ThemeMode) {
        if let Err(e) = self.prefs.set_theme(&mode.to_string()) {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }
        self.state.send_replace(mode);
    }

    /// Flips between the two binary modes, persisting the result.
    pub fn toggle_theme(&self) {
        self.set_theme(self.current().toggled());
    }

    /// Spawns the host-preference follower.
    ///
    /// Applies host changes without persisting them; persisting would turn
    /// the first host change into an explicit preference and stop the
    /// following behavior. The task ends when the host source is dropped.
    pub fn spawn_host_follower(self: Arc<Self>, host: &HostThemeSource) -> JoinHandle<()> {
        let store = self;
        let mut host_changes = host.subscribe();
        tokio::spawn(async move {
            while host_changes.changed().await.is_ok() {
                let mode = *host_changes.borrow_and_update();
                if store.prefs.theme().is_none() {
                    store.state.send_replace(mode);
                }
            }
        })
    }
}
