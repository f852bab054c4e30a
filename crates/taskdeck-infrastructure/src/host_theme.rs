//! Host-reported color scheme preference.
//!
//! The host (desktop shell, terminal wrapper, test) pushes its preference
//! into an injected source, and the theme store subscribes to a watch
//! channel. No global event target is involved, so every test gets its
//! own isolated source.

use taskdeck_core::theme::ThemeMode;
use tokio::sync::watch;

/// The host platform's current theme preference.
///
/// Cloning shares the underlying channel, so the embedding shell can keep
/// one clone for pushing updates while stores hold another for reading.
#[derive(Debug, Clone)]
pub struct HostThemeSource {
    sender: watch::Sender<ThemeMode>,
}

impl HostThemeSource {
    /// Creates a source with the host's initial preference.
    pub fn new(initial: ThemeMode) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// The host's current preference.
    pub fn current(&self) -> ThemeMode {
        *self.sender.borrow()
    }

    /// Called by the embedding shell when the platform preference changes.
    pub fn set(&self, mode: ThemeMode) {
        self.sender.send_replace(mode);
    }

    /// Subscribes to preference changes.
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.sender.subscribe()
    }
}

impl Default for HostThemeSource {
    fn default() -> Self {
        Self::new(ThemeMode::Light)
    }
}
