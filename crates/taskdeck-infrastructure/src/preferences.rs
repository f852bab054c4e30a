//! Preference storage implementations.
//!
//! The production store keeps the bearer token and theme preference in a
//! single TOML file under the platform config directory. The in-memory
//! store exists for tests and embedders that manage persistence
//! themselves.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use taskdeck_core::error::Result;
use taskdeck_core::prefs::PreferenceStore;

use crate::paths::{PathError, TaskdeckPaths};
use crate::storage::TomlFile;

/// On-disk shape of the preferences file. Field names are the stable
/// well-known keys; adding a key later must not invalidate existing files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// File-backed preference store.
///
/// Reads tolerate a missing or corrupt file by reporting absent values; a
/// corrupt preferences file degrades the client to "signed out, default
/// theme" rather than failing startup.
pub struct FilePreferenceStore {
    file: TomlFile<Preferences>,
}

impl FilePreferenceStore {
    /// Creates a store at the platform default location.
    pub fn new_default() -> std::result::Result<Self, PathError> {
        Ok(Self::at(TaskdeckPaths::preferences_file()?))
    }

    /// Creates a store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: TomlFile::new(path),
        }
    }

    fn read(&self) -> Preferences {
        match self.file.load() {
            Ok(prefs) => prefs.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "Unreadable preferences file at {}: {}",
                    self.file.path().display(),
                    e
                );
                Preferences::default()
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.file.update(self.read(), |prefs| {
            prefs.access_token = Some(token.to_string());
        })
    }

    fn clear_access_token(&self) -> Result<()> {
        self.file.update(self.read(), |prefs| {
            prefs.access_token = None;
        })
    }

    fn theme(&self) -> Option<String> {
        self.read().theme
    }

    fn set_theme(&self, theme: &str) -> Result<()> {
        self.file.update(self.read(), |prefs| {
            prefs.theme = Some(theme.to_string());
        })
    }
}

/// In-memory preference store for tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    prefs: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a bearer token.
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        store.prefs.lock().unwrap().access_token = Some(token.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn access_token(&self) -> Option<String> {
        self.prefs.lock().unwrap().access_token.clone()
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.prefs.lock().unwrap().access_token = Some(token.to_string());
        Ok(())
    }

    fn clear_access_token(&self) -> Result<()> {
        self.prefs.lock().unwrap().access_token = None;
        Ok(())
    }

    fn theme(&self) -> Option<String> {
        self.prefs.lock().unwrap().theme.clone()
    }

    fn set_theme(&self, theme: &str) -> Result<()> {
        self.prefs.lock().unwrap().theme = Some(theme.to_string());
        Ok(())
    }
}
