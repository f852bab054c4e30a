//! Unified path management for taskdeck's persisted state.
//!
//! The preferences file lives in the platform config directory
//! (`~/.config/taskdeck/preferences.toml` on Linux). Tests and embedders
//! can point storage elsewhere via [`FilePreferenceStore::at`], so nothing
//! below is consulted when an explicit path is supplied.
//!
//! [`FilePreferenceStore::at`]: crate::preferences::FilePreferenceStore::at

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for taskdeck.
pub struct TaskdeckPaths;

impl TaskdeckPaths {
    /// Returns the taskdeck configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/taskdeck/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("taskdeck"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the preferences file.
    pub fn preferences_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }
}
