pub mod host_theme;
pub mod paths;
pub mod preferences;
pub mod storage;

pub use host_theme::HostThemeSource;
pub use paths::TaskdeckPaths;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore};
