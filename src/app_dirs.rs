use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `<platform config dir>/mathdrill/config.json`, when a home directory
    /// can be found.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mathdrill")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
