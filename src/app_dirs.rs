use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Practice log under $HOME/.local/state/taja, with a platform fallback.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("taja");
            Some(state_dir.join("practice_log.csv"))
        } else {
            ProjectDirs::from("", "", "taja")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("practice_log.csv"))
        }
    }
}
