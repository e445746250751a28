use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "folio").map(|pd| pd.config_dir().join("config.json"))
    }

    /// Log files live with other local state so they never touch the TUI's stdout.
    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("folio"),
            )
        } else {
            ProjectDirs::from("", "", "folio").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
