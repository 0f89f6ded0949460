//! Path utilities: expand `~` in user supplied paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Expand `~` and return the path as a string, as stored in the config.
pub fn resolve_db_path(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
