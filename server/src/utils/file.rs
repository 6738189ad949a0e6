//! File utility functions

use std::path::PathBuf;

/// Expand a path string to an absolute path.
///
/// `~` and `~/...` resolve against the home directory, relative paths
/// against the current directory. Absolute paths pass through. Nothing is
/// canonicalized, so the path does not have to exist.
///
/// ```text
/// expand_path("~/.petcare")  // -> /home/user/.petcare
/// expand_path("./data")      // -> /current/dir/./data
/// expand_path("/etc/petcare") // -> /etc/petcare
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
