//! Path utilities for the Zellij sandbox environment.
//!
//! The host filesystem is mounted under `/host`. Paths coming from user
//! configuration are written as on the host and need translating.

use std::path::PathBuf;

/// Returns the data directory for zearch storage.
///
/// Located at `/host/.local/share/zellij/zearch` in the sandbox. `/host`
/// points to the cwd of the last focused terminal, or the folder Zellij was
/// started in, which is usually the home directory. The persisted location
/// lives in `location.json` inside this directory.
///
/// # Examples
///
/// ```
/// use zearch::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zearch")
}

/// Expands tilde paths to the `/host` prefix.
///
/// # Examples
///
/// ```
/// use zearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("zearch"));
    }

    #[test]
    fn only_leading_tilde_expands() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde("~user"), "~user");
    }
}
