//! Configuration file location.

use std::path::PathBuf;

use super::error::PathError;

/// Settings file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "~/.gettorrc";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> Result<PathBuf, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::EmptyPath);
    }

    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
            Ok(home.join(rest.trim_start_matches('/')))
        }
        _ => Ok(PathBuf::from(path)),
    }
}

/// Resolve the settings file path, falling back to [`DEFAULT_CONFIG_PATH`].
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    expand_tilde(explicit.unwrap_or(DEFAULT_CONFIG_PATH))
}
