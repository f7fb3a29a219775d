//! Centralized path resolution for postctl
//!
//! # Environment Variables
//!
//! - `POSTCTL_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/postctl`)
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `POSTCTL_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/postctl` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\postctl`
//!    - macOS/Linux: `~/.config/postctl`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "POSTCTL_CONFIG_DIR";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Get the postctl config directory path
pub fn config_dir() -> Result<PathBuf> {
    let env_override = std::env::var(ENV_CONFIG_DIR).ok();
    let xdg_config = std::env::var("XDG_CONFIG_HOME").ok();
    resolve_config_dir(
        env_override.as_deref(),
        xdg_config.as_deref(),
        platform_config_dir().as_deref(),
    )
}

/// Get the path of the config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Resolve the config directory from already-read inputs.
///
/// `platform_default` is the directory postctl would use with no overrides;
/// `None` means the home directory could not be determined.
fn resolve_config_dir(
    env_override: Option<&str>,
    xdg_config: Option<&str>,
    platform_default: Option<&Path>,
) -> Result<PathBuf> {
    // 1. Environment variable override
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        let path = expand(dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    // 2. XDG_CONFIG_HOME
    if let Some(xdg) = xdg_config.filter(|d| !d.is_empty()) {
        let path = PathBuf::from(xdg).join("postctl");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Platform default
    let path = platform_default
        .map(Path::to_path_buf)
        .context("Could not determine home directory")?;
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

#[cfg(windows)]
fn platform_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("postctl"))
}

#[cfg(not(windows))]
fn platform_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("postctl"))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_dir() -> PathBuf {
        PathBuf::from("/home/user/.config/postctl")
    }

    #[test]
    fn test_config_dir_env_override() {
        let result = resolve_config_dir(
            Some("/custom/config/path"),
            Some("/xdg"),
            Some(&default_dir()),
        )
        .unwrap();
        assert_eq!(result, PathBuf::from("/custom/config/path"));
    }

    #[test]
    fn test_config_dir_env_override_with_tilde() {
        let home = dirs::home_dir().unwrap();
        let result = resolve_config_dir(Some("~/dotfiles/postctl"), None, None).unwrap();
        assert_eq!(result, home.join("dotfiles").join("postctl"));
    }

    #[test]
    fn test_config_dir_xdg() {
        let result = resolve_config_dir(None, Some("/tmp/xdg-config"), Some(&default_dir())).unwrap();
        assert_eq!(result, PathBuf::from("/tmp/xdg-config/postctl"));
    }

    #[test]
    fn test_config_dir_empty_values_ignored() {
        let result = resolve_config_dir(Some(""), Some(""), Some(&default_dir())).unwrap();
        assert_eq!(result, default_dir());
    }

    #[test]
    fn test_config_dir_platform_default() {
        let result = resolve_config_dir(None, None, Some(&default_dir())).unwrap();
        assert_eq!(result, default_dir());
    }

    #[test]
    fn test_config_dir_no_home() {
        assert!(resolve_config_dir(None, None, None).is_err());
    }

    #[test]
    fn test_expand_with_tilde() {
        let result = expand("~/test/path");
        let home = dirs::home_dir().unwrap();
        assert_eq!(result, home.join("test").join("path"));
    }

    #[test]
    fn test_expand_absolute() {
        let result = expand("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        // Unknown env vars are left as-is by shellexpand::full
        let result = expand("/path/$NONEXISTENT_VAR_12345/file");
        assert_eq!(result, PathBuf::from("/path/$NONEXISTENT_VAR_12345/file"));
    }

    #[test]
    fn test_env_var_constants() {
        assert_eq!(ENV_CONFIG_DIR, "POSTCTL_CONFIG_DIR");
        assert_eq!(CONFIG_FILE, "config.toml");
    }
}
