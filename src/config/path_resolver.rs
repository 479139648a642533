//! Config file location
//!
//! `--config` arguments get shell-style `~` expansion and are anchored to the
//! working directory. The default file lives in the platform config dir.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Expand `~`/`~/...` and make the path absolute
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(path).into_owned());
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(expanded))
}

/// `config.toml` inside the platform config dir
/// (`$XDG_CONFIG_HOME/query-expander` on Linux); `None` without a home dir.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "query-expander").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilde_is_expanded() {
        let result = resolve_path("~/expander.toml").unwrap();
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with("expander.toml"));
    }

    #[test]
    fn test_absolute_path_untouched() {
        let result = resolve_path("/etc/query-expander.toml").unwrap();
        assert_eq!(result, PathBuf::from("/etc/query-expander.toml"));
    }

    #[test]
    fn test_relative_path_anchored_to_cwd() {
        let result = resolve_path("config.toml").unwrap();
        assert!(result.is_absolute());
        assert_eq!(result, std::env::current_dir().unwrap().join("config.toml"));
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains("query-expander"));
        }
    }
}
