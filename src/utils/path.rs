//! Path utilities: expand `~` and pick the config file location.

use crate::config::Config;
use crate::errors::AppResult;
use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `--config` when given, otherwise the platform default.
pub fn resolve_config_path(custom: Option<PathBuf>) -> AppResult<PathBuf> {
    match custom {
        Some(path) => Ok(path),
        None => Config::config_file(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/tmp/hours.yaml"), PathBuf::from("/tmp/hours.yaml"));
        assert_eq!(expand_tilde("rel/cfg.yaml"), PathBuf::from("rel/cfg.yaml"));
    }

    #[test]
    fn expands_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/cfg.yaml"), home.join("cfg.yaml"));
        }
    }

    #[test]
    fn custom_path_wins() {
        let p = PathBuf::from("/tmp/custom.yaml");
        assert_eq!(resolve_config_path(Some(p.clone())).unwrap(), p);
    }
}
