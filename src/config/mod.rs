use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://prowand.pro-unlimited.com";
const CONFIG_DIR_NAME: &str = "magnit-vms-cli";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub json_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_engagement_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_engagement_id: None,
            timezone: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Platform config directory, e.g. `~/.config/magnit-vms-cli` on Linux
    pub fn config_dir() -> AppResult<PathBuf> {
        dirs::config_dir()
            .map(|base| base.join(CONFIG_DIR_NAME))
            .ok_or_else(|| AppError::Config("cannot resolve user config dir".into()))
    }

    /// Return the full path of the config file
    pub fn config_file() -> AppResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from `path`, or return defaults if the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut cfg: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("parse {}: {}", path.display(), e)))?
        };

        if cfg.base_url.trim().is_empty() {
            cfg.base_url = default_base_url();
        }
        Ok(cfg)
    }

    /// Write the configuration, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let mut cfg = self.clone();
        if cfg.base_url.trim().is_empty() {
            cfg.base_url = default_base_url();
        }

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&cfg)?;
        fs::write(path, yaml)?;
        restrict_permissions(path)?;
        Ok(())
    }

    /// Parsed timezone, `None` when unset (callers fall back to local time).
    pub fn resolve_timezone(&self) -> AppResult<Option<Tz>> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => parse_timezone(name).map(Some),
        }
    }
}

pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn round_trips_through_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let cfg = Config {
            default_engagement_id: Some(12345678),
            timezone: Some("America/Los_Angeles".into()),
            output: OutputConfig { json_default: true },
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: \"\"\ntimezone: UTC\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.resolve_timezone().unwrap(), Some(chrono_tz::UTC));
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_engagement_id: [not a number").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn timezone_validation() {
        assert!(parse_timezone("Europe/Rome").is_ok());
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(AppError::InvalidTimezone(_))
        ));
        assert_eq!(Config::default().resolve_timezone().unwrap(), None);
    }
}
