//! Configuration management for Atomitter

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, Result};

pub const DEFAULT_FORMAT: &str = "Read my post \"{{ .Title }}\": {{ .Link }}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
    pub feed_url: String,
    pub username: String,
    /// Post template, e.g. `Read my post "{{ .Title }}": {{ .Link }}`
    pub format: String,
    pub api_url: String,
    /// How many recent posts to compare feed items against
    pub timeline_count: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            consumer_key: "CONSUMER_KEY".to_string(),
            consumer_secret: "CONSUMER_SECRET".to_string(),
            token: "TOKEN".to_string(),
            token_secret: "TOKEN_SECRET".to_string(),
            feed_url: "https://example.com/feed.atom".to_string(),
            username: "USERNAME".to_string(),
            format: DEFAULT_FORMAT.to_string(),
            api_url: "https://api.twitter.com/1.1".to_string(),
            timeline_count: 20,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if needed
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::bootstrap(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// Keys missing from the file take their default values.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Seed, read and rewrite the config file at `path`
    ///
    /// A missing file (and its directory) is created with default values.
    /// The file is then read and written back so keys added since it was
    /// created show up with their defaults.
    pub fn bootstrap(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
            }
        }

        if !path.exists() {
            debug!(path = %path.display(), "Writing default configuration");
            Self::default().save(path)?;
        }

        let config = Self::load_from_path(path)?;
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration to `path` as TOML
    ///
    /// The file holds the OAuth secrets, so on Unix it is made owner-only.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(ConfigError::Write)?;
        }

        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory conventions
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("ATOMITTER_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingDirectory("user config directory".to_string()))?;

    Ok(config_dir.join("atomitter").join("config.toml"))
}
