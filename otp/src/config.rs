use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const SECRET_ENV: &str = "TOTP_GEN_SECRET";

const APP_DIR: &str = "totp-gen";
const CONFIG_FILE: &str = "config.toml";

/// Settings handed to the generator by the CLI.
///
/// `secret` is either a base32 string or an `otpauth://` URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub secret: Option<String>,
    pub debug: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/totp-gen/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads `explicit` if given, otherwise the default file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Layers the environment variable and then `cli_secret` on top.
    pub fn with_overrides(mut self, env_secret: Option<String>, cli_secret: Option<String>) -> Self {
        if let Some(secret) = env_secret.filter(|s| !s.is_empty()) {
            self.secret = Some(secret);
        }
        if let Some(secret) = cli_secret {
            self.secret = Some(secret);
        }
        self
    }

    pub fn require_secret(&self) -> Result<&str, ConfigError> {
        self.secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)
    }
}
