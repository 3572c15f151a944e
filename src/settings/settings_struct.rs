use std::path::Path;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Settings structure to hold server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Server
    pub listen_address: String,
    pub listen_port: u16,

    // Limits
    /// Largest accepted request body, also the largest accepted `input`
    pub max_body_bytes: usize,
    /// Largest number of links accepted in one request
    pub max_tokens: usize,
}

// Default value functions for serde
pub fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

pub fn default_listen_port() -> u16 {
    7625
}

pub fn default_max_body_bytes() -> usize {
    200 * 1024 // 200KB
}

pub fn default_max_tokens() -> usize {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_body_bytes: default_max_body_bytes(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML or YAML content.
    ///
    /// `format` is a file extension hint (`toml`, `yaml`, `yml`); without a
    /// recognised hint TOML is tried first, then YAML.
    pub fn from_content(content: &str, format: Option<&str>) -> Result<Self, SettingsError> {
        match format {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(content)?),
            _ => match toml::from_str(content) {
                Ok(settings) => Ok(settings),
                Err(_) => Ok(serde_yaml::from_str(content)?),
            },
        }
    }

    /// Load settings from a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let format = path.extension().and_then(|ext| ext.to_str());
        let settings = Self::from_content(&content, format)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply a listen-port override; blank or unparsable values are ignored.
    pub fn apply_port_override(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        match value.parse::<u16>() {
            Ok(port) => self.listen_port = port,
            Err(_) => warn!("Ignoring invalid {} value: {}", PORT_ENV, value),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        let value = std::env::var(PORT_ENV).ok();
        self.apply_port_override(value.as_deref());
    }

    /// The `address:port` the server binds to.
    pub fn listen_addr(&self) -> String {
        let address = self.listen_address.trim();
        if address.is_empty() {
            warn!("Empty listen_address in settings, defaulting to 127.0.0.1");
            format!("127.0.0.1:{}", self.listen_port)
        } else if has_port(address) {
            address.to_string()
        } else {
            format!("{}:{}", address, self.listen_port)
        }
    }
}

/// `host:port` or `[v6]:port`
fn has_port(address: &str) -> bool {
    if address.starts_with('[') {
        address.contains("]:")
    } else {
        address.contains(':')
    }
}
