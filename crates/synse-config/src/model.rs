//! Typed configuration model for the CLI.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Output modes supported by the formatter engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-aligned text with a header row.
    #[default]
    Pretty,
    /// A single JSON array.
    Json,
    /// A YAML sequence.
    Yaml,
}

impl OutputFormat {
    /// Lowercase identifier used on the command line and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(ConfigError::InvalidFormat {
                value: value.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// A Synse Server instance the CLI can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Name used to select the host with `--host`.
    pub name: String,
    /// `host:port` the server listens on.
    pub address: String,
}

impl HostConfig {
    /// Build a host entry.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Contents of the CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Enables debug-level logging.
    pub debug: bool,
    /// Output mode used when `--format` is not given.
    pub format: OutputFormat,
    /// Host requests are sent to.
    pub active_host: Option<HostConfig>,
    /// Known hosts, in the order they were configured.
    pub hosts: Vec<HostConfig>,
}

impl CliConfig {
    /// Make the configured host called `name` the active host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownHost`] when no host has that name.
    pub fn select_host(&mut self, name: &str) -> ConfigResult<&HostConfig> {
        let host = self
            .hosts
            .iter()
            .find(|host| host.name == name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownHost {
                name: name.to_string(),
            })?;
        Ok(&*self.active_host.insert(host))
    }

    /// Whether `host` is the currently active host.
    #[must_use]
    pub fn is_active(&self, host: &HostConfig) -> bool {
        self.active_host.as_ref() == Some(host)
    }
}
