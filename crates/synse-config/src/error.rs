//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file was not valid YAML for the expected model.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
    /// A host name was requested that is not in the configured host list.
    #[error("host '{name}' is not configured")]
    UnknownHost {
        /// Requested host name.
        name: String,
    },
    /// An output format outside `pretty|json|yaml` was requested.
    #[error("invalid output format '{value}' (expected one of: pretty, json, yaml)")]
    InvalidFormat {
        /// Rejected value.
        value: String,
    },
    /// The home directory could not be resolved for the default config path.
    #[error("unable to resolve the home directory for the default config file")]
    NoHomeDir,
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
