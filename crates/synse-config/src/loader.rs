//! Config file discovery and parsing.
//!
//! # Design
//! - An explicitly requested file must exist; the default file is optional.
//! - An empty file is equivalent to an absent one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::CliConfig;

/// File name of the default configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".synse.yml";

/// Location of the default configuration file (`$HOME/.synse.yml`).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDir`] when the home directory is unknown.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Load the CLI configuration.
///
/// With `Some(path)` the file must exist and parse. With `None` the default
/// file is read if present, and defaults are returned otherwise.
///
/// # Errors
///
/// Returns an error when a required file is missing or any file fails to parse.
pub fn load(path: Option<&Path>) -> ConfigResult<CliConfig> {
    match path {
        Some(path) => read_config(path, true),
        None => match default_config_path() {
            Ok(path) => read_config(&path, false),
            Err(_) => {
                debug!("no home directory; using default configuration");
                Ok(CliConfig::default())
            }
        },
    }
}

fn read_config(path: &Path, required: bool) -> ConfigResult<CliConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "config file absent; using defaults");
            return Ok(CliConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(CliConfig::default());
    }

    let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostConfig, OutputFormat};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_parses_hosts_and_format() {
        let file = write_config(
            "debug: true\nformat: yaml\nactive_host:\n  name: local\n  address: localhost:5000\nhosts:\n  - name: local\n    address: localhost:5000\n  - name: lab\n    address: 10.1.1.10:5000\n",
        );

        let config = load(Some(file.path())).expect("config should load");
        assert!(config.debug);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert_eq!(
            config.active_host,
            Some(HostConfig::new("local", "localhost:5000"))
        );
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.hosts[1].name, "lab");
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let file = write_config("hosts: []\n");
        let config = load(Some(file.path())).expect("config should load");
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn load_treats_empty_file_as_defaults() {
        let file = write_config("\n");
        let config = load(Some(file.path())).expect("config should load");
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.yml");
        let err = load(Some(&path)).expect_err("missing explicit file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn optional_missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = read_config(&path, false).expect("absent default file");
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let file = write_config("format: [not, a, format\n");
        let err = load(Some(file.path())).expect_err("invalid yaml");
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_format_value_is_rejected() {
        let file = write_config("format: table\n");
        assert!(matches!(
            load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
