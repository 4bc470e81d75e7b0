use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lens_client::{AtomicFileWriter, ClientSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub value: String,
}

/// Settings read from `lens.ron`. Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub server_url: String,
    pub report_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_report_bytes: u64,
    pub drop_zone: bool,
    pub log_destination: LogDestination,
    /// Extra form fields sent with every upload.
    pub form_fields: Vec<ConfigField>,
}

impl Default for LensConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.server_url,
            report_dir: PathBuf::from("reports"),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            max_report_bytes: client.max_report_bytes,
            drop_zone: true,
            log_destination: LogDestination::default(),
            form_fields: Vec::new(),
        }
    }
}

impl LensConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            server_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_report_bytes: self.max_report_bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Loads the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<LensConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LensConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_config(path: &Path, config: &LensConfig) -> anyhow::Result<PathBuf> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(config, pretty)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("config path {path:?} has no file name"))?;

    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(&filename, content.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::{load_config, write_config, ConfigError, ConfigField, LensConfig};
    use crate::platform::logging::LogDestination;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("lens.ron")).unwrap();
        assert_eq!(config, LensConfig::default());
        assert_eq!(config.client_settings().request_timeout, None);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lens.ron");
        std::fs::write(
            &path,
            r#"(server_url: "http://analysis.local:8080", request_timeout_secs: Some(600), log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server_url, "http://analysis.local:8080");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert!(config.drop_zone);
        assert_eq!(
            config.client_settings().request_timeout,
            Some(Duration::from_secs(600))
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lens.ron");
        std::fs::write(&path, "(server_url: ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn written_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("lens.ron");
        let config = LensConfig {
            drop_zone: false,
            form_fields: vec![ConfigField {
                name: "matter".to_string(),
                value: "2024-17".to_string(),
            }],
            ..LensConfig::default()
        };

        write_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }
}
