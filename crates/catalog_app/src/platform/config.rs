//! RON configuration for the catalog binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON array of catalog documents.
    pub catalog_path: PathBuf,
    /// Directory holding the download ledger.
    pub data_dir: PathBuf,
    /// Path the query string is appended to when showing the address.
    pub base_path: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    /// Top edge of the main content region, in pixels.
    pub content_top: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            data_dir: PathBuf::from("data"),
            base_path: "/".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("catalog.log"),
            content_top: 560,
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(
            &path,
            r#"(catalog_path: "mods.json", log_destination: both, content_top: 96)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("mods.json"));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.content_top, 96);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.base_path, "/");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(content_top: \"tall\"").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
