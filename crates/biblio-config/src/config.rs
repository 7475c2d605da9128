use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use biblio_types::DEFAULT_DATE_FORMAT;

use crate::paths::get_config_path;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            json: false,
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_path())
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.display.date_format, "%d-%m-%Y %H:%M");
        assert!(!config.display.json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\njson = true").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(config.display.json);
        assert_eq!(config.display.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            r#"
            [display]
            date_format = "%Y-%m-%d"
            json = false

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.date_format, "%Y-%m-%d");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display\njson = ").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_load_uses_home_config_path() {
        let home = tempfile::tempdir().unwrap();
        std::env::set_var("HOME", home.path());
        let dir = home.path().join(".config").join("biblio");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[log]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load().unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(!config.display.json);
    }
}
