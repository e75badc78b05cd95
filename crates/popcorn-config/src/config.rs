use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::paths::PathManager;

pub const DEFAULT_API_KEY: &str = "5dae1c6";
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OmdbConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Queries shorter than this many characters never hit the network.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if there is one, otherwise fall back to defaults.
    /// The API key environment variable wins over both.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.omdb.api_key = key.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.api_key.trim().is_empty() {
            anyhow::bail!("omdb.api_key must not be empty");
        }
        url::Url::parse(&self.omdb.base_url)
            .map_err(|e| anyhow::anyhow!("omdb.base_url '{}' is not a valid URL: {}", self.omdb.base_url, e))?;
        if self.search.min_query_len == 0 {
            anyhow::bail!("search.min_query_len must be at least 1");
        }
        Ok(())
    }

    /// Where the watched list lives: the configured file, or the default in
    /// the data directory.
    pub fn watched_file(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .watched_file
            .clone()
            .unwrap_or_else(|| paths.watched_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            omdb: OmdbConfig {
                api_key: "abc123".to_string(),
                base_url: "http://localhost:8080/".to_string(),
            },
            search: SearchConfig { min_query_len: 2 },
            storage: StorageConfig {
                watched_file: Some(PathBuf::from("/tmp/watched.json")),
            },
            logging: LoggingConfig::default(),
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[search]\nmin_query_len = 4\n").unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.search.min_query_len, 4);
        assert_eq!(loaded.omdb.api_key, DEFAULT_API_KEY);
        assert_eq!(loaded.omdb.base_url, DEFAULT_BASE_URL);
        assert!(loaded.storage.watched_file.is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.search.min_query_len, DEFAULT_MIN_QUERY_LEN);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.omdb.api_key = "  ".to_string();
        assert!(config.validate().is_err());

        config.omdb.api_key = "key".to_string();
        config.omdb.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.omdb.base_url = DEFAULT_BASE_URL.to_string();
        config.search.min_query_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_watched_file_override() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let mut config = Config::default();
        assert_eq!(config.watched_file(&paths), paths.watched_file());

        config.storage.watched_file = Some(PathBuf::from("/srv/popcorn/list.json"));
        assert_eq!(config.watched_file(&paths), PathBuf::from("/srv/popcorn/list.json"));
    }
}
