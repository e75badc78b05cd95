pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod show;
pub mod watched;

use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{Browser, BrowserOptions, WatchedStore};
use popcorn_sources::OmdbClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Paths and configuration resolved once per invocation.
pub struct AppContext {
    pub paths: PathManager,
    pub config_path: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let paths = PathManager::default();
        let config_path = config_override.unwrap_or_else(|| paths.config_file());
        let config = Config::load_or_default(&config_path)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        Ok(Self { paths, config_path, config })
    }

    pub fn watched_store(&self) -> WatchedStore {
        WatchedStore::new(self.config.watched_file(&self.paths))
    }

    /// Build the coordinator over OMDb with the saved watched list loaded.
    pub fn browser(&self) -> Result<Browser> {
        let client = OmdbClient::new(&self.config.omdb)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create OMDb client: {}", e))?;
        Ok(Browser::new(
            Arc::new(client),
            self.watched_store(),
            BrowserOptions::from_config(&self.config),
        ))
    }
}
