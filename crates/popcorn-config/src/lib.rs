pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, SearchConfig, StorageConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_MIN_QUERY_LEN};
pub use paths::{PathManager, container_base_path};
