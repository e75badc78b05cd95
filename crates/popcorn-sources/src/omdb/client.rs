use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetail, SearchResult};
use reqwest::Client;
use tracing::info;
use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;

const USER_AGENT: &str = concat!("popcorn/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Result<Self, SourceError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        info!("Using OMDb at {}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, SourceError> {
        api::movie_detail(&self.client, &self.base_url, &self.api_key, id).await
    }
}
