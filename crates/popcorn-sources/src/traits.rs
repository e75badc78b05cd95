use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResult};
use crate::error::SourceError;

/// A movie database that can be searched and queried by id.
///
/// Implementations hold no per-request state; cancelling a call is done by
/// dropping its future.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, SourceError>;
}
