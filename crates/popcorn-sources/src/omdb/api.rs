use popcorn_models::{MovieDetail, SearchResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use crate::error::SourceError;

/// Fields every OMDb response carries alongside its payload.
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl OmdbEnvelope {
    fn is_negative(&self) -> bool {
        self.response
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<SearchResult>,
}

pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let response = client
        .get(base_url)
        .query(&[("s", query), ("apikey", api_key)])
        .send()
        .await?;

    let parsed: OmdbSearchResponse = read_response(response).await?;
    debug!("OMDb search '{}' returned {} results", query, parsed.search.len());
    Ok(parsed.search)
}

pub async fn movie_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, SourceError> {
    let response = client
        .get(base_url)
        .query(&[("i", id), ("apikey", api_key)])
        .send()
        .await?;

    let detail: MovieDetail = read_response(response).await?;
    debug!("OMDb detail for {} is '{}'", id, detail.title);
    Ok(detail)
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SourceError> {
    let status = response.status();
    let body = response.text().await?;
    decode_body(status.as_u16(), &body)
}

/// Turn a raw OMDb reply into its payload.
///
/// OMDb signals "nothing found" and bad keys in the body with
/// `"Response": "False"`, sometimes with a 200 and sometimes with a 401, so
/// the envelope is checked before the status.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, SourceError> {
    if let Ok(envelope) = serde_json::from_str::<OmdbEnvelope>(body) {
        if envelope.is_negative() {
            let message = envelope
                .error
                .unwrap_or_else(|| "No Results Found".to_string());
            return Err(SourceError::NotFound(message));
        }
    }

    if !(200..300).contains(&status) {
        return Err(SourceError::Status { status });
    }

    Ok(serde_json::from_str(body)?)
}
