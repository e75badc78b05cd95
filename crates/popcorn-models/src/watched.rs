use serde::{Deserialize, Serialize};
use crate::movie::MovieDetail;
use crate::rating::UserRating;

/// A movie the user has watched and rated.
///
/// Field names on the wire match the layout the list has always been stored
/// in, so previously saved lists keep loading. Numbers OMDb could not supply
/// are stored as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedRecord {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
    #[serde(rename = "Runtime", default)]
    pub runtime_minutes: Option<u32>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "userRating")]
    pub user_rating: UserRating,
}

impl WatchedRecord {
    pub fn from_detail(detail: &MovieDetail, user_rating: UserRating) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            runtime_minutes: detail.runtime_minutes(),
            imdb_rating: detail.imdb_rating_value(),
            user_rating,
        }
    }
}
