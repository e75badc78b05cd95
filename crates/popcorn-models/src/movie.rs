use serde::{Deserialize, Serialize};

/// OMDb placeholder for fields it has no value for.
pub const NOT_AVAILABLE: &str = "N/A";

/// One entry of a search response. Lives only until the next query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String, // "2010", or "2010–2013" for series
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
}

/// Full record for one movie, held while its detail view is open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
    #[serde(rename = "Released", default)]
    pub release_date: String,
    #[serde(rename = "Runtime", default)]
    pub runtime_text: String, // "142 min"
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String, // "8.8" or "N/A"
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
}

impl MovieDetail {
    /// Runtime in whole minutes, if OMDb reported one.
    pub fn runtime_minutes(&self) -> Option<u32> {
        parse_runtime_minutes(&self.runtime_text)
    }

    /// IMDb rating as a number, if OMDb reported one.
    pub fn imdb_rating_value(&self) -> Option<f64> {
        parse_imdb_rating(&self.imdb_rating)
    }
}

/// Parse OMDb runtime text such as `"142 min"` into minutes.
pub fn parse_runtime_minutes(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix("min").unwrap_or(trimmed).trim();
    number.parse().ok()
}

/// Parse an OMDb rating string such as `"7.8"`. `"N/A"` yields `None`.
pub fn parse_imdb_rating(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
