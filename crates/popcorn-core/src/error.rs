use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write watched list to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode watched list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Actions the browser refuses to carry out in its current state.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no movie is open")]
    NoSelection,

    #[error("rate the movie before adding it to the list")]
    NoRating,

    #[error("{0} is already in the watched list")]
    AlreadyWatched(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
