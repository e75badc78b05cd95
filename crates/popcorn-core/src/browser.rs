// Root coordinator: owns every piece of browser state and applies network
// completions one at a time.

use popcorn_config::Config;
use popcorn_models::{MovieDetail, SearchResult, UserRating, WatchedRecord, WatchedSummary};
use popcorn_sources::{MovieSource, SourceError};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::error::BrowserError;
use crate::storage::WatchedStore;
use crate::watched::WatchedList;

#[cfg(test)]
mod tests;

/// Title shown when no movie is open.
pub const DEFAULT_TITLE: &str = "Popcorn App";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Query too short to search; results are empty.
    Idle,
    Loading,
    /// The last search failed or found nothing.
    Error,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Results,
    Watched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Where a removal was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOrigin {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy)]
pub struct BrowserOptions {
    pub min_query_len: usize,
}

impl BrowserOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_query_len: config.search.min_query_len,
        }
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            min_query_len: popcorn_config::DEFAULT_MIN_QUERY_LEN,
        }
    }
}

/// Everything the views render from.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<SearchResult>,
    pub selected: Option<MovieDetail>,
    /// Rating picked in the open detail view but not yet added.
    pub pending_rating: Option<UserRating>,
    /// Last detail fetch failure. Never shown in the results panel.
    pub detail_error: Option<String>,
    pub search_focused: bool,
    pub results_open: bool,
    pub watched_open: bool,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            selected: None,
            pending_rating: None,
            detail_error: None,
            search_focused: true,
            results_open: true,
            watched_open: true,
        }
    }
}

/// A finished network call, reported back by its task.
#[derive(Debug)]
enum Outcome {
    Search {
        generation: u64,
        query: String,
        result: Result<Vec<SearchResult>, SourceError>,
    },
    Detail {
        id: String,
        result: Result<MovieDetail, SourceError>,
    },
}

/// What applying one completion did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    SearchFinished { query: String, count: usize },
    SearchFailed { query: String },
    /// A search that was superseded before its result was applied.
    SearchDiscarded,
    DetailOpened { id: String },
    DetailFailed { id: String },
}

pub struct Browser {
    source: Arc<dyn MovieSource>,
    store: WatchedStore,
    watched: WatchedList,
    state: BrowserState,
    options: BrowserOptions,
    generation: u64,
    search_task: Option<JoinHandle<()>>,
    pending_details: usize,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
}

impl Browser {
    /// Build a browser and load the saved watched list.
    pub fn new(source: Arc<dyn MovieSource>, store: WatchedStore, options: BrowserOptions) -> Self {
        let watched = WatchedList::new(store.load());
        debug!("Browsing {} with {} watched movies", source.source_name(), watched.len());
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            store,
            watched,
            state: BrowserState::default(),
            options,
            generation: 0,
            search_task: None,
            pending_details: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    /// True while any network call has not been applied yet.
    pub fn is_busy(&self) -> bool {
        self.search_task.is_some() || self.pending_details > 0
    }

    /// Replace the query. Aborts the search in flight, closes the detail view
    /// and starts a new search unless the query is too short.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.cancel_search();
        self.generation += 1;
        self.state.query = query.clone();
        self.close_detail();

        if query.chars().count() < self.options.min_query_len {
            debug!("Query '{}' below {} characters, not searching", query, self.options.min_query_len);
            self.state.results.clear();
            self.state.status = SearchStatus::Idle;
            return;
        }

        self.state.status = SearchStatus::Loading;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let generation = self.generation;
        debug!(generation, "Searching for '{}'", query);
        self.search_task = Some(tokio::spawn(async move {
            let result = source.search(&query).await;
            // The receiver lives as long as the browser; a closed channel
            // means nobody is left to render the result.
            let _ = tx.send(Outcome::Search { generation, query, result });
        }));
    }

    /// Start fetching the full record for `id`. Not cancellable.
    pub fn select_movie(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.state.detail_error = None;
        self.pending_details += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        debug!("Fetching detail for {}", id);
        tokio::spawn(async move {
            let result = source.movie_detail(&id).await;
            let _ = tx.send(Outcome::Detail { id, result });
        });
    }

    pub fn close_detail(&mut self) {
        self.state.selected = None;
        self.state.pending_rating = None;
    }

    /// Pick a rating in the open detail view.
    pub fn set_pending_rating(&mut self, rating: UserRating) -> Result<(), BrowserError> {
        if self.state.selected.is_none() {
            return Err(BrowserError::NoSelection);
        }
        self.state.pending_rating = Some(rating);
        Ok(())
    }

    /// Whether the open movie is already on the watched list.
    pub fn selected_is_watched(&self) -> bool {
        self.state
            .selected
            .as_ref()
            .map(|detail| self.watched.contains(&detail.id))
            .unwrap_or(false)
    }

    /// Add the open movie with its pending rating, persist, and close the
    /// detail view.
    pub fn add_selected(&mut self) -> Result<WatchedRecord, BrowserError> {
        let detail = self.state.selected.as_ref().ok_or(BrowserError::NoSelection)?;
        if self.watched.contains(&detail.id) {
            return Err(BrowserError::AlreadyWatched(detail.id.clone()));
        }
        let rating = self.state.pending_rating.ok_or(BrowserError::NoRating)?;

        let record = WatchedRecord::from_detail(detail, rating);
        self.watched.push(record.clone());
        if let Err(e) = self.store.save(self.watched.records()) {
            self.watched.remove(&record.id);
            return Err(e.into());
        }

        info!("Added '{}' ({}) rated {}", record.title, record.id, rating);
        self.close_detail();
        Ok(record)
    }

    /// Remove `id` from the watched list and persist. Removing from the open
    /// detail view also closes it. Returns whether anything was removed.
    ///
    /// A failed save leaves both the list and the detail view as they were.
    pub fn remove_watched(&mut self, id: &str, origin: RemoveOrigin) -> Result<bool, BrowserError> {
        let snapshot = self.watched.clone();
        let removed = self.watched.remove(id);
        if let Err(e) = self.store.save(self.watched.records()) {
            self.watched = snapshot;
            return Err(e.into());
        }

        if origin == RemoveOrigin::Detail {
            self.close_detail();
        }

        if removed > 0 {
            info!("Removed {} from watched list", id);
        } else {
            debug!("{} was not on the watched list", id);
        }
        Ok(removed > 0)
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        let open = match panel {
            Panel::Results => &mut self.state.results_open,
            Panel::Watched => &mut self.state.watched_open,
        };
        *open = !*open;
    }

    pub fn focus_search(&mut self) {
        self.state.search_focused = true;
    }

    pub fn blur_search(&mut self) {
        self.state.search_focused = false;
    }

    /// Global keyboard shortcuts. Enter away from the search box focuses it
    /// and clears the query; Escape closes the detail view.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Enter => {
                if self.state.search_focused {
                    return;
                }
                self.focus_search();
                self.set_query("");
            }
            Key::Escape => {
                if self.state.selected.is_some() {
                    self.close_detail();
                }
            }
        }
    }

    /// Tab title: the open movie and its pending rating.
    pub fn window_title(&self) -> String {
        match (&self.state.selected, self.state.pending_rating) {
            (Some(detail), Some(rating)) => format!("{} (Rated {} 🌟)", detail.title, rating),
            (Some(detail), None) => detail.title.clone(),
            (None, _) => DEFAULT_TITLE.to_string(),
        }
    }

    /// Wait for the next network completion and apply it. Returns `None`
    /// when nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<Applied> {
        if !self.is_busy() {
            return None;
        }
        let outcome = self.rx.recv().await?;
        Some(self.apply(outcome))
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Some(step) = self.next_outcome().await {
            applied.push(step);
        }
        applied
    }

    fn cancel_search(&mut self) {
        if let Some(handle) = self.search_task.take() {
            debug!(generation = self.generation, "Aborting search in flight");
            handle.abort();
        }
    }

    fn apply(&mut self, outcome: Outcome) -> Applied {
        match outcome {
            Outcome::Search { generation, query, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Discarding superseded search");
                    return Applied::SearchDiscarded;
                }
                self.search_task = None;

                match result {
                    Ok(results) => {
                        let count = results.len();
                        self.state.results = results;
                        self.state.status = SearchStatus::Results;
                        Applied::SearchFinished { query, count }
                    }
                    Err(e) => {
                        debug!("Search for '{}' failed: {}", query, e);
                        self.state.results.clear();
                        self.state.status = SearchStatus::Error;
                        Applied::SearchFailed { query }
                    }
                }
            }
            Outcome::Detail { id, result } => {
                self.pending_details = self.pending_details.saturating_sub(1);
                match result {
                    Ok(detail) => {
                        self.state.selected = Some(detail);
                        self.state.pending_rating = None;
                        self.state.detail_error = None;
                        Applied::DetailOpened { id }
                    }
                    Err(e) => {
                        warn!("Failed to load movie {}: {}", id, e);
                        self.state.detail_error = Some(format!("Could not load {}: {}", id, e));
                        Applied::DetailFailed { id }
                    }
                }
            }
        }
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        self.cancel_search();
    }
}
