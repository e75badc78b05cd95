use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct FakeSource {
    searches: HashMap<String, (Duration, Option<Vec<SearchResult>>)>,
    details: HashMap<String, MovieDetail>,
    search_calls: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with_search(mut self, query: &str, delay_ms: u64, results: Option<Vec<SearchResult>>) -> Self {
        self.searches
            .insert(query.to_string(), (Duration::from_millis(delay_ms), results));
        self
    }

    fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let (delay, results) = self
            .searches
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, None));
        tokio::time::sleep(delay).await;
        self.completed.lock().unwrap().push(query.to_string());
        results.ok_or_else(|| SourceError::NotFound("Movie not found!".to_string()))
    }

    async fn movie_detail(&self, id: &str) -> Result<MovieDetail, SourceError> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}

fn result(id: &str, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        poster_url: format!("https://example.com/{}.jpg", id),
    }
}

fn detail(id: &str, title: &str, runtime: &str) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        poster_url: String::new(),
        release_date: "31 Mar 1999".to_string(),
        runtime_text: runtime.to_string(),
        genre: "Action, Sci-Fi".to_string(),
        imdb_rating: "8.7".to_string(),
        plot: "A computer hacker learns the truth.".to_string(),
        actors: "Keanu Reeves".to_string(),
        director: "Lana Wachowski, Lilly Wachowski".to_string(),
    }
}

fn browser_with(source: FakeSource, dir: &TempDir) -> (Browser, Arc<FakeSource>) {
    let source = Arc::new(source);
    let store = WatchedStore::new(dir.path().join("watched_movies.json"));
    let browser = Browser::new(source.clone(), store, BrowserOptions::default());
    (browser, source)
}

#[tokio::test]
async fn test_short_queries_never_search() {
    let dir = TempDir::new().unwrap();
    let (mut browser, source) = browser_with(FakeSource::default(), &dir);

    for query in ["", "m", "ma", "é€"] {
        browser.set_query(query);
        assert_eq!(browser.state().status, SearchStatus::Idle);
        assert!(browser.state().results.is_empty());
        assert!(!browser.is_busy());
    }

    assert!(browser.settle().await.is_empty());
    assert_eq!(source.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_shows_results() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_search(
        "matrix",
        0,
        Some(vec![result("tt0133093", "The Matrix"), result("tt0234215", "The Matrix Reloaded")]),
    );
    let (mut browser, _) = browser_with(source, &dir);

    browser.set_query("matrix");
    assert_eq!(browser.state().status, SearchStatus::Loading);

    let applied = browser.settle().await;
    assert_eq!(
        applied,
        vec![Applied::SearchFinished { query: "matrix".to_string(), count: 2 }]
    );
    assert_eq!(browser.state().status, SearchStatus::Results);
    assert_eq!(browser.state().results.len(), 2);
}

#[tokio::test]
async fn test_not_found_sets_error_and_clears_results() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default()
        .with_search("matrix", 0, Some(vec![result("tt0133093", "The Matrix")]))
        .with_search("qqqzzz", 0, None);
    let (mut browser, _) = browser_with(source, &dir);

    browser.set_query("matrix");
    browser.settle().await;
    assert_eq!(browser.state().results.len(), 1);

    browser.set_query("qqqzzz");
    browser.settle().await;
    assert_eq!(browser.state().status, SearchStatus::Error);
    assert!(browser.state().results.is_empty());
}

#[tokio::test]
async fn test_only_last_query_is_rendered() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default()
        .with_search("mat", 200, Some(vec![result("tt1", "Mat")]))
        .with_search("matr", 150, Some(vec![result("tt2", "Matr")]))
        .with_search("matrix", 10, Some(vec![result("tt0133093", "The Matrix")]));
    let (mut browser, source) = browser_with(source, &dir);

    browser.set_query("mat");
    tokio::time::sleep(Duration::from_millis(20)).await;
    browser.set_query("matr");
    tokio::time::sleep(Duration::from_millis(20)).await;
    browser.set_query("matrix");

    let applied = browser.settle().await;
    assert_eq!(
        applied,
        vec![Applied::SearchFinished { query: "matrix".to_string(), count: 1 }]
    );
    assert_eq!(browser.state().results[0].id, "tt0133093");

    // The superseded requests were aborted, not left to finish
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(*source.completed.lock().unwrap(), vec!["matrix".to_string()]);
    assert!(browser.next_outcome().await.is_none());
    assert_eq!(browser.state().results[0].id, "tt0133093");
}

#[tokio::test]
async fn test_shortening_query_cancels_search() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_search("matrix", 100, Some(vec![result("tt1", "x")]));
    let (mut browser, source) = browser_with(source, &dir);

    browser.set_query("matrix");
    browser.set_query("ma");
    assert!(!browser.is_busy());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(source.completed.lock().unwrap().is_empty());
    assert_eq!(browser.state().status, SearchStatus::Idle);
    assert!(browser.state().results.is_empty());
}

#[tokio::test]
async fn test_select_rate_and_add() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_detail(detail("tt0133093", "The Matrix", "136 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt0133093");
    let applied = browser.settle().await;
    assert_eq!(applied, vec![Applied::DetailOpened { id: "tt0133093".to_string() }]);
    assert_eq!(browser.window_title(), "The Matrix");

    assert!(matches!(browser.add_selected(), Err(BrowserError::NoRating)));

    browser.set_pending_rating(UserRating::new(9).unwrap()).unwrap();
    assert_eq!(browser.window_title(), "The Matrix (Rated 9 🌟)");

    let record = browser.add_selected().unwrap();
    assert_eq!(record.runtime_minutes, Some(136));
    assert_eq!(record.imdb_rating, Some(8.7));
    assert!(browser.state().selected.is_none());
    assert_eq!(browser.window_title(), DEFAULT_TITLE);

    let saved = WatchedStore::new(dir.path().join("watched_movies.json")).load();
    assert_eq!(saved, vec![record]);
}

#[tokio::test]
async fn test_cannot_add_twice() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_detail(detail("tt0133093", "The Matrix", "136 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt0133093");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(7).unwrap()).unwrap();
    browser.add_selected().unwrap();

    browser.select_movie("tt0133093");
    browser.settle().await;
    assert!(browser.selected_is_watched());
    browser.set_pending_rating(UserRating::new(3).unwrap()).unwrap();
    assert!(matches!(browser.add_selected(), Err(BrowserError::AlreadyWatched(_))));
    assert_eq!(browser.watched().len(), 1);
}

#[tokio::test]
async fn test_add_then_remove_restores_watched() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default()
        .with_detail(detail("tt1", "First", "100 min"))
        .with_detail(detail("tt2", "Second", "120 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt1");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(6).unwrap()).unwrap();
    browser.add_selected().unwrap();
    let before = browser.watched().clone();

    browser.select_movie("tt2");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(8).unwrap()).unwrap();
    browser.add_selected().unwrap();
    assert_eq!(browser.watched().len(), 2);

    assert!(browser.remove_watched("tt2", RemoveOrigin::List).unwrap());
    assert_eq!(browser.watched(), &before);

    let reloaded = WatchedStore::new(dir.path().join("watched_movies.json")).load();
    assert_eq!(reloaded, before.records());
}

#[tokio::test]
async fn test_remove_from_detail_closes_it() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_detail(detail("tt1", "First", "100 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt1");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(6).unwrap()).unwrap();
    browser.add_selected().unwrap();

    browser.select_movie("tt1");
    browser.settle().await;
    assert!(browser.state().selected.is_some());

    assert!(browser.remove_watched("tt1", RemoveOrigin::Detail).unwrap());
    assert!(browser.state().selected.is_none());
    assert!(browser.watched().is_empty());
}

/// Make the next save fail: a directory where the temporary file goes.
fn block_saves(dir: &TempDir) {
    std::fs::create_dir(dir.path().join("watched_movies.json.tmp")).unwrap();
}

#[tokio::test]
async fn test_add_rolls_back_when_save_fails() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_detail(detail("tt1", "First", "100 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt1");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(6).unwrap()).unwrap();

    block_saves(&dir);
    let err = browser.add_selected().unwrap_err();
    assert!(matches!(err, BrowserError::Store(_)));

    assert!(browser.watched().is_empty());
    assert_eq!(browser.state().selected.as_ref().map(|d| d.id.as_str()), Some("tt1"));
    assert_eq!(browser.state().pending_rating.map(|r| r.value()), Some(6));
    assert!(WatchedStore::new(dir.path().join("watched_movies.json")).load().is_empty());
}

#[tokio::test]
async fn test_remove_rolls_back_when_save_fails() {
    let dir = TempDir::new().unwrap();
    let store = WatchedStore::new(dir.path().join("watched_movies.json"));
    let record = WatchedRecord::from_detail(&detail("tt1", "First", "100 min"), UserRating::new(4).unwrap());
    store.save(&[record.clone()]).unwrap();

    let source = FakeSource::default().with_detail(detail("tt1", "First", "100 min"));
    let (mut browser, _) = browser_with(source, &dir);
    browser.select_movie("tt1");
    browser.settle().await;

    block_saves(&dir);
    let err = browser.remove_watched("tt1", RemoveOrigin::Detail).unwrap_err();
    assert!(matches!(err, BrowserError::Store(_)));

    assert_eq!(browser.watched().records(), &[record.clone()]);
    assert!(browser.state().selected.is_some());
    assert_eq!(store.load(), vec![record]);

    // Once saving works again the removal goes through
    std::fs::remove_dir(dir.path().join("watched_movies.json.tmp")).unwrap();
    assert!(browser.remove_watched("tt1", RemoveOrigin::List).unwrap());
    assert!(store.load().is_empty());
}

#[tokio::test]
async fn test_watched_list_loaded_at_startup() {
    let dir = TempDir::new().unwrap();
    let store = WatchedStore::new(dir.path().join("watched_movies.json"));
    let record = WatchedRecord::from_detail(&detail("tt1", "First", "142 min"), UserRating::new(4).unwrap());
    store.save(&[record.clone()]).unwrap();

    let (browser, _) = browser_with(FakeSource::default(), &dir);
    assert_eq!(browser.watched().records(), &[record]);
    assert_eq!(browser.summary().runtime_display(), "142");
}

#[tokio::test]
async fn test_detail_failure_is_recorded_not_shown_as_search_error() {
    let dir = TempDir::new().unwrap();
    let (mut browser, _) = browser_with(FakeSource::default(), &dir);

    browser.select_movie("tt404");
    let applied = browser.settle().await;
    assert_eq!(applied, vec![Applied::DetailFailed { id: "tt404".to_string() }]);
    assert!(browser.state().selected.is_none());
    assert!(browser.state().detail_error.is_some());
    assert_eq!(browser.state().status, SearchStatus::Idle);
}

#[tokio::test]
async fn test_query_change_closes_detail() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default().with_detail(detail("tt1", "First", "100 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.select_movie("tt1");
    browser.settle().await;
    browser.set_pending_rating(UserRating::new(2).unwrap()).unwrap();

    browser.set_query("x");
    assert!(browser.state().selected.is_none());
    assert!(browser.state().pending_rating.is_none());
}

#[tokio::test]
async fn test_keyboard_shortcuts() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::default()
        .with_search("matrix", 0, Some(vec![result("tt0133093", "The Matrix")]))
        .with_detail(detail("tt0133093", "The Matrix", "136 min"));
    let (mut browser, _) = browser_with(source, &dir);

    browser.set_query("matrix");
    browser.settle().await;

    // Enter while typing leaves the query alone
    browser.handle_key(Key::Enter);
    assert_eq!(browser.state().query, "matrix");
    assert_eq!(browser.state().results.len(), 1);

    browser.select_movie("tt0133093");
    browser.settle().await;
    browser.handle_key(Key::Escape);
    assert!(browser.state().selected.is_none());

    browser.blur_search();
    browser.handle_key(Key::Enter);
    assert!(browser.state().search_focused);
    assert_eq!(browser.state().query, "");
    assert!(browser.state().results.is_empty());
    assert_eq!(browser.state().status, SearchStatus::Idle);
}

#[tokio::test]
async fn test_toggle_panels() {
    let dir = TempDir::new().unwrap();
    let (mut browser, _) = browser_with(FakeSource::default(), &dir);

    assert!(browser.state().results_open);
    browser.toggle_panel(Panel::Results);
    assert!(!browser.state().results_open);
    assert!(browser.state().watched_open);
    browser.toggle_panel(Panel::Results);
    browser.toggle_panel(Panel::Watched);
    assert!(browser.state().results_open);
    assert!(!browser.state().watched_open);
}

#[test]
fn test_rating_requires_open_detail() {
    let dir = TempDir::new().unwrap();
    let (mut browser, _) = browser_with(FakeSource::default(), &dir);
    let err = browser.set_pending_rating(UserRating::new(5).unwrap()).unwrap_err();
    assert!(matches!(err, BrowserError::NoSelection));
}
