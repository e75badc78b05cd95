// Text rendering. Every function here is a pure function of its inputs.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use popcorn_core::{BrowserState, SearchStatus};
use popcorn_models::rating::MAX_USER_RATING;
use popcorn_models::{MovieDetail, SearchResult, UserRating, WatchedRecord, WatchedSummary};

pub const LOADING: &str = "Loading...";
pub const SEARCH_ERROR: &str = "⚠️  Something went wrong, please try again";

pub fn results_count(results: &[SearchResult]) -> String {
    match results.len() {
        0 => "🤷 No Results Found".to_string(),
        1 => "Found 1 result".to_string(),
        n => format!("Found {} results", n),
    }
}

/// Numbered rows, one per result. Numbers start at 1.
pub fn results_list(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:>3}. {} 📅 {}", i + 1, r.title, r.year))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The left-hand panel: loader, error panel, or the results list.
pub fn results_panel(state: &BrowserState) -> String {
    match state.status {
        SearchStatus::Loading => LOADING.to_string(),
        SearchStatus::Error => SEARCH_ERROR.to_string(),
        SearchStatus::Idle | SearchStatus::Results => results_list(&state.results),
    }
}

pub fn watched_summary(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣  {} movies   ⭐️ {}   🌟 {}   ⏳ {} min",
        summary.count,
        summary.imdb_rating_display(),
        summary.user_rating_display(),
        summary.runtime_display()
    )
}

pub fn watched_table(records: &[WatchedRecord]) -> String {
    if records.is_empty() {
        return "Nothing watched yet".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "⭐️ IMDb", "🌟 You", "⏳ Runtime", "ID"]);

    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            record.title.clone(),
            optional(record.imdb_rating.map(|r| format!("{:.1}", r))),
            record.user_rating.to_string(),
            optional(record.runtime_minutes.map(|m| format!("{} min", m))),
            record.id.clone(),
        ]);
    }

    table.to_string()
}

/// Right-hand panel when no movie is open.
pub fn watched_panel(records: &[WatchedRecord], summary: &WatchedSummary) -> String {
    format!("{}\n{}", watched_summary(summary), watched_table(records))
}

pub fn stars(rating: Option<UserRating>) -> String {
    let filled = rating.map(|r| r.value()).unwrap_or(0);
    (1..=MAX_USER_RATING)
        .map(|i| if i <= filled { '★' } else { '☆' })
        .collect()
}

/// Full record for one movie. `watched_rating` is the stored rating when
/// the movie is already on the list; `pending` is the rating being picked.
pub fn detail(detail: &MovieDetail, watched_rating: Option<UserRating>, pending: Option<UserRating>) -> String {
    let mut lines = vec![
        detail.title.clone(),
        format!("{} • {}", detail.release_date, detail.runtime_text),
        detail.genre.clone(),
        format!("⭐️ {} IMDb rating", detail.imdb_rating),
        String::new(),
    ];

    match watched_rating {
        Some(rating) => {
            lines.push(format!("You already rated this movie with {} 🌟", rating));
            lines.push("[remove] Remove from list".to_string());
        }
        None => {
            let shown = pending
                .map(|r| r.to_string())
                .unwrap_or_default();
            lines.push(format!("{} {}", stars(pending), shown).trim_end().to_string());
            if pending.is_some() {
                lines.push("[add] + Add to list".to_string());
            }
        }
    }

    lines.push(String::new());
    lines.push(detail.plot.clone());
    lines.push(format!("Starring {}", detail.actors));
    lines.push(format!("Directed by {}", detail.director));
    lines.join("\n")
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, title: &str, year: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster_url: String::new(),
        }
    }

    fn sample_detail() -> MovieDetail {
        MovieDetail {
            id: "tt0468569".to_string(),
            title: "The Dark Knight".to_string(),
            year: "2008".to_string(),
            poster_url: String::new(),
            release_date: "18 Jul 2008".to_string(),
            runtime_text: "152 min".to_string(),
            genre: "Action, Crime, Drama".to_string(),
            imdb_rating: "9.0".to_string(),
            plot: "Batman faces the Joker.".to_string(),
            actors: "Christian Bale, Heath Ledger".to_string(),
            director: "Christopher Nolan".to_string(),
        }
    }

    #[test]
    fn test_results_count() {
        assert_eq!(results_count(&[]), "🤷 No Results Found");
        assert_eq!(results_count(&[result("tt1", "A", "2001")]), "Found 1 result");
        assert_eq!(
            results_count(&[result("tt1", "A", "2001"), result("tt2", "B", "2002")]),
            "Found 2 results"
        );
    }

    #[test]
    fn test_results_list_numbers_rows() {
        let list = results_list(&[result("tt1", "Alien", "1979"), result("tt2", "Aliens", "1986")]);
        let rows: Vec<&str> = list.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("1. Alien"));
        assert!(rows[1].contains("2. Aliens"));
        assert!(rows[1].contains("1986"));
    }

    #[test]
    fn test_results_panel_follows_status() {
        let mut state = BrowserState::default();
        state.results = vec![result("tt1", "Alien", "1979")];

        state.status = SearchStatus::Loading;
        assert_eq!(results_panel(&state), LOADING);

        state.status = SearchStatus::Error;
        assert_eq!(results_panel(&state), SEARCH_ERROR);

        state.status = SearchStatus::Results;
        assert!(results_panel(&state).contains("Alien"));
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(None), "☆☆☆☆☆☆☆☆☆☆");
        assert_eq!(stars(Some(UserRating::new(3).unwrap())), "★★★☆☆☆☆☆☆☆");
    }

    #[test]
    fn test_detail_unrated_offers_add_only_with_rating() {
        let text = detail(&sample_detail(), None, None);
        assert!(text.contains("18 Jul 2008 • 152 min"));
        assert!(text.contains("Directed by Christopher Nolan"));
        assert!(!text.contains("Add to list"));

        let text = detail(&sample_detail(), None, Some(UserRating::new(8).unwrap()));
        assert!(text.contains("★★★★★★★★☆☆ 8"));
        assert!(text.contains("Add to list"));
    }

    #[test]
    fn test_detail_already_watched() {
        let text = detail(&sample_detail(), Some(UserRating::new(10).unwrap()), None);
        assert!(text.contains("You already rated this movie with 10 🌟"));
        assert!(text.contains("Remove from list"));
        assert!(!text.contains("Add to list"));
    }

    #[test]
    fn test_watched_panel() {
        let records = vec![WatchedRecord {
            id: "tt0468569".to_string(),
            title: "The Dark Knight".to_string(),
            year: "2008".to_string(),
            poster_url: String::new(),
            runtime_minutes: Some(152),
            imdb_rating: Some(9.0),
            user_rating: UserRating::new(9).unwrap(),
        }];
        let summary = WatchedSummary::from_records(&records);
        let text = watched_panel(&records, &summary);
        assert!(text.contains("1 movies"));
        assert!(text.contains("⏳ 152 min"));
        assert!(text.contains("The Dark Knight"));

        assert_eq!(watched_table(&[]), "Nothing watched yet");
    }
}
