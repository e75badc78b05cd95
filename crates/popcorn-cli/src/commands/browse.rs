use super::prompts::{prompt_number_in_range, prompt_string};
use super::search::wait_for_browser;
use super::AppContext;
use crate::output::Output;
use crate::views;
use color_eyre::Result;
use popcorn_core::{Browser, Key, Panel, RemoveOrigin};
use popcorn_models::rating::{MAX_USER_RATING, MIN_USER_RATING};
use popcorn_models::UserRating;

const HELP: &str = "\
Type a movie title to search. Commands:
  :open N          open result N
  :rate [N]        rate the open movie (1-10)
  :add             add the open movie to your list
  :remove [N|ID]   remove the open movie, or watched row N / id
  :esc             close the open movie
  :toggle results|watched
  :help            show this help
  :q               quit
An empty line jumps back to the search box and clears it.";

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Enter,
    Open(usize),
    Rate(Option<u8>),
    Add,
    Remove(Option<String>),
    Escape,
    Toggle(Panel),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Enter;
    }
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("open" | "o", Some(n)) => n
            .parse()
            .map(Command::Open)
            .unwrap_or_else(|_| Command::Unknown(trimmed.to_string())),
        ("rate" | "r", None) => Command::Rate(None),
        ("rate" | "r", Some(n)) => n
            .parse()
            .map(|n| Command::Rate(Some(n)))
            .unwrap_or_else(|_| Command::Unknown(trimmed.to_string())),
        ("add" | "a", None) => Command::Add,
        ("remove" | "rm", target) => Command::Remove(target.map(str::to_string)),
        ("esc" | "close", None) => Command::Escape,
        ("toggle" | "t", Some("results")) => Command::Toggle(Panel::Results),
        ("toggle" | "t", Some("watched")) => Command::Toggle(Panel::Watched),
        ("help" | "h" | "?", None) => Command::Help,
        ("q" | "quit" | "exit", None) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Interactive loop over one prompt line at a time.
///
/// Each query settles before the next prompt, so searches never overlap
/// here and `set_query` never has one to abort. Overlapping queries only
/// happen when a caller drives `Browser` without settling in between.
pub async fn run_browse(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut browser = ctx.browser()?;
    output.info(HELP);
    render(&browser, output);

    loop {
        let line = prompt_string("🍿 Search movies")?;
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => {
                output.info(HELP);
                continue;
            }
            Command::Query(query) => {
                browser.focus_search();
                browser.set_query(query);
                wait_for_browser(&mut browser, output, "Searching...").await;
                // The result list has focus now, so Enter clears the search
                browser.blur_search();
            }
            Command::Enter => browser.handle_key(Key::Enter),
            Command::Escape => browser.handle_key(Key::Escape),
            Command::Open(n) => {
                let id = n
                    .checked_sub(1)
                    .and_then(|i| browser.state().results.get(i))
                    .map(|r| r.id.clone());
                match id {
                    Some(id) => {
                        browser.select_movie(id);
                        wait_for_browser(&mut browser, output, "Loading movie...").await;
                        if let Some(err) = &browser.state().detail_error {
                            output.warn(err);
                        }
                    }
                    None => output.warn(format!("There is no result {}", n)),
                }
            }
            Command::Rate(value) => rate(&mut browser, value, output)?,
            Command::Add => match browser.add_selected() {
                Ok(record) => output.success(format!("Added '{}'", record.title)),
                Err(e) => output.warn(e.to_string()),
            },
            Command::Remove(target) => remove(&mut browser, target, output)?,
            Command::Toggle(panel) => browser.toggle_panel(panel),
            Command::Unknown(text) => {
                output.warn(format!("Unknown command '{}', try :help", text));
                continue;
            }
        }
        render(&browser, output);
    }

    Ok(())
}

fn rate(browser: &mut Browser, value: Option<u8>, output: &Output) -> Result<()> {
    if browser.state().selected.is_none() {
        output.warn("Open a movie first");
        return Ok(());
    }
    if browser.selected_is_watched() {
        output.warn("This movie is already on your list");
        return Ok(());
    }

    let value = match value {
        Some(v) => v,
        None => prompt_number_in_range("Your rating", MIN_USER_RATING, MAX_USER_RATING, output)?,
    };
    match UserRating::new(value) {
        Ok(rating) => browser.set_pending_rating(rating)?,
        Err(e) => output.warn(e.to_string()),
    }
    Ok(())
}

fn remove(browser: &mut Browser, target: Option<String>, output: &Output) -> Result<()> {
    let (id, origin) = match target {
        None => match &browser.state().selected {
            Some(detail) => (detail.id.clone(), RemoveOrigin::Detail),
            None => {
                output.warn("Open a movie or name a watched row to remove");
                return Ok(());
            }
        },
        Some(target) => {
            // A small number is a row in the watched table, anything else an id
            let by_row = target
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| browser.watched().records().get(i))
                .map(|r| r.id.clone());
            (by_row.unwrap_or(target), RemoveOrigin::List)
        }
    };

    if browser.remove_watched(&id, origin)? {
        output.success(format!("Removed {}", id));
    } else {
        output.warn(format!("{} is not on your list", id));
    }
    Ok(())
}

fn render(browser: &Browser, output: &Output) {
    let state = browser.state();
    output.panel(&format!("═══ {} ═══", browser.window_title()), "");

    let toggle = |open: bool| if open { "[-]" } else { "[+]" };

    output.panel(
        &format!("{} {}", toggle(state.results_open), views::results_count(&state.results)),
        &if state.results_open { views::results_panel(state) } else { String::new() },
    );

    match &state.selected {
        Some(detail) => {
            let watched_rating = browser.watched().user_rating(&detail.id);
            output.panel(
                &format!("{} Details", toggle(state.watched_open)),
                &if state.watched_open {
                    views::detail(detail, watched_rating, state.pending_rating)
                } else {
                    String::new()
                },
            );
        }
        None => {
            output.panel(
                &format!("{} Movies you watched", toggle(state.watched_open)),
                &if state.watched_open {
                    views::watched_panel(browser.watched().records(), &browser.summary())
                } else {
                    String::new()
                },
            );
        }
    }
}
