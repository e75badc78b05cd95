use super::AppContext;
use crate::output::Output;
use crate::views;
use color_eyre::Result;
use popcorn_core::{Browser, SearchStatus};
use serde_json::json;

pub fn status_name(status: SearchStatus) -> &'static str {
    match status {
        SearchStatus::Idle => "idle",
        SearchStatus::Loading => "loading",
        SearchStatus::Error => "error",
        SearchStatus::Results => "results",
    }
}

/// Apply whatever is in flight, with a spinner while waiting.
pub async fn wait_for_browser(browser: &mut Browser, output: &Output, msg: &str) {
    if !browser.is_busy() {
        return;
    }
    let spinner = output.spinner(msg);
    let applied = browser.settle().await;
    spinner.finish_and_clear();
    tracing::debug!("Applied {} completions", applied.len());
}

pub async fn run_search(ctx: &AppContext, query: String, output: &Output) -> Result<()> {
    let mut browser = ctx.browser()?;
    browser.set_query(query.as_str());
    wait_for_browser(&mut browser, output, &format!("Searching for '{}'...", query)).await;

    let state = browser.state();
    if output.is_json() {
        output.json(&json!({
            "query": state.query,
            "status": status_name(state.status),
            "results": state.results,
        }));
        return Ok(());
    }

    match state.status {
        SearchStatus::Idle => {
            output.warn(format!(
                "Type at least {} characters to search",
                ctx.config.search.min_query_len
            ));
        }
        SearchStatus::Error => output.error(views::SEARCH_ERROR),
        SearchStatus::Loading | SearchStatus::Results => {
            output.panel(&views::results_count(&state.results), &views::results_list(&state.results));
        }
    }
    Ok(())
}
