use super::search::wait_for_browser;
use super::AppContext;
use crate::output::Output;
use crate::views;
use color_eyre::Result;
use popcorn_core::Browser;
use serde_json::json;

/// Open `id` in the browser and fail loudly if the record could not be
/// fetched.
pub async fn open_detail(browser: &mut Browser, id: &str, output: &Output) -> Result<()> {
    browser.select_movie(id);
    wait_for_browser(browser, output, &format!("Loading {}...", id)).await;

    if let Some(err) = &browser.state().detail_error {
        return Err(color_eyre::eyre::eyre!("{}", err));
    }
    if browser.state().selected.is_none() {
        return Err(color_eyre::eyre::eyre!("Movie {} could not be opened", id));
    }
    Ok(())
}

pub async fn run_show(ctx: &AppContext, id: String, output: &Output) -> Result<()> {
    let mut browser = ctx.browser()?;
    open_detail(&mut browser, &id, output).await?;

    let state = browser.state();
    let Some(detail) = state.selected.as_ref() else {
        return Ok(());
    };
    let watched_rating = browser.watched().user_rating(&detail.id);

    if output.is_json() {
        output.json(&json!({
            "movie": detail,
            "watched_rating": watched_rating,
        }));
    } else {
        output.panel(&browser.window_title(), &views::detail(detail, watched_rating, state.pending_rating));
    }
    Ok(())
}
