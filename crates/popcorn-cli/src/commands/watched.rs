use super::show::open_detail;
use super::AppContext;
use crate::output::Output;
use crate::views;
use color_eyre::Result;
use popcorn_core::RemoveOrigin;
use popcorn_models::UserRating;
use serde_json::json;

pub async fn run_add(ctx: &AppContext, id: String, rating: u8, output: &Output) -> Result<()> {
    let rating = UserRating::new(rating).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let mut browser = ctx.browser()?;
    open_detail(&mut browser, &id, output).await?;

    if browser.selected_is_watched() {
        let existing = browser
            .watched()
            .user_rating(&id)
            .map(|r| r.to_string())
            .unwrap_or_default();
        output.warn(format!("You already rated this movie with {} 🌟", existing));
        return Ok(());
    }

    browser.set_pending_rating(rating)?;
    let record = browser.add_selected()?;

    if output.is_json() {
        output.json(&json!({ "added": record }));
    } else {
        output.success(format!("Added '{}' to your list, rated {} 🌟", record.title, rating));
    }
    Ok(())
}

pub async fn run_remove(ctx: &AppContext, id: String, output: &Output) -> Result<()> {
    let mut browser = ctx.browser()?;
    let removed = browser.remove_watched(&id, RemoveOrigin::List)?;

    if output.is_json() {
        output.json(&json!({ "removed": removed, "id": id }));
    } else if removed {
        output.success(format!("Removed {} from your list", id));
    } else {
        output.warn(format!("{} is not on your list", id));
    }
    Ok(())
}

pub async fn run_list(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.watched_store();
    let records = store.load();
    let summary = popcorn_models::WatchedSummary::from_records(&records);

    if output.is_json() {
        output.json(&json!({
            "summary": summary,
            "movies": records,
            "path": store.path().display().to_string(),
        }));
    } else {
        output.panel("Movies you watched", &views::watched_panel(&records, &summary));
    }
    Ok(())
}
