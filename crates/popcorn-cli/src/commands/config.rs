use super::prompts::prompt_yes_no;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use popcorn_config::Config;
use serde_json::json;

pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    if secret.chars().count() <= 2 {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}{}", visible, "*".repeat(secret.chars().count() - 2))
    }
}

pub fn run_show(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let mut config = ctx.config.clone();
    if !full {
        config.omdb.api_key = mask_secret(&config.omdb.api_key);
    }

    if output.is_json() {
        output.json(&json!({
            "config_file": ctx.config_path.display().to_string(),
            "omdb": { "api_key": config.omdb.api_key, "base_url": config.omdb.base_url },
            "search": { "min_query_len": config.search.min_query_len },
            "watched_file": ctx.config.watched_file(&ctx.paths).display().to_string(),
        }));
        return Ok(());
    }

    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to render config: {}", e))?;
    output.panel(&format!("# {}", ctx.config_path.display()), rendered.trim_end());
    Ok(())
}

pub fn run_init(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    if ctx.config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite with defaults?", ctx.config_path.display()),
            Some(false),
        )?;
        if !overwrite {
            output.info("Left the existing config alone");
            return Ok(());
        }
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    let mut config = Config::default();
    config.logging.file = Some(ctx.paths.log_file());
    config
        .save_to_file(&ctx.config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", ctx.config_path.display(), e))?;
    output.success(format!("Wrote default config to {}", ctx.config_path.display()));
    Ok(())
}

pub fn run_paths(ctx: &AppContext, output: &Output) -> Result<()> {
    let watched_file = ctx.config.watched_file(&ctx.paths);
    let log_file = ctx.config.logging.file.as_ref().map(|p| p.display().to_string());
    if output.is_json() {
        output.json(&json!({
            "config_file": ctx.config_path.display().to_string(),
            "watched_file": watched_file.display().to_string(),
            "log_file": log_file,
        }));
    } else {
        output.info(format!("config:  {}", ctx.config_path.display()));
        output.info(format!("watched: {}", watched_file.display()));
        output.info(format!("logs:    {}", log_file.as_deref().unwrap_or("stderr only")));
    }
    Ok(())
}
