use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input};

/// Prompt for a line of text; empty input is allowed.
pub fn prompt_string(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt until the user enters a number in `min..=max`.
pub fn prompt_number_in_range(prompt: &str, min: u8, max: u8, output: &Output) -> Result<u8> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(format!("{} ({}-{})", prompt, min, max))
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input_str.trim().parse::<u8>() {
            Ok(num) if (min..=max).contains(&num) => return Ok(num),
            _ => output.error(format!("Please enter a number from {} to {}.", min, max)),
        }
    }
}
