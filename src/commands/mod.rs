//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule with an options struct and an
//! `execute_*` entry point.

pub mod analyze;
pub mod generate;
pub mod validate;

pub use analyze::{execute_analyze, print_profile_summary, AnalyzeOptions, OutputFormat};
pub use generate::{execute_generate, GenerateOptions};
pub use validate::{execute_validate, ValidateOptions};

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::config::ForgeConfig;

/// Prompt from CLI words, else an interactive read, else the configured default
pub fn resolve_prompt(words: &[String], config: &ForgeConfig, interactive: bool) -> Result<String> {
    let joined = words.join(" ");
    let joined = joined.trim();
    if !joined.is_empty() {
        return Ok(joined.to_string());
    }

    if interactive {
        let prompt: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Describe the extension")
            .default(config.default_prompt.clone())
            .interact_text()?;
        return Ok(prompt.trim().to_string());
    }

    Ok(config.default_prompt.clone())
}

/// Whether a person is at the terminal
pub fn is_interactive() -> bool {
    console::user_attended()
}
