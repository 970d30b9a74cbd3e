//! @acp:module "Analyze Command"
//! @acp:summary "Print the analysis profile for a prompt"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{anyhow, Context, Result};
use console::style;

use crate::analyze::{AnalysisProfile, PromptAnalyzer};
use crate::config::ForgeConfig;

use super::{is_interactive, resolve_prompt};

/// Output format for the analyze command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(anyhow!("Unknown output format: {}", s)),
        }
    }
}

/// Options for the analyze command
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Prompt words; empty means ask or use the configured default
    pub prompt: Vec<String>,
    pub format: OutputFormat,
}

/// Execute the analyze command
pub fn execute_analyze(options: AnalyzeOptions, config: &ForgeConfig) -> Result<()> {
    let interactive = options.format == OutputFormat::Text && is_interactive();
    let prompt = resolve_prompt(&options.prompt, config, interactive)?;
    let profile = PromptAnalyzer::default().analyze(&prompt);

    println!("{}", render_profile(&profile, options.format)?);
    Ok(())
}

/// Serialize or summarize a profile
pub fn render_profile(profile: &AnalysisProfile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(profile).context("Failed to serialize profile as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(profile).context("Failed to serialize profile as YAML")
        }
        OutputFormat::Text => Ok(profile_summary(profile)),
    }
}

/// Print the human-readable summary used by `analyze` and `generate`
pub fn print_profile_summary(profile: &AnalysisProfile) {
    println!("{}", profile_summary(profile));
}

fn profile_summary(profile: &AnalysisProfile) -> String {
    let mut lines = Vec::new();

    let verdict = if profile.validity.valid {
        format!("{} {}", style("✓").green(), profile.validity.reason)
    } else {
        format!("{} {}", style("⚠").yellow(), profile.validity.reason)
    };
    lines.push(verdict);

    lines.push(format!("{}", style("Intents:").bold()));
    if profile.intents.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (name, score) in &profile.intents {
        lines.push(format!("  {:<24} {:.2}", name, score));
    }

    let c = &profile.components;
    let components: Vec<&str> = [
        ("popup", c.popup),
        ("content_script", c.content_script),
        ("background", c.background),
        ("storage", c.storage),
        ("stylesheet", c.stylesheet),
    ]
    .into_iter()
    .filter(|(_, on)| *on)
    .map(|(name, _)| name)
    .collect();
    lines.push(format!(
        "{} {}",
        style("Components:").bold(),
        join_or_none(&components)
    ));

    lines.push(format!(
        "{} {}",
        style("Features:").bold(),
        join_or_none(&profile.features.active())
    ));

    let permissions: Vec<&str> = profile.permissions.iter().map(String::as_str).collect();
    lines.push(format!(
        "{} {}",
        style("Permissions:").bold(),
        join_or_none(&permissions)
    ));

    if let Some(color) = &profile.color {
        lines.push(format!("{} {}", style("Color:").bold(), color));
    }

    if !profile.blocked_sites.is_empty() {
        lines.push(format!(
            "{} {}",
            style("Blocked sites:").bold(),
            profile.blocked_sites.join(", ")
        ));
    }

    lines.join("\n")
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
