//! @acp:module "Generate Command"
//! @acp:summary "Generate a Manifest V3 extension from a prompt"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `chrome-forge generate`: analyze, synthesize, back up any previous
//! output, write, then validate what landed on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ForgeConfig;
use crate::forge::{Forge, ForgeOutput};
use crate::output::{DiffStatus, ExtensionWriter};

use super::{is_interactive, print_profile_summary, resolve_prompt};

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Prompt words; empty means ask or use the configured default
    pub prompt: Vec<String>,
    /// Overrides the configured output directory
    pub output: Option<PathBuf>,
    /// Overwrite without keeping a backup
    pub no_backup: bool,
    /// Show what would change and write nothing
    pub dry_run: bool,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: &ForgeConfig) -> Result<()> {
    let prompt = resolve_prompt(&options.prompt, config, is_interactive())?;

    println!("{} Analyzing prompt...", style("→").cyan());
    let output = Forge::default()
        .run(&prompt)
        .context("Failed to synthesize extension")?;
    print_profile_summary(&output.profile);
    println!();

    if !output.is_writable() {
        for problem in &output.manifest_problems {
            eprintln!("{} {}", style("✗").red(), problem);
        }
        anyhow::bail!("Generated manifest failed self-validation; nothing written");
    }

    let output_dir = options
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let writer = ExtensionWriter::new(output_dir, config.backup_dir.clone());

    if options.dry_run {
        return print_preview(&writer, &output);
    }

    let backup = config.backup && !options.no_backup;
    if backup {
        if let Some(path) = writer.prepare()? {
            println!(
                "{} Existing extension backed up to {}",
                style("→").cyan(),
                path.display()
            );
        }
    } else {
        writer.prepare_clean()?;
    }

    let total = output.artifacts.len() as u64 + 1;
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let report = writer
        .write_all_with(&output.manifest, &output.artifacts, |name| {
            progress.set_message(name.to_string());
            progress.inc(1);
        })
        .with_context(|| format!("Failed to write {}", writer.output_dir().display()))?;
    progress.finish_and_clear();

    for name in &report.written {
        println!("  {} {}", style("✓").green(), name);
    }

    let problems = writer.validate();
    if problems.is_empty() {
        println!("\n{} Extension is valid", style("✓").green());
    } else {
        for problem in &problems {
            eprintln!("{} {}", style("⚠").yellow(), problem);
        }
    }

    println!(
        "\n{} Generated {} files in {}",
        style("✓").green(),
        report.written.len(),
        report.output_dir.display()
    );
    println!("  Fingerprint: {}", output.artifacts.fingerprint());
    println!("\n{}", style("To load the extension:").bold());
    println!("  1. Open chrome://extensions");
    println!("  2. Enable Developer mode");
    println!(
        "  3. Click \"Load unpacked\" and select {}",
        report.output_dir.display()
    );

    Ok(())
}

fn print_preview(writer: &ExtensionWriter, output: &ForgeOutput) -> Result<()> {
    let diffs = writer.preview(&output.manifest, &output.artifacts)?;

    println!(
        "{} Dry run, nothing written to {}",
        style("→").cyan(),
        writer.output_dir().display()
    );
    for diff in &diffs {
        let marker = match diff.status {
            DiffStatus::Added => style("+").green(),
            DiffStatus::Modified => style("~").yellow(),
            DiffStatus::Removed => style("-").red(),
            DiffStatus::Unchanged => style("=").dim(),
        };
        println!(
            "  {} {} (+{} -{})",
            marker, diff.name, diff.insertions, diff.deletions
        );
    }
    for diff in diffs.iter().filter(|d| d.status == DiffStatus::Modified) {
        println!("\n{}", diff.diff);
    }

    Ok(())
}
