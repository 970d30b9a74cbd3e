//! @acp:module "Validate Command"
//! @acp:summary "Check a generated extension directory for missing references"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::ForgeConfig;
use crate::output::ExtensionWriter;

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Extension directory; defaults to the configured output dir
    pub dir: Option<PathBuf>,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: &ForgeConfig) -> Result<()> {
    let dir = options.dir.unwrap_or_else(|| config.output_dir.clone());
    let writer = ExtensionWriter::new(dir.clone(), config.backup_dir.clone());

    let problems = writer.validate();
    if problems.is_empty() {
        let files = writer.existing_files();
        println!(
            "{} {} is a valid extension ({} files)",
            style("✓").green(),
            dir.display(),
            files.len()
        );
        return Ok(());
    }

    for problem in &problems {
        eprintln!("{} {}", style("✗").red(), problem);
    }
    eprintln!(
        "\n{} {} problem(s) found in {}",
        style("✗").red(),
        problems.len(),
        dir.display()
    );
    std::process::exit(1);
}
