#![forbid(unsafe_code)]
//! ChromeForge Command Line Interface

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chrome_forge::commands::{
    execute_analyze, execute_generate, execute_validate, AnalyzeOptions, GenerateOptions,
    OutputFormat, ValidateOptions,
};
use chrome_forge::config::{ForgeConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "chrome-forge")]
#[command(about = "Generate Manifest V3 browser extensions from a plain-language description")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an extension from a prompt
    Generate {
        /// Extension description (asked for interactively when omitted)
        prompt: Vec<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output directory without a backup
        #[arg(long)]
        no_backup: bool,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how a prompt is analyzed
    Analyze {
        /// Extension description
        prompt: Vec<String>,

        /// Output format: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a generated extension directory
    Validate {
        /// Extension directory (defaults to the configured output dir)
        dir: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config = ForgeConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Generate {
            prompt,
            output,
            no_backup,
            dry_run,
        } => {
            let options = GenerateOptions {
                prompt,
                output,
                no_backup,
                dry_run,
            };
            execute_generate(options, &config)?;
        }

        Commands::Analyze { prompt, format } => {
            let options = AnalyzeOptions { prompt, format };
            execute_analyze(options, &config)?;
        }

        Commands::Validate { dir } => {
            let options = ValidateOptions { dir };
            execute_validate(options, &config)?;
        }
    }

    Ok(())
}
