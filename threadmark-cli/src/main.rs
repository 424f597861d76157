//! threadmark CLI - export conversation archives to markdown
//!
//! Entry point for the threadmark command-line tool:
//! - `export` turns a conversation export (single file or account archive)
//!   into one markdown document per conversation
//! - `config` manages the TOML config file (init, path, show)

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use threadmark_core::pipeline::{export_path, ExportOptions};
use threadmark_core::{SystemContext, ThreadmarkConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "threadmark",
    author,
    version,
    about = "Export Claude conversation archives to markdown",
    long_about = "Turn conversation export JSON into readable markdown documents: \
                  one file per conversation, with tool calls, artifacts, thinking \
                  blocks, and web search citations rendered inline."
)]
struct Cli {
    /// Suppress progress spinners (for LLM/script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export conversations as markdown documents
    Export(ExportArgs),
    /// Manage threadmark configuration (init, path, show)
    Config(config::ConfigArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input export file or a directory walked for .json files
    #[arg(
        long = "in",
        value_name = "PATH",
        default_value = "conversations.json"
    )]
    input: PathBuf,

    /// Output directory for markdown files
    #[arg(long = "out", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Display name for the document header (overrides config)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Preview operations without writing files
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Disable the real-time progress output
    #[arg(long = "no-progress", action = ArgAction::SetTrue)]
    no_progress: bool,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => run_export(args, cli.quiet),
        Commands::Config(args) => config::run_config(args),
    }
}

/// Output directory from config, or ~/.threadmark/exports
fn default_output_dir(config: &ThreadmarkConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.output_dir {
        return Ok(dir.clone());
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".threadmark").join("exports"))
}

fn run_export(args: ExportArgs, quiet: bool) -> Result<()> {
    let mut config = ThreadmarkConfig::load().context("failed to load config")?;
    if let Some(name) = args.name {
        config.display_name = Some(name);
    }

    let output_dir = match args.output {
        Some(path) => path,
        None => default_output_dir(&config)?,
    };

    let opts = ExportOptions {
        output_dir: output_dir.clone(),
        dry_run: args.dry_run,
        show_progress: !args.no_progress && !quiet,
    };

    info!("exporting {:?} -> {:?}", args.input, output_dir);

    let ctx = SystemContext::new(config.display_name.clone());
    let summary = export_path(&args.input, &opts, &config, &ctx)
        .context("failed to export conversations")?;

    if summary.written == 0 {
        println!(
            "No conversations produced any output ({} skipped)",
            summary.skipped
        );
    }

    Ok(())
}
