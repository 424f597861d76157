use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use threadmark_core::ThreadmarkConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init(InitArgs),
    /// Show config file path
    Path,
    /// Print the effective configuration
    Show,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Path => {
            println!("{}", ThreadmarkConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Show => run_show(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let path = ThreadmarkConfig::config_path();

    if path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    ThreadmarkConfig::default()
        .save()
        .context("failed to write config")?;
    println!("Wrote default config to {}", path.display());

    Ok(())
}

fn run_show() -> Result<()> {
    let config = ThreadmarkConfig::load().context("failed to load config")?;
    let rendered = toml::to_string_pretty(&config).context("failed to render config")?;
    print!("{rendered}");

    Ok(())
}
