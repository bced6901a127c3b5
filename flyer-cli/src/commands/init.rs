//! `flyer init [--api-base <url>] [--force]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use flyer_core::{config, FlyerConfig};

/// Write a default configuration file.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Base URL of the flyer service (default: http://localhost:4000/api).
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home = config::home().context("could not determine home directory")?;
        let path = config::config_path_at(&home);
        if path.exists() && !self.force {
            println!("Config already exists at {} (use --force to overwrite)", path.display());
            return Ok(());
        }

        let mut settings = FlyerConfig::default();
        if let Some(base) = self.api_base {
            settings.api_base = base;
        }
        let path = config::save_at(&home, &settings)
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        println!("{} Wrote {}", "✓".green(), path.display());
        println!("  api_base: {}", settings.api_base);
        Ok(())
    }
}
