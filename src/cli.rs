use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use logo_fetcher::{config, Downloader, FetchConfig, LogoRegistry};

/// Download the platform logos used by the mobile app, overwriting existing files.
#[derive(Debug, Parser)]
#[command(name = "logo-fetcher", version, about, long_about = None)]
pub struct Cli {
    /// Directory to write the logos into.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// TOML file with `directory`, `timeout_secs` and `user_agent` keys.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the registry and exit without downloading.
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let registry = LogoRegistry::platform_logos();

        if self.list {
            for entry in &registry {
                println!("{}\t{}", entry.filename, entry.url);
            }
            return Ok(());
        }

        let cfg = self.resolve_config()?;

        tracing::debug!(?cfg, "resolved configuration");

        // Per-entry failures are already reported; only setup errors reach here.
        Downloader::new(&cfg).run(&registry)?;

        Ok(())
    }

    /// Defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<FetchConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load(path)?,
            None => FetchConfig::default(),
        };

        if let Some(dir) = &self.dir {
            cfg.directory = dir.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            cfg.user_agent = user_agent.clone();
        }

        cfg.validate()?;
        Ok(cfg)
    }
}
