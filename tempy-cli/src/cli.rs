use anyhow::{Context, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tempy_core::{
    RawConfig, RcStore, ResolvedConfig, TempyError, WeatherProvider, normalize, provider_for,
    resolve,
};

use crate::render::TextReport;

pub const USAGE: &str = "tempy <location> <optional args>";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "tempy",
    version,
    override_usage = USAGE,
    about = "Render current and near future weather data to your terminal"
)]
pub struct Cli {
    /// City name or US/UK/Canadian postal code. Multiple words are joined with spaces.
    pub location: Vec<String>,

    /// Measurement system; falls back to the rc file, then imperial.
    #[arg(short, long, value_parser = ["imperial", "metric"])]
    pub units: Option<String>,

    /// weatherapi.com API key. Without one, requests go through the public proxy.
    #[arg(short = 'k', long = "key", default_value = "")]
    pub api_key: String,

    /// rc file to read instead of the one in the user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the resolved location, units and key back to the rc file.
    #[arg(long)]
    pub save: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Options in the same shape as the rc file; absent values are empty.
    pub fn raw(&self) -> RawConfig {
        RawConfig {
            location: self.location.join(" "),
            units: self.units.clone().unwrap_or_default(),
            api_key: self.api_key.clone(),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;
        let provider = provider_for(&config)?;
        let output = self.report(&config, provider.as_ref()).await?;

        print!("{output}");
        Ok(())
    }

    /// Load the rc file, merge the command line over it, and persist the result on `--save`.
    fn resolve_config(&self) -> anyhow::Result<ResolvedConfig> {
        let rc_path = match &self.config {
            Some(path) => path.clone(),
            None => RcStore::default_path()?,
        };
        tracing::debug!(path = %rc_path.display(), "using rc file");

        let rc = RcStore::load(&rc_path)
            .with_context(|| format!("Failed to load rc file {}", rc_path.display()))?;
        let config = resolve(&rc, &self.raw()).map_err(|err| match err {
            TempyError::MissingLocation => anyhow!("{err}. Usage: {USAGE}"),
            err => err.into(),
        })?;

        if self.save {
            RcStore::save(&rc_path, &config)
                .with_context(|| format!("Failed to save rc file {}", rc_path.display()))?;
            tracing::info!(path = %rc_path.display(), "saved configuration");
        }

        Ok(config)
    }

    /// Fetch and normalize the weather, formatted as text or JSON.
    async fn report(
        &self,
        config: &ResolvedConfig,
        provider: &dyn WeatherProvider,
    ) -> anyhow::Result<String> {
        let payload = provider
            .fetch(&config.location)
            .await
            .with_context(|| format!("Failed to fetch weather from {}", provider.id()))?;
        let report = normalize(&payload, config.units).context("Failed to read weather data")?;

        if self.json {
            Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
        } else {
            Ok(TextReport(&report).to_string())
        }
    }
}
