/// CLI glue for pubin-mirror: argument parsing and invocation of the core pipeline.
///
/// All harvesting, merging and rendering lives in [`pubin-mirror-core`]; this
/// module only turns arguments into a [`MirrorConfig`], builds the HTTP
/// fetcher and reports the outcome.
///
/// For programmatic or integration use, call [`run`] with a constructed [`Cli`].
///
/// [`pubin-mirror-core`]: ../../pubin-mirror-core/
use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use pubin_mirror_core::config::MirrorConfig;
use pubin_mirror_core::fetch::HttpFetcher;
use pubin_mirror_core::generate::generate;
use std::path::PathBuf;

/// CLI for pubin-mirror: generate submodule manifests for mirrored mailing-list archives.
#[derive(Parser)]
#[clap(
    name = "pubin-mirror",
    version,
    about = "Enumerate mirrored mailing-list archives and generate a submodule manifest"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest all providers and write the listing and gitmodules files
    Generate {
        /// Optional YAML file overriding the built-in defaults
        #[clap(long)]
        config: Option<PathBuf>,
        /// Directory to write the output files into (overrides the config)
        #[clap(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Resolve the effective configuration for `generate`.
pub fn resolve_config(
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<MirrorConfig> {
    let mut config = match config {
        Some(path) => load_config(path)?,
        None => MirrorConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    config.trace_loaded();
    Ok(config)
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { config, output_dir } => {
            let config = resolve_config(config, output_dir)?;
            tracing::info!(command = "generate", "Starting generation");
            let fetcher = HttpFetcher::new(config.retry.clone())?;
            match generate(&config, &fetcher).await {
                Ok(report) => {
                    tracing::info!(command = "generate", ?report, "Generation complete");
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "generate", error = %e, "Generation failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
