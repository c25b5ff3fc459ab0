//! High-level pipeline: harvest → merge → render → write.
//!
//! # Responsibilities
//! - Harvest the three providers through the given [`Fetcher`], sequentially
//! - Merge them in priority order and apply the blacklist
//! - Render the listing and the submodule document
//! - Overwrite both output files, only once everything above succeeded
//!
//! # Error Handling
//! The first failure aborts the run; nothing is written unless harvesting
//! and rendering both succeeded.
//!
//! # Navigation
//! - Main entrypoint: [`generate`]
//! - Network-free part: [`render`]

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::config::MirrorConfig;
use crate::contract::Fetcher;
use crate::error::GenerateError;
use crate::harvest::harvest_all;
use crate::manifest::{render_gitmodules, render_listing, ProviderSummary};
use crate::merge::{merge, retained};
use crate::model::Harvest;

/// Both documents, ready to be written.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub listing: String,
    pub gitmodules: String,
    pub providers: Vec<ProviderSummary>,
    pub retained_hosters: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub providers: Vec<ProviderSummary>,
    pub listing_path: PathBuf,
    pub gitmodules_path: PathBuf,
    pub retained_hosters: usize,
}

/// Merge and render already harvested data.
pub fn render(config: &MirrorConfig, harvest: &Harvest) -> Result<Rendered, GenerateError> {
    let assignment = merge(harvest);
    let kept = retained(&assignment, &config.blacklist);
    let listing = render_listing(&kept);
    let (gitmodules, providers) =
        render_gitmodules(&config.templates, &config.blacklist, harvest, &assignment)?;

    for summary in &providers {
        info!(
            provider = %summary.provider,
            hosters = summary.hosters,
            lists = summary.lists,
            submodules = summary.submodules,
            "Rendered provider section"
        );
    }

    Ok(Rendered {
        listing,
        gitmodules,
        providers,
        retained_hosters: kept.len(),
    })
}

fn write_output(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| {
        error!(error = ?source, path = %path.display(), "Failed to write output file");
        GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}

/// Run the whole pipeline and write both files into `config.output.dir`.
pub async fn generate<F>(
    config: &MirrorConfig,
    fetcher: &F,
) -> Result<GenerateReport, GenerateError>
where
    F: Fetcher + ?Sized,
{
    info!("[GENERATE] Starting harvest");
    let harvest = harvest_all(fetcher, &config.sources).await.map_err(|e| {
        error!(error = %e, "[GENERATE][ERROR] Harvest failed");
        e
    })?;

    let rendered = render(config, &harvest)?;
    let retained_hosters = rendered.retained_hosters;

    let dir = &config.output.dir;
    fs::create_dir_all(dir).map_err(|source| GenerateError::Io {
        path: dir.clone(),
        source,
    })?;
    let listing_path = dir.join(&config.output.listing_file);
    let gitmodules_path = dir.join(&config.output.gitmodules_file);
    write_output(&listing_path, &rendered.listing)?;
    write_output(&gitmodules_path, &rendered.gitmodules)?;

    info!(retained_hosters, "[GENERATE] Done");
    Ok(GenerateReport {
        providers: rendered.providers,
        listing_path,
        gitmodules_path,
        retained_hosters,
    })
}
