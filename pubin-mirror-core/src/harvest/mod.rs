//! Harvesters: one per provider, each turning a remote index into a [`ShardMap`].
//!
//! All of them go through a [`Fetcher`], so they share its retry behaviour
//! and can be driven by canned pages in tests.

pub mod github;
pub mod html;
pub mod kernel_org;
pub mod lore;

use tracing::info;

use crate::config::SourceUrls;
use crate::contract::Fetcher;
use crate::error::FetchError;
use crate::model::{Harvest, ShardMap};

/// Harvest all providers, one after the other, in priority order.
pub async fn harvest_all<F>(fetcher: &F, sources: &SourceUrls) -> Result<Harvest, FetchError>
where
    F: Fetcher + ?Sized,
{
    let kernel_org = kernel_org::harvest(fetcher, sources).await?;
    let lore = lore::harvest(fetcher, sources).await?;
    let github = github::harvest(fetcher, sources).await?;

    let harvest = Harvest {
        kernel_org,
        lore: lore.shards,
        github,
        lore_prefixes: lore.prefixes,
    };
    info!(
        kernel_org_lists = list_count(&harvest.kernel_org),
        lore_lists = list_count(&harvest.lore),
        github_lists = list_count(&harvest.github),
        "Harvest complete"
    );
    Ok(harvest)
}

pub fn list_count(shards: &ShardMap) -> usize {
    shards.values().map(|lists| lists.len()).sum()
}
