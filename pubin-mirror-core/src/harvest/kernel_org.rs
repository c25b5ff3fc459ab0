//! git.kernel.org public-inbox directory listing.
//!
//! Every shard shows up as a titled link `<prefix><hoster>/<list>/<N>.git/`.

use tracing::{debug, info};

use super::html;
use crate::config::SourceUrls;
use crate::contract::Fetcher;
use crate::error::FetchError;
use crate::model::{record_shard, ShardMap};

pub async fn harvest<F>(fetcher: &F, sources: &SourceUrls) -> Result<ShardMap, FetchError>
where
    F: Fetcher + ?Sized,
{
    let page = fetcher.fetch(&sources.kernel_org).await?;
    let shards = parse_listing(&page, &sources.kernel_org_path);
    info!(
        provider = "git.kernel.org",
        hosters = shards.len(),
        "Harvested directory listing"
    );
    Ok(shards)
}

pub fn parse_listing(page: &str, path_prefix: &str) -> ShardMap {
    let mut shards = ShardMap::new();

    for attrs in html::anchors(page) {
        if !attrs.contains_key("title") {
            continue;
        }
        let Some(href) = attrs.get("href") else {
            continue;
        };
        let Some(rel) = href.strip_prefix(path_prefix) else {
            continue;
        };
        let rel = rel.strip_suffix('/').unwrap_or(rel);
        let parts: Vec<&str> = rel.split('/').collect();
        let [hoster, list, shard] = parts.as_slice() else {
            continue;
        };
        let shard = shard.strip_suffix(".git").unwrap_or(*shard);
        match shard.parse::<u32>() {
            Ok(shard) => record_shard(&mut shards, hoster, list, shard),
            Err(_) => debug!(href = %href, "Skipping listing entry without numeric shard"),
        }
    }

    shards
}
