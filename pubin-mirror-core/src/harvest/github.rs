//! The `.gitmodules` of the GitHub mail-archiver mirror.
//!
//! Submodules live at `archives/<list>.<hoster>.<shard>`.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};

use crate::config::SourceUrls;
use crate::contract::Fetcher;
use crate::error::FetchError;
use crate::model::{record_shard, ShardMap};

/// Project whose list name itself contains dots.
const BATMAN: &str = "b.a.t.m.a.n.lists.open-mesh.org.0";

pub async fn harvest<F>(fetcher: &F, sources: &SourceUrls) -> Result<ShardMap, FetchError>
where
    F: Fetcher + ?Sized,
{
    let manifest = fetcher.fetch(&sources.github).await?;
    let shards = parse_gitmodules(&manifest);
    info!(
        provider = "github.com",
        hosters = shards.len(),
        "Harvested submodule manifest"
    );
    Ok(shards)
}

fn project_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^.]+)\.(.+)\.(\d+)$").expect("static regex is valid"))
}

pub fn parse_gitmodules(manifest: &str) -> ShardMap {
    let mut shards = ShardMap::new();

    for line in manifest.lines() {
        let Some(project) = line.strip_prefix("\tpath = archives/") else {
            continue;
        };
        let project = project.trim_end();
        if project.starts_with("ASSORTED") {
            continue;
        }

        let (list, hoster, shard) = if project == BATMAN {
            ("b.a.t.m.a.n", "lists.open-mesh.org", "0")
        } else {
            let Some(cap) = project_re().captures(project) else {
                warn!(project, "Unrecognised archive path, skipping");
                continue;
            };
            let (_, [list, hoster, shard]) = cap.extract();
            (list, hoster, shard)
        };

        match shard.parse::<u32>() {
            Ok(shard) => record_shard(&mut shards, hoster, list, shard),
            Err(e) => warn!(project, error = %e, "Shard out of range, skipping"),
        }
    }

    shards
}
