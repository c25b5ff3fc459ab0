//! Shared data model: providers and the hoster/list/shard maps every stage passes around.
//!
//! All maps are ordered (`BTreeMap`) so that rendering is deterministic: the
//! same harvested data always produces byte-identical output files.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// `hoster -> list -> highest shard index seen`.
pub type ShardMap = BTreeMap<String, BTreeMap<String, u32>>;

/// `hoster -> list -> provider owning the pair` after merging.
pub type Assignment = BTreeMap<String, BTreeMap<String, Provider>>;

/// One of the fixed remote data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Provider {
    #[serde(rename = "git.kernel.org")]
    GitKernelOrg,
    #[serde(rename = "lore.kernel.org")]
    LoreKernelOrg,
    #[serde(rename = "github.com")]
    GitHub,
}

impl Provider {
    /// Providers in merge priority order. The first provider reporting a
    /// hoster/list pair owns it.
    pub const PRIORITY: [Provider; 3] = [
        Provider::GitKernelOrg,
        Provider::LoreKernelOrg,
        Provider::GitHub,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GitKernelOrg => "git.kernel.org",
            Provider::LoreKernelOrg => "lore.kernel.org",
            Provider::GitHub => "github.com",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record `shard` for `hoster/list`, keeping the maximum.
pub fn record_shard(map: &mut ShardMap, hoster: &str, list: &str, shard: u32) {
    let entry = map
        .entry(hoster.to_string())
        .or_default()
        .entry(list.to_string())
        .or_insert(0);
    *entry = (*entry).max(shard);
}

/// Everything harvested from the three providers in one run.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub kernel_org: ShardMap,
    pub lore: ShardMap,
    pub github: ShardMap,
    /// Lore clone URL prefixes keyed by `(hoster, list)`; a shard URL is
    /// the prefix with the shard number appended.
    pub lore_prefixes: BTreeMap<(String, String), String>,
}

impl Harvest {
    pub fn shards(&self, provider: Provider) -> &ShardMap {
        match provider {
            Provider::GitKernelOrg => &self.kernel_org,
            Provider::LoreKernelOrg => &self.lore,
            Provider::GitHub => &self.github,
        }
    }
}
