//! lore.kernel.org: a list index, then one page per list carrying its
//! `git clone --mirror` instructions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;
use tracing::{info, warn};

use super::html;
use crate::config::SourceUrls;
use crate::contract::Fetcher;
use crate::error::FetchError;
use crate::model::{record_shard, ShardMap};

/// A list announced by the lore index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoreList {
    pub list: String,
    pub hoster: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoreHarvest {
    pub shards: ShardMap,
    /// `(hoster, list) -> clone URL prefix`
    pub prefixes: BTreeMap<(String, String), String>,
}

pub async fn harvest<F>(fetcher: &F, sources: &SourceUrls) -> Result<LoreHarvest, FetchError>
where
    F: Fetcher + ?Sized,
{
    let index = fetcher.fetch(&sources.lore).await?;
    let lists = parse_index(&index, &sources.lore);
    info!(provider = "lore.kernel.org", lists = lists.len(), "Parsed list index");

    let mut out = LoreHarvest::default();
    for entry in lists {
        info!(
            hoster = %entry.hoster,
            list = %entry.list,
            "Working on {} - {}",
            entry.hoster,
            entry.list
        );
        let page = fetcher.fetch(&entry.url).await?;
        match parse_clone_instructions(&page) {
            Some((prefix, max_shard)) => {
                record_shard(&mut out.shards, &entry.hoster, &entry.list, max_shard);
                out.prefixes.insert((entry.hoster, entry.list), prefix);
            }
            None => warn!(
                hoster = %entry.hoster,
                list = %entry.list,
                url = %entry.url,
                "No clone instructions found, skipping list"
            ),
        }
    }

    Ok(out)
}

/// Rows of the index whose text reads `<list>.<hoster>` and that link to
/// the list's page. Relative links are resolved against `base`.
pub fn parse_index(page: &str, base: &str) -> Vec<LoreList> {
    let base = Url::parse(base).ok();

    html::table_rows(page)
        .into_iter()
        .filter_map(|row| {
            let (href, text) = (row.href?, row.text?);
            let (list, hoster) = text.split_once('.')?;
            let url = match &base {
                Some(base) => match base.join(&href) {
                    Ok(url) => url.to_string(),
                    Err(e) => {
                        warn!(href = %href, error = %e, "Unresolvable list link");
                        return None;
                    }
                },
                None => href,
            };
            Some(LoreList {
                list: list.to_string(),
                hoster: hoster.to_string(),
                url,
            })
        })
        .collect()
}

fn clone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\tgit clone --mirror (\S+?)(\d+)\s").expect("static regex is valid")
    })
}

/// Scan the last `<pre>` block of a list page. Returns the clone prefix of
/// the last instruction and the highest shard number seen.
pub fn parse_clone_instructions(page: &str) -> Option<(String, u32)> {
    let text = html::last_pre_text(page)?;
    let mut found: Option<(String, u32)> = None;

    for line in text.lines() {
        let Some(cap) = clone_re().captures(line) else {
            continue;
        };
        let Ok(shard) = cap[2].parse::<u32>() else {
            continue;
        };
        let max = found.as_ref().map_or(shard, |(_, max)| shard.max(*max));
        found = Some((cap[1].to_string(), max));
    }

    found
}
