//! Rendering of the two output documents: the hoster/list listing and the
//! submodule declarations.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{Blacklist, UrlTemplates};
use crate::error::GenerateError;
use crate::merge::split_provider;
use crate::model::{Assignment, Harvest, Provider};

const RULE: &str = "##################################################";

/// One `[submodule]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    pub path: String,
    pub url: String,
}

impl Submodule {
    fn write_lines(&self, lines: &mut Vec<String>) {
        lines.push(format!("[submodule \"{}\"]", self.path));
        lines.push(format!("\tpath = {}", self.path));
        lines.push(format!("\turl = {}", self.url));
    }
}

/// What was emitted for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub provider: Provider,
    pub hosters: usize,
    pub lists: usize,
    pub submodules: usize,
}

/// Nested listing of retained `hoster -> lists`.
///
/// ```text
///
/// "vger.kernel.org" = [
/// 	"netdev",
/// ]
/// ```
pub fn render_listing(retained: &BTreeMap<&str, Vec<&str>>) -> String {
    let mut out = String::new();
    for (hoster, lists) in retained {
        let _ = write!(out, "\n\"{hoster}\" = [\n");
        for list in lists {
            let _ = writeln!(out, "\t\"{list}\",");
        }
        out.push_str("]\n");
    }
    out
}

/// Build the submodule for one shard of `hoster/list` as served by `provider`.
pub fn submodule(
    templates: &UrlTemplates,
    harvest: &Harvest,
    provider: Provider,
    hoster: &str,
    list: &str,
    shard: u32,
) -> Result<Submodule, GenerateError> {
    let path = format!("{}/{hoster}/{list}/{shard}.git", templates.path_root);
    let url = match provider {
        Provider::GitKernelOrg => {
            format!("{}/{hoster}/{list}/{shard}.git", templates.kernel_org_base)
        }
        Provider::LoreKernelOrg => {
            let prefix = harvest
                .lore_prefixes
                .get(&(hoster.to_string(), list.to_string()))
                .ok_or_else(|| GenerateError::MissingClonePrefix {
                    hoster: hoster.to_string(),
                    list: list.to_string(),
                })?;
            format!("{prefix}{shard}")
        }
        Provider::GitHub => format!("{}/{list}.{hoster}.{shard}", templates.github_base),
    };
    Ok(Submodule { path, url })
}

/// Render the submodule document: a banner per provider, then a section per
/// hoster with one block per shard `0..=max` of every retained list.
pub fn render_gitmodules(
    templates: &UrlTemplates,
    blacklist: &Blacklist,
    harvest: &Harvest,
    assignment: &Assignment,
) -> Result<(String, Vec<ProviderSummary>), GenerateError> {
    let mut lines: Vec<String> = Vec::new();
    let mut summaries = Vec::new();

    for provider in Provider::PRIORITY {
        let mut summary = ProviderSummary {
            provider,
            hosters: 0,
            lists: 0,
            submodules: 0,
        };
        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push(format!("# Linux Public Inboxes hosted by {provider}"));
        lines.push(RULE.to_string());

        let shards = harvest.shards(provider);
        for (hoster, lists) in split_provider(assignment, provider) {
            let lists = blacklist.retain(hoster, lists);
            if lists.is_empty() {
                continue;
            }
            summary.hosters += 1;

            lines.push(String::new());
            lines.push(format!("## {hoster}"));
            for list in lists {
                summary.lists += 1;
                let max = shards
                    .get(hoster)
                    .and_then(|l| l.get(list))
                    .copied()
                    .unwrap_or(0);
                for shard in 0..=max {
                    submodule(templates, harvest, provider, hoster, list, shard)?
                        .write_lines(&mut lines);
                    summary.submodules += 1;
                }
            }
        }
        summaries.push(summary);
    }

    let mut doc = lines.join("\n");
    doc.push('\n');
    Ok((doc, summaries))
}
