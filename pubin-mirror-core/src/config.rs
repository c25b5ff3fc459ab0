use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

pub const KERNEL_ORG_URL: &str = "https://git.kernel.org/pub/scm/public-inbox";
pub const LORE_URL: &str = "https://lore.kernel.org/lists.html";
pub const GITHUB_URL: &str =
    "https://raw.githubusercontent.com/lfd/mail-archiver/linux-archives/.gitmodules";

/// Run configuration. Every field has a default, so an empty YAML document
/// (or no document at all) reproduces the stock behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    pub sources: SourceUrls,
    pub templates: UrlTemplates,
    pub output: OutputConfig,
    pub retry: RetryPolicy,
    pub blacklist: Blacklist,
}

impl MirrorConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output.dir.display(),
            blacklisted_hosters = self.blacklist.0.len(),
            max_retries = self.retry.max_retries,
            "Loaded MirrorConfig"
        );
        debug!(?self, "MirrorConfig loaded (full debug)");
    }
}

/// Where each provider's index lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceUrls {
    pub kernel_org: String,
    /// Path prefix of the hrefs in the kernel.org listing.
    pub kernel_org_path: String,
    pub lore: String,
    pub github: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            kernel_org: KERNEL_ORG_URL.to_string(),
            kernel_org_path: "/pub/scm/public-inbox/".to_string(),
            lore: LORE_URL.to_string(),
            github: GITHUB_URL.to_string(),
        }
    }
}

/// Bases used when synthesising submodule paths and URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UrlTemplates {
    /// Root under which every submodule is checked out.
    pub path_root: String,
    /// `<base>/<hoster>/<list>/<shard>.git`
    pub kernel_org_base: String,
    /// `<base>/<list>.<hoster>.<shard>`
    pub github_base: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            path_root: "linux/resources/mbox/pubin".to_string(),
            kernel_org_base: "git://git.kernel.org/pub/scm/public-inbox".to_string(),
            github_base: "https://github.com/linux-mailinglist-archives".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub listing_file: String,
    pub gitmodules_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            listing_file: "linux-config".to_string(),
            gitmodules_file: "gitmodules".to_string(),
        }
    }
}

/// Fixed-delay retry: one initial attempt plus up to `max_retries` more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay_secs: 5,
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// `hoster -> list names` that never appear in any output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Blacklist(pub BTreeMap<String, BTreeSet<String>>);

impl Default for Blacklist {
    fn default() -> Self {
        let entries: &[(&str, &[&str])] = &[
            ("kernelnewbies.org", &["kernelnewbies"]),
            ("lists.kernelnewbies.org", &["kernelnewbies"]),
            ("NetBSD.org", &["radiotap"]),
            ("dpdk.org", &["dev"]),
            ("linux.kernel.org", &["keys"]),
            (
                "lists.cip-project.org",
                &["cip-testing", "cip-testing-results"],
            ),
            ("lists.linuxfoundation.org", &["linux-kernel-mentees"]),
            ("lore.kernel.org", &["linux-firmware", "signatures"]),
            (
                "vger.kernel.org",
                &[
                    "backports",
                    "fstests",
                    "linux-trace-users",
                    "linux-kernel",
                    "selinux-refpolicy",
                    "git",
                    "linux-rt-users",
                ],
            ),
        ];
        Blacklist(
            entries
                .iter()
                .map(|(hoster, lists)| {
                    (
                        hoster.to_string(),
                        lists.iter().map(|l| l.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl Blacklist {
    pub fn contains(&self, hoster: &str, list: &str) -> bool {
        self.0
            .get(hoster)
            .is_some_and(|lists| lists.contains(list))
    }

    /// Drop blacklisted names from `lists`, preserving order.
    pub fn retain<'a, I>(&self, hoster: &str, lists: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lists
            .into_iter()
            .filter(|list| !self.contains(hoster, list))
            .collect()
    }
}
