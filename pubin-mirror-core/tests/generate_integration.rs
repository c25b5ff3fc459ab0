use std::collections::HashMap;
use std::fs;

use pubin_mirror_core::config::{MirrorConfig, GITHUB_URL, KERNEL_ORG_URL, LORE_URL};
use pubin_mirror_core::contract::MockFetcher;
use pubin_mirror_core::error::{FetchError, GenerateError};
use pubin_mirror_core::generate::generate;
use tempfile::tempdir;

const KERNEL_ORG_PAGE: &str = r#"<html><body><table>
<tr><td><a title="vger.kernel.org/netdev/0.git" href="/pub/scm/public-inbox/vger.kernel.org/netdev/0.git/">0.git</a></td></tr>
<tr><td><a title="vger.kernel.org/netdev/1.git" href="/pub/scm/public-inbox/vger.kernel.org/netdev/1.git/">1.git</a></td></tr>
<tr><td><a title="vger.kernel.org/linux-kernel/0.git" href="/pub/scm/public-inbox/vger.kernel.org/linux-kernel/0.git/">0.git</a></td></tr>
</table></body></html>"#;

const LORE_INDEX: &str = r#"<html><body><table>
<tr><td><a href="https://lore.kernel.org/netdev/">netdev</a></td><td>netdev.vger.kernel.org</td></tr>
<tr><td><a href="https://lore.kernel.org/bpf/">bpf</a></td><td>bpf.vger.kernel.org</td></tr>
<tr><td><a href="https://lore.kernel.org/signatures/">signatures</a></td><td>signatures.lore.kernel.org</td></tr>
</table></body></html>"#;

const LORE_NETDEV: &str = "<pre>\n\tgit clone --mirror https://lore.kernel.org/netdev/0 netdev/git/0.git\n\tgit clone --mirror https://lore.kernel.org/netdev/1 netdev/git/1.git\n\tgit clone --mirror https://lore.kernel.org/netdev/2 netdev/git/2.git\n</pre>";

const LORE_BPF: &str = "<pre>\n\tgit clone --mirror https://lore.kernel.org/bpf/0 bpf/git/0.git\n</pre>";

const LORE_SIGNATURES: &str = "<pre>\n\tgit clone --mirror https://lore.kernel.org/signatures/0 signatures/git/0.git\n</pre>";

const GITMODULES: &str = "\
[submodule \"archives/users.dpdk.org.0\"]
\tpath = archives/users.dpdk.org.0
[submodule \"archives/users.dpdk.org.1\"]
\tpath = archives/users.dpdk.org.1
[submodule \"archives/dev.dpdk.org.0\"]
\tpath = archives/dev.dpdk.org.0
[submodule \"archives/bpf.vger.kernel.org.4\"]
\tpath = archives/bpf.vger.kernel.org.4
";

fn pages() -> HashMap<String, String> {
    [
        (KERNEL_ORG_URL, KERNEL_ORG_PAGE),
        (LORE_URL, LORE_INDEX),
        ("https://lore.kernel.org/netdev/", LORE_NETDEV),
        ("https://lore.kernel.org/bpf/", LORE_BPF),
        ("https://lore.kernel.org/signatures/", LORE_SIGNATURES),
        (GITHUB_URL, GITMODULES),
    ]
    .into_iter()
    .map(|(url, body)| (url.to_string(), body.to_string()))
    .collect()
}

fn canned_fetcher(pages: HashMap<String, String>) -> MockFetcher {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().returning(move |url| {
        pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::RetriesExhausted {
                url: url.to_string(),
                attempts: 6,
                last_status: Some(404),
            })
    });
    fetcher
}

const EXPECTED_LISTING: &str = "
\"dpdk.org\" = [
\t\"users\",
]

\"vger.kernel.org\" = [
\t\"bpf\",
\t\"netdev\",
]
";

#[tokio::test]
async fn generate_writes_listing_and_gitmodules() {
    let out = tempdir().unwrap();
    let mut config = MirrorConfig::default();
    config.output.dir = out.path().to_path_buf();

    let report = generate(&config, &canned_fetcher(pages()))
        .await
        .expect("generate should succeed with canned pages");

    let listing = fs::read_to_string(&report.listing_path).unwrap();
    assert_eq!(listing, EXPECTED_LISTING);
    assert_eq!(report.retained_hosters, 2);

    let gitmodules = fs::read_to_string(&report.gitmodules_path).unwrap();

    // netdev is owned by git.kernel.org (max shard 1 there), not lore (max 2).
    assert!(gitmodules.contains(
        "[submodule \"linux/resources/mbox/pubin/vger.kernel.org/netdev/1.git\"]\n\
         \tpath = linux/resources/mbox/pubin/vger.kernel.org/netdev/1.git\n\
         \turl = git://git.kernel.org/pub/scm/public-inbox/vger.kernel.org/netdev/1.git\n"
    ));
    assert!(!gitmodules.contains("netdev/2.git"));

    // bpf comes from lore (first in priority after kernel.org), one shard.
    assert!(gitmodules.contains("\turl = https://lore.kernel.org/bpf/0\n"));
    assert!(!gitmodules.contains("bpf.vger.kernel.org.4"));

    // users.dpdk.org from GitHub, shards 0..=1.
    assert!(gitmodules
        .contains("\turl = https://github.com/linux-mailinglist-archives/users.dpdk.org.1\n"));

    // Blacklisted pairs are absent from both files.
    for banned in ["linux-kernel", "signatures", "dpdk.org/dev", "dev.dpdk.org"] {
        assert!(!gitmodules.contains(banned), "{banned} leaked into gitmodules");
        assert!(!listing.contains(banned), "{banned} leaked into listing");
    }

    let submodules: usize = report.providers.iter().map(|p| p.submodules).sum();
    assert_eq!(gitmodules.matches("[submodule ").count(), submodules);
    // netdev 0..=1, bpf 0, users 0..=1
    assert_eq!(submodules, 5);
}

#[tokio::test]
async fn output_is_byte_identical_across_runs() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();

    let mut config = MirrorConfig::default();
    config.output.dir = first.path().to_path_buf();
    let a = generate(&config, &canned_fetcher(pages())).await.unwrap();
    config.output.dir = second.path().to_path_buf();
    let b = generate(&config, &canned_fetcher(pages())).await.unwrap();

    assert_eq!(
        fs::read(&a.gitmodules_path).unwrap(),
        fs::read(&b.gitmodules_path).unwrap()
    );
    assert_eq!(
        fs::read(&a.listing_path).unwrap(),
        fs::read(&b.listing_path).unwrap()
    );
}

#[tokio::test]
async fn fetch_failure_aborts_without_writing() {
    let out = tempdir().unwrap();
    let mut config = MirrorConfig::default();
    config.output.dir = out.path().to_path_buf();

    let mut pages = pages();
    pages.remove(GITHUB_URL);

    let err = generate(&config, &canned_fetcher(pages)).await.unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Fetch(FetchError::RetriesExhausted { .. })
    ));
    assert!(!out.path().join("gitmodules").exists());
    assert!(!out.path().join("linux-config").exists());
}

#[tokio::test]
async fn custom_blacklist_replaces_defaults() {
    let out = tempdir().unwrap();
    let config: MirrorConfig = serde_json::from_value(serde_json::json!({
        "output": { "dir": out.path() },
        "blacklist": { "vger.kernel.org": ["bpf"] }
    }))
    .unwrap();

    let report = generate(&config, &canned_fetcher(pages())).await.unwrap();
    let listing = fs::read_to_string(&report.listing_path).unwrap();

    assert!(listing.contains("\t\"linux-kernel\",\n"));
    assert!(listing.contains("\t\"dev\",\n"));
    assert!(!listing.contains("\"bpf\""));
}

#[tokio::test]
async fn lore_list_without_clone_instructions_is_omitted() {
    let out = tempdir().unwrap();
    let mut config = MirrorConfig::default();
    config.output.dir = out.path().to_path_buf();

    let quiet_row = "<tr><td><a href=\"https://lore.kernel.org/quiet/\">quiet</a></td>\
                     <td>quiet.example.org</td></tr>\n</table>";
    let mut pages = pages();
    pages.insert(LORE_URL.to_string(), LORE_INDEX.replace("</table>", quiet_row));
    pages.insert(
        "https://lore.kernel.org/quiet/".to_string(),
        "<pre>\n</pre>".to_string(),
    );

    let report = generate(&config, &canned_fetcher(pages))
        .await
        .expect("a list without clone instructions must not abort generation");

    let listing = fs::read_to_string(&report.listing_path).unwrap();
    let gitmodules = fs::read_to_string(&report.gitmodules_path).unwrap();
    assert_eq!(listing, EXPECTED_LISTING);
    assert!(!listing.contains("example.org"));
    assert!(!gitmodules.contains("example.org"));
    assert!(!gitmodules.contains("quiet"));
    assert_eq!(report.retained_hosters, 2);
}
