//! Merge per-provider shard maps into one hoster/list assignment and slice it back up.

use std::collections::BTreeMap;

use crate::config::Blacklist;
use crate::model::{Assignment, Harvest, Provider, ShardMap};

/// Tag every hoster/list pair of `shards` that `assignment` does not know yet
/// with `provider`. Pairs already present keep their owner.
pub fn fill_missing(assignment: &mut Assignment, shards: &ShardMap, provider: Provider) {
    for (hoster, lists) in shards {
        let owned = assignment.entry(hoster.clone()).or_default();
        for list in lists.keys() {
            owned.entry(list.clone()).or_insert(provider);
        }
    }
}

/// Fold all providers of a harvest in priority order.
pub fn merge(harvest: &Harvest) -> Assignment {
    let mut assignment = Assignment::new();
    for provider in Provider::PRIORITY {
        fill_missing(&mut assignment, harvest.shards(provider), provider);
    }
    assignment
}

/// `hoster -> sorted lists` owned by `provider`. Hosters with no list for
/// this provider are left out.
pub fn split_provider(assignment: &Assignment, provider: Provider) -> BTreeMap<&str, Vec<&str>> {
    let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (hoster, lists) in assignment {
        for (list, owner) in lists {
            if *owner == provider {
                out.entry(hoster.as_str()).or_default().push(list.as_str());
            }
        }
    }
    out
}

/// Every hoster with its non-blacklisted lists, sorted. Hosters left
/// empty by the blacklist are dropped.
pub fn retained<'a>(
    assignment: &'a Assignment,
    blacklist: &Blacklist,
) -> BTreeMap<&'a str, Vec<&'a str>> {
    assignment
        .iter()
        .filter_map(|(hoster, lists)| {
            let kept = blacklist.retain(hoster, lists.keys().map(String::as_str));
            (!kept.is_empty()).then_some((hoster.as_str(), kept))
        })
        .collect()
}
