#![doc = "pubin-mirror-core: core logic library for pubin-mirror."]

//! Harvests which mailing-list archives are publicly mirrored (git.kernel.org,
//! lore.kernel.org, GitHub), merges them and renders a submodule manifest plus
//! a hoster/list listing.
//!
//! # Usage
//! Build a [`config::MirrorConfig`], pick a [`contract::Fetcher`] (normally
//! [`fetch::HttpFetcher`]) and call [`generate::generate`].

pub mod config;
pub mod contract;
pub mod error;
pub mod fetch;
pub mod generate;
pub mod harvest;
pub mod manifest;
pub mod merge;
pub mod model;
