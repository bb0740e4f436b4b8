//! Command workflows behind the release-train binary

pub mod orchestration;

pub use orchestration::{
    run_bump_version, run_changelog, run_discover, BumpRequest, ChangelogOutcome,
    ChangelogRequest, DiscoverOutcome, DiscoverRequest, DiscoveryReport,
};
