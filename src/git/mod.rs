//! Git history abstraction layer
//!
//! This module provides a trait-based abstraction over the history queries
//! release-train needs, allowing for multiple implementations including real
//! Git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Discovery and changelog workflows depend on the trait rather than on
//! `git2`, so the version-ordering and classification logic never touches I/O.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use crate::domain::CommitRecord;

/// History queries for tag discovery and release notes
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseTrainError].
pub trait Repository {
    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Number of commits reachable from HEAD that are not reachable from `tag`
    ///
    /// # Returns
    /// * `Ok(0)` - The tag points at HEAD (or HEAD is behind it)
    /// * `Ok(n)` - `n` commits landed after the tag
    /// * `Err` - If the tag or HEAD cannot be resolved
    fn commits_behind(&self, tag: &str) -> Result<u64>;

    /// Tags whose commit is HEAD or an ancestor of HEAD
    fn tags_merged_into_head(&self) -> Result<Vec<String>>;

    /// Closest tag of any kind reachable from HEAD's first parent
    ///
    /// Mirrors `git describe --tags --abbrev=0 HEAD^`; `Ok(None)` when HEAD
    /// has no parent or no tag is reachable.
    fn nearest_tag_before_head(&self) -> Result<Option<String>>;

    /// Non-merge commits after `since_tag` up to HEAD, newest first
    ///
    /// When `since_tag` is `None`, every commit reachable from HEAD is returned.
    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitRecord>>;
}
