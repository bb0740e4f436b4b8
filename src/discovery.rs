//! Tag discovery for the release train.
//!
//! Selects the leading tag of a stage by version order, confirms explicit
//! tags, and measures how far a tag trails the current history position.
//! Unparseable tags are dropped, never fatal.

use crate::domain::{ReleaseStage, TagCandidate, TagPattern, TagStage, VersionIdentifier};
use crate::git::Repository;
use tracing::{debug, warn};

/// Outcome of a discovery or validation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    Found(TagCandidate),
    NotFound { guidance: String },
}

impl Discovery {
    pub fn is_found(&self) -> bool {
        matches!(self, Discovery::Found(_))
    }
}

/// How far a tag trails the current history position.
///
/// `Unavailable` is distinct from `Behind(0)`: the first means there was no
/// live history to measure against, the second that the tag is at HEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Unavailable,
    Behind(u64),
}

impl Staleness {
    pub fn commits_behind(&self) -> Option<u64> {
        match self {
            Staleness::Unavailable => None,
            Staleness::Behind(n) => Some(*n),
        }
    }

    pub fn is_at_tip(&self) -> bool {
        matches!(self, Staleness::Behind(0))
    }
}

/// Where the candidate tags come from. The two paths are mutually exclusive.
pub enum TagSource<'a> {
    /// Caller-supplied tag list; staleness is always unavailable
    Explicit(Vec<String>),
    /// Tags read from live history, which can also measure staleness
    Live(&'a dyn Repository),
}

/// Split a comma-separated tag list, dropping empty entries
pub fn split_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and filter tags to one stage, keeping input order
pub fn candidates<S: AsRef<str>>(tags: &[S], stage: TagStage) -> Vec<TagCandidate> {
    tags.iter()
        .filter_map(|tag| {
            let candidate = TagCandidate::parse(tag.as_ref());
            if candidate.is_none() {
                debug!(tag = tag.as_ref(), "skipping unparseable tag");
            }
            candidate
        })
        .filter(|candidate| stage.matches(&candidate.version))
        .collect()
}

/// Tags that do not parse as release versions
pub fn unparseable_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref())
        .filter(|tag| VersionIdentifier::parse(tag).is_none())
        .map(str::to_string)
        .collect()
}

/// Highest tag of `stage` under version order
///
/// # Example
/// ```
/// use release_train::discovery::{discover, Discovery};
/// use release_train::domain::TagStage;
///
/// let tags = ["v1.1.23.dev9", "v1.1.23.dev11", "garbage"];
/// match discover(&tags, TagStage::Dev) {
///     Discovery::Found(tag) => assert_eq!(tag.name, "v1.1.23.dev11"),
///     Discovery::NotFound { .. } => unreachable!(),
/// }
/// ```
pub fn discover<S: AsRef<str>>(tags: &[S], stage: TagStage) -> Discovery {
    let highest = candidates(tags, stage)
        .into_iter()
        .max_by(|a, b| a.version.cmp(&b.version));

    match highest {
        Some(candidate) => {
            debug!(tag = %candidate.name, %stage, "discovered highest tag");
            Discovery::Found(candidate)
        }
        None => Discovery::NotFound {
            guidance: stage.guidance().to_string(),
        },
    }
}

/// Confirm that an explicit tag is present verbatim and parses
pub fn validate<S: AsRef<str>>(tags: &[S], target: &str) -> Discovery {
    let present = tags.iter().any(|tag| tag.as_ref() == target);

    match TagCandidate::parse(target) {
        Some(candidate) if present => Discovery::Found(candidate),
        _ => Discovery::NotFound {
            guidance: format!("Tag '{}' not found in tag list.", target),
        },
    }
}

/// Commits landed after `tag`, when live history is available
pub fn staleness(source: &TagSource<'_>, tag: &str) -> Staleness {
    match source {
        TagSource::Explicit(_) => Staleness::Unavailable,
        TagSource::Live(repo) => match repo.commits_behind(tag) {
            Ok(count) => Staleness::Behind(count),
            Err(e) => {
                warn!(tag, error = %e, "could not measure staleness");
                Staleness::Unavailable
            }
        },
    }
}

/// Pick the previous tag of the same kind from tags merged into HEAD.
///
/// Tags must follow the stage's strict naming; the tag of the version being
/// released is skipped. Dev snapshots compare against the nearest tag of any
/// kind, which needs history and is resolved by [`previous_tag`].
pub fn select_previous_tag<S: AsRef<str>>(
    merged_tags: &[S],
    stage: ReleaseStage,
    current_version: &str,
) -> Option<String> {
    let pattern = TagPattern::new(stage);
    let current_tag = TagPattern::format(current_version);

    merged_tags
        .iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| pattern.matches(tag) && *tag != current_tag)
        .filter_map(|tag| TagCandidate::parse(tag))
        .max_by(|a, b| a.version.cmp(&b.version))
        .map(|candidate| candidate.name)
}

/// Previous tag the release notes of `stage` are measured against
pub fn previous_tag<R: Repository + ?Sized>(
    repo: &R,
    stage: ReleaseStage,
    current_version: &str,
) -> Option<String> {
    let result = match stage {
        ReleaseStage::Dev => repo.nearest_tag_before_head(),
        ReleaseStage::Rc | ReleaseStage::Stable => repo
            .tags_merged_into_head()
            .map(|tags| select_previous_tag(&tags, stage, current_version)),
    };

    result.unwrap_or_else(|e| {
        warn!(%stage, error = %e, "could not determine previous tag");
        None
    })
}
