//! Workflow orchestration for the release-train subcommands
//!
//! Each workflow takes plain request structs rather than clap types, so the
//! binary stays a thin shell over argument parsing and exit codes and the
//! workflows can be driven directly from tests.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use crate::analyzer::CommitCategorizer;
use crate::boundary::BoundaryWarning;
use crate::changelog::{ChangelogDocument, ReleaseContext};
use crate::config::Config;
use crate::discovery::{self, Discovery, Staleness, TagSource};
use crate::domain::{ReleaseStage, TagCandidate, TagStage, VersionIdentifier};
use crate::error::{ReleaseTrainError, Result};
use crate::git::Repository;
use crate::manifest;

/// Arguments for tag discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverRequest {
    /// Stage name as typed by the caller (`dev` or `rc`)
    pub pattern: String,

    /// Explicit tag to confirm instead of discovering the highest one
    pub validate: Option<String>,
}

/// Machine-readable discovery result printed as a single JSON line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DiscoveryReport {
    Found {
        tag: String,
        version: String,
        found: bool,
        commits_behind: Option<u64>,
    },
    NotFound {
        tag: Option<String>,
        version: Option<String>,
        found: bool,
        error: String,
    },
    Invalid {
        error: String,
    },
}

impl DiscoveryReport {
    fn found(candidate: &TagCandidate, staleness: Staleness) -> Self {
        DiscoveryReport::Found {
            tag: candidate.name.clone(),
            version: candidate.version.to_string(),
            found: true,
            commits_behind: staleness.commits_behind(),
        }
    }

    fn not_found(guidance: String) -> Self {
        DiscoveryReport::NotFound {
            tag: None,
            version: None,
            found: false,
            error: guidance,
        }
    }

    /// 0 when a tag was found, 1 when none matched, 2 for a bad request
    pub fn exit_code(&self) -> i32 {
        match self {
            DiscoveryReport::Found { .. } => 0,
            DiscoveryReport::NotFound { .. } => 1,
            DiscoveryReport::Invalid { .. } => 2,
        }
    }

    pub fn to_json(&self) -> String {
        // Only strings, bools and integers: serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Discovery report plus the non-fatal conditions noticed on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOutcome {
    pub report: DiscoveryReport,
    pub warnings: Vec<BoundaryWarning>,
}

/// Discover or validate a tag for one stage
#[instrument(skip(source), fields(pattern = %request.pattern))]
pub fn run_discover(source: &TagSource<'_>, request: &DiscoverRequest) -> DiscoverOutcome {
    let stage: TagStage = match request.pattern.parse() {
        Ok(stage) => stage,
        Err(e) => {
            return DiscoverOutcome {
                report: DiscoveryReport::Invalid {
                    error: e.to_string(),
                },
                warnings: Vec::new(),
            };
        }
    };

    let tags = match source {
        TagSource::Explicit(tags) => tags.clone(),
        TagSource::Live(repo) => repo.list_tags().unwrap_or_else(|e| {
            warn!(error = %e, "could not list tags, treating as empty");
            Vec::new()
        }),
    };
    debug!(count = tags.len(), "collected tags");

    let mut warnings: Vec<BoundaryWarning> = discovery::unparseable_tags(&tags)
        .into_iter()
        .map(|tag| BoundaryWarning::UnparsableTag { tag })
        .collect();

    if let Some(target) = &request.validate {
        let report = match discovery::validate(&tags, target) {
            Discovery::Found(candidate) => {
                DiscoveryReport::found(&candidate, Staleness::Unavailable)
            }
            Discovery::NotFound { guidance } => DiscoveryReport::not_found(guidance),
        };
        return DiscoverOutcome { report, warnings };
    }

    let report = match discovery::discover(&tags, stage) {
        Discovery::Found(candidate) => {
            let staleness = discovery::staleness(source, &candidate.name);
            match (source, staleness) {
                (_, Staleness::Behind(n)) if n > 0 => warnings.push(BoundaryWarning::StaleTag {
                    tag: candidate.name.clone(),
                    commits_behind: n,
                }),
                (TagSource::Live(_), Staleness::Unavailable) => {
                    warnings.push(BoundaryWarning::StalenessUnavailable {
                        tag: candidate.name.clone(),
                        reason: "tag could not be resolved against HEAD".to_string(),
                    })
                }
                _ => {}
            }
            info!(tag = %candidate.name, "tag discovered");
            DiscoveryReport::found(&candidate, staleness)
        }
        Discovery::NotFound { guidance } => DiscoveryReport::not_found(guidance),
    };

    DiscoverOutcome { report, warnings }
}

/// Arguments for release-notes generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogRequest {
    /// Stage name as typed by the caller (`dev`, `rc` or `stable`)
    pub stage: String,
    pub version: String,
    pub source_tag: Option<String>,
    pub repo: Option<String>,
    pub output: PathBuf,
    pub release_date: NaiveDate,
}

/// Rendered release notes and the tag they were measured against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogOutcome {
    pub notes: String,
    pub previous_tag: Option<String>,
}

/// Generate release notes, write them to the output file and return them.
///
/// Without history (`repo` is `None`) the notes carry no compare link and
/// no commit entries.
#[instrument(skip(repo, config), fields(stage = %request.stage, version = %request.version))]
pub fn run_changelog<R: Repository + ?Sized>(
    repo: Option<&R>,
    request: &ChangelogRequest,
    config: &Config,
) -> Result<ChangelogOutcome> {
    let stage: ReleaseStage = request.stage.parse()?;

    let previous_tag = repo.and_then(|repo| discovery::previous_tag(repo, stage, &request.version));
    debug!(previous_tag = ?previous_tag, "selected previous tag");

    let categorizer = CommitCategorizer::new(config.commits.clone());
    let commits = match repo {
        Some(repo) => categorizer
            .categorize_repository(repo, previous_tag.as_deref())
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not read commits, rendering without entries");
                Default::default()
            }),
        None => Default::default(),
    };

    let mut context = ReleaseContext::new(stage, request.version.clone(), request.release_date);
    if let Some(source) = &request.source_tag {
        context = context.with_source_tag(source.clone());
    }
    if let Some(name) = &request.repo {
        context = context.with_repo(name.clone());
    }
    if let Some(prev) = &previous_tag {
        context = context.with_previous_tag(prev.clone());
    }

    let notes = ChangelogDocument::new(context, commits).render(&config.changelog);

    if let Some(parent) = request.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&request.output, &notes)?;
    info!(output = %request.output.display(), "release notes written");

    Ok(ChangelogOutcome {
        notes,
        previous_tag,
    })
}

/// Arguments for writing a release version into manifests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BumpRequest {
    pub version: String,
    pub pyproject: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Write the version into every requested manifest.
///
/// Returns one status line per file updated.
pub fn run_bump_version(request: &BumpRequest) -> Result<Vec<String>> {
    if VersionIdentifier::parse(&request.version).is_none() {
        return Err(ReleaseTrainError::InvalidVersion(request.version.clone()));
    }
    if request.pyproject.is_none() && request.catalog.is_none() {
        return Err(ReleaseTrainError::manifest(
            "at least one of --pyproject or --catalog is required",
        ));
    }

    let mut updated = Vec::new();
    if let Some(path) = &request.pyproject {
        manifest::bump_pyproject(path, &request.version)?;
        updated.push(format!("Updated {} to {}", path.display(), request.version));
    }
    if let Some(path) = &request.catalog {
        manifest::bump_catalog(path, &request.version)?;
        updated.push(format!("Updated {} to {}", path.display(), request.version));
    }
    Ok(updated)
}
