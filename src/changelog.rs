//! Markdown release-notes rendering per release stage.
//!
//! Rendering is pure: the release date is supplied by the caller and
//! categorized entries are emitted in the order they were collected.

use crate::analyzer::CategorizedCommits;
use crate::config::ChangelogConfig;
use crate::domain::{ReleaseStage, TagPattern};
use chrono::NaiveDate;
use tracing::{debug, instrument};

const DEV_RC_EMPTY: &str = "No notable changes (internal improvements)\n";
const STABLE_EMPTY: &str = "Patch release (internal improvements)\n";

/// Stage metadata framing one set of release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    pub stage: ReleaseStage,
    /// Version without the `v` prefix
    pub version: String,
    /// Tag this release was promoted from
    pub source_tag: Option<String>,
    /// Repository identifier (`owner/name`) used for compare links
    pub repo: Option<String>,
    /// Previous tag the notes are measured against
    pub previous_tag: Option<String>,
    pub release_date: NaiveDate,
}

impl ReleaseContext {
    pub fn new(stage: ReleaseStage, version: impl Into<String>, release_date: NaiveDate) -> Self {
        ReleaseContext {
            stage,
            version: version.into(),
            source_tag: None,
            repo: None,
            previous_tag: None,
            release_date,
        }
    }

    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = Some(tag.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into()).filter(|r: &String| !r.is_empty());
        self
    }

    pub fn with_previous_tag(mut self, tag: impl Into<String>) -> Self {
        self.previous_tag = Some(tag.into()).filter(|t: &String| !t.is_empty());
        self
    }

    fn date(&self) -> String {
        self.release_date.format("%Y-%m-%d").to_string()
    }

    fn compare(&self, config: &ChangelogConfig) -> Option<(String, String)> {
        match (&self.previous_tag, &self.repo) {
            (Some(prev), Some(repo)) => {
                let current = TagPattern::format(&self.version);
                Some((prev.clone(), config.compare_link(repo, prev, &current)))
            }
            _ => None,
        }
    }
}

/// Release notes ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    pub context: ReleaseContext,
    pub commits: CategorizedCommits,
}

impl ChangelogDocument {
    pub fn new(context: ReleaseContext, commits: CategorizedCommits) -> Self {
        ChangelogDocument { context, commits }
    }

    /// Render to Markdown
    #[instrument(skip_all, fields(stage = %self.context.stage, version = %self.context.version))]
    pub fn render(&self, config: &ChangelogConfig) -> String {
        let ctx = &self.context;
        let mut blocks: Vec<String> = Vec::new();

        let empty_message = match ctx.stage {
            ReleaseStage::Dev => {
                blocks.push(format!("**Dev snapshot** `{}` ({})\n", ctx.version, ctx.date()));
                if let Some((prev, url)) = ctx.compare(config) {
                    blocks.push(format!("**Changes since**: [{}]({})\n", prev, url));
                }
                DEV_RC_EMPTY
            }
            ReleaseStage::Rc => {
                blocks.push(format!(
                    "**Release candidate** `{}` ({})\n",
                    ctx.version,
                    ctx.date()
                ));
                if let Some(source) = &ctx.source_tag {
                    blocks.push(format!("**Promoted from**: `{}`\n", source));
                }
                if let Some((prev, url)) = ctx.compare(config) {
                    blocks.push(format!("**Changes since**: [{}]({})\n", prev, url));
                }
                blocks.push(format!(
                    "## Install\n```bash\n{}\n```\n",
                    config.rc_install_line(&ctx.version)
                ));
                DEV_RC_EMPTY
            }
            ReleaseStage::Stable => {
                blocks.push(format!("# {} v{}\n", config.product_name, ctx.version));
                blocks.push(format!("**Release Date**: {}\n", ctx.date()));
                if let Some(source) = &ctx.source_tag {
                    blocks.push(format!("**Promoted from**: `{}`\n", source));
                }
                if let Some((prev, url)) = ctx.compare(config) {
                    blocks.push(format!(
                        "**Full Changelog**: [{}...{}]({})\n",
                        prev,
                        TagPattern::format(&ctx.version),
                        url
                    ));
                }
                blocks.push(format!(
                    "## Installation\n```bash\n{}\n```\n",
                    config.stable_install_line(&ctx.version)
                ));
                STABLE_EMPTY
            }
        };

        let sections = [
            ("Breaking Changes", &self.commits.breaking),
            ("Features", &self.commits.features),
            ("Bug Fixes", &self.commits.fixes),
            ("Other Changes", &self.commits.other),
        ];
        for (title, entries) in sections {
            if entries.is_empty() {
                continue;
            }
            blocks.push(format!("## {}\n", title));
            blocks.push(format!("{}\n", entries.join("\n")));
        }

        if self.commits.is_empty() {
            blocks.push(empty_message.to_string());
        }

        debug!(entries = self.commits.len(), "rendered release notes");
        blocks.join("\n")
    }
}

/// Render release notes for a context and its categorized commits
pub fn render(
    context: &ReleaseContext,
    commits: &CategorizedCommits,
    config: &ChangelogConfig,
) -> String {
    ChangelogDocument::new(context.clone(), commits.clone()).render(config)
}
