//! Conventional-commit classification
//!
//! Classification runs in three ordered stages, each usable on its own:
//! exclusion markers, breaking-change precedence, then type mapping.

use crate::config::CommitsConfig;
use crate::domain::{CommitClassification, ParsedCommit};

/// Assigns each commit to exactly one category
#[derive(Debug, Clone, Default)]
pub struct CommitClassifier {
    config: CommitsConfig,
}

impl CommitClassifier {
    pub fn new(config: CommitsConfig) -> Self {
        CommitClassifier { config }
    }

    /// Classify a commit from its subject and body
    pub fn classify(&self, subject: &str, body: &str) -> CommitClassification {
        if self.is_excluded(subject) {
            return CommitClassification::Excluded;
        }

        let parsed = ParsedCommit::parse(subject);
        if self.is_breaking(parsed.as_ref(), body) {
            return CommitClassification::Breaking;
        }

        match parsed {
            Some(parsed) => map_type(&parsed),
            None => CommitClassification::Other,
        }
    }

    /// Release-automation and CI-skip commits never reach the notes
    pub fn is_excluded(&self, subject: &str) -> bool {
        self.config
            .exclude_markers
            .iter()
            .any(|marker| subject.contains(marker.as_str()))
    }

    /// `!` after type/scope of a conventional subject, or a breaking marker
    /// in the body whatever the subject looks like
    pub fn is_breaking(&self, parsed: Option<&ParsedCommit>, body: &str) -> bool {
        parsed.map(|p| p.breaking_marker).unwrap_or(false)
            || self
                .config
                .breaking_markers
                .iter()
                .any(|marker| body.contains(marker.as_str()))
    }
}

/// Map a non-breaking conventional commit type to its category
pub fn map_type(parsed: &ParsedCommit) -> CommitClassification {
    match parsed.r#type.as_str() {
        "feat" => CommitClassification::Feature,
        "fix" => CommitClassification::Fix,
        _ => CommitClassification::Other,
    }
}
