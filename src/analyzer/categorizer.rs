use crate::config::CommitsConfig;
use crate::conventional::CommitClassifier;
use crate::domain::{CommitClassification, CommitRecord};
use crate::error::Result;
use crate::git::Repository;
use tracing::debug;

/// Rendered changelog entries grouped by category, in commit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCommits {
    pub breaking: Vec<String>,
    pub features: Vec<String>,
    pub fixes: Vec<String>,
    pub other: Vec<String>,
}

impl CategorizedCommits {
    /// Append an entry under its category; excluded entries are dropped
    pub fn push(&mut self, classification: CommitClassification, entry: String) {
        match classification {
            CommitClassification::Breaking => self.breaking.push(entry),
            CommitClassification::Feature => self.features.push(entry),
            CommitClassification::Fix => self.fixes.push(entry),
            CommitClassification::Other => self.other.push(entry),
            CommitClassification::Excluded => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty()
            && self.features.is_empty()
            && self.fixes.is_empty()
            && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.breaking.len() + self.features.len() + self.fixes.len() + self.other.len()
    }
}

/// Classifies commits and folds them into [`CategorizedCommits`]
pub struct CommitCategorizer {
    classifier: CommitClassifier,
}

impl CommitCategorizer {
    /// Create a new categorizer
    pub fn new(config: CommitsConfig) -> Self {
        CommitCategorizer {
            classifier: CommitClassifier::new(config),
        }
    }

    /// Categorize commits from a repository since a previous tag
    pub fn categorize_repository<R: Repository + ?Sized>(
        &self,
        repo: &R,
        since_tag: Option<&str>,
    ) -> Result<CategorizedCommits> {
        let commits = repo.commits_since(since_tag)?;
        Ok(self.categorize(&commits))
    }

    /// Categorize commits, preserving the order they were supplied in
    pub fn categorize(&self, commits: &[CommitRecord]) -> CategorizedCommits {
        let mut categorized = CategorizedCommits::default();

        for commit in commits {
            if commit.subject.is_empty() || commit.hash.is_empty() {
                continue;
            }

            let classification = self.classifier.classify(&commit.subject, &commit.body);
            debug!(hash = %commit.hash, %classification, "classified commit");
            categorized.push(classification, commit.entry());
        }

        categorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> CommitCategorizer {
        CommitCategorizer::new(CommitsConfig::default())
    }

    #[test]
    fn test_categorize_mixed() {
        let commits = vec![
            CommitRecord::new("feat: add login", "", "aaa1111"),
            CommitRecord::new("fix: resolve crash", "", "bbb2222"),
            CommitRecord::new("feat!: new API", "", "ccc3333"),
            CommitRecord::new("updated readme", "", "ddd4444"),
            CommitRecord::new("chore(release): 1.1.23", "", "eee5555"),
        ];

        let result = categorizer().categorize(&commits);
        assert_eq!(result.features, vec!["- feat: add login (`aaa1111`)"]);
        assert_eq!(result.fixes, vec!["- fix: resolve crash (`bbb2222`)"]);
        assert_eq!(result.breaking, vec!["- feat!: new API (`ccc3333`)"]);
        assert_eq!(result.other, vec!["- updated readme (`ddd4444`)"]);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_only_excluded_commits_is_empty() {
        let commits = vec![
            CommitRecord::new("chore(release): 1.1.23", "", "aaa1111"),
            CommitRecord::new("docs: regenerate [skip ci]", "", "bbb2222"),
        ];
        assert!(categorizer().categorize(&commits).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let commits = vec![
            CommitRecord::new("fix: z last alphabetically", "", "aaa1111"),
            CommitRecord::new("fix: a first alphabetically", "", "bbb2222"),
        ];
        let result = categorizer().categorize(&commits);
        assert!(result.fixes[0].contains("z last"));
        assert!(result.fixes[1].contains("a first"));
    }

    #[test]
    fn test_records_without_subject_or_hash_are_skipped() {
        let commits = vec![
            CommitRecord::new("", "", "aaa1111"),
            CommitRecord::new("fix: no hash", "", ""),
        ];
        assert!(categorizer().categorize(&commits).is_empty());
    }
}
