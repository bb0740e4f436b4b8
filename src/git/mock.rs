use crate::domain::CommitRecord;
use crate::error::{ReleaseTrainError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are stored oldest first and HEAD is the last
/// one. Tags point at a commit index.
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    tags: Vec<(String, usize)>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a commit on top of HEAD
    pub fn add_commit(&mut self, record: CommitRecord) {
        self.commits.push(record);
    }

    /// Tag the current HEAD commit
    pub fn tag_head(&mut self, name: impl Into<String>) {
        let head = self.commits.len().saturating_sub(1);
        self.tags.push((name.into(), head));
    }

    fn tag_index(&self, name: &str) -> Result<usize> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, index)| *index)
            .ok_or_else(|| ReleaseTrainError::Git(git2::Error::from_str("tag not found")))
    }

    fn head_index(&self) -> Result<usize> {
        self.commits
            .len()
            .checked_sub(1)
            .ok_or_else(|| ReleaseTrainError::Git(git2::Error::from_str("repository has no commits")))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn commits_behind(&self, tag: &str) -> Result<u64> {
        let tagged = self.tag_index(tag)?;
        let head = self.head_index()?;
        Ok(head.saturating_sub(tagged) as u64)
    }

    fn tags_merged_into_head(&self) -> Result<Vec<String>> {
        self.list_tags()
    }

    fn nearest_tag_before_head(&self) -> Result<Option<String>> {
        let head = self.head_index()?;
        if head == 0 {
            return Ok(None);
        }
        Ok(self
            .tags
            .iter()
            .filter(|(_, index)| *index < head)
            .max_by_key(|(_, index)| *index)
            .map(|(name, _)| name.clone()))
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        let start = match since_tag {
            Some(tag) => self.tag_index(tag)? + 1,
            None => 0,
        };
        Ok(self.commits.iter().skip(start).rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with_history() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit(CommitRecord::new("feat: first", "", "aaa1111"));
        repo.tag_head("v1.0.0");
        repo.add_commit(CommitRecord::new("fix: second", "", "bbb2222"));
        repo.add_commit(CommitRecord::new("feat: third", "", "ccc3333"));
        repo
    }

    #[test]
    fn test_commits_behind() {
        let mut repo = repo_with_history();
        assert_eq!(repo.commits_behind("v1.0.0").unwrap(), 2);
        repo.tag_head("v1.1.0.dev1");
        assert_eq!(repo.commits_behind("v1.1.0.dev1").unwrap(), 0);
        assert!(repo.commits_behind("v9.9.9").is_err());
    }

    #[test]
    fn test_commits_since_newest_first() {
        let repo = repo_with_history();
        let commits = repo.commits_since(Some("v1.0.0")).unwrap();
        let hashes: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["ccc3333", "bbb2222"]);
        assert_eq!(repo.commits_since(None).unwrap().len(), 3);
    }

    #[test]
    fn test_nearest_tag_before_head() {
        let mut repo = repo_with_history();
        assert_eq!(
            repo.nearest_tag_before_head().unwrap(),
            Some("v1.0.0".to_string())
        );
        repo.tag_head("v1.1.0.dev1");
        assert_eq!(
            repo.nearest_tag_before_head().unwrap(),
            Some("v1.0.0".to_string())
        );
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert!(repo.nearest_tag_before_head().is_err());
    }
}
