use crate::domain::CommitRecord;
use crate::error::Result;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::cmp::Reverse;
use std::path::Path;
use tracing::{debug, instrument};

/// Commits between tag and base, lightweight flag, newest-first timestamp
type DescribeRank = (usize, bool, Reverse<i64>);

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id())
    }

    /// Resolve a tag (lightweight or annotated) to the commit it points at
    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", tag_name))?;
        Ok(reference.peel_to_commit()?.id())
    }

    /// Rank of a tag reachable from `base`, smallest first: fewest commits
    /// between the tag and `base`, then annotated before lightweight, then
    /// the newest. `None` when the tag is not reachable from `base`.
    fn describe_rank(&self, base: Oid, tag_name: &str) -> Result<Option<DescribeRank>> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", tag_name))?;
        let commit = reference.peel_to_commit()?;
        let oid = commit.id();

        if oid != base && !self.repo.graph_descendant_of(base, oid)? {
            return Ok(None);
        }

        let (distance, _) = self.repo.graph_ahead_behind(base, oid)?;
        let (annotated, when) = match reference.peel_to_tag() {
            Ok(tag) => (
                true,
                tag.tagger()
                    .map(|tagger| tagger.when().seconds())
                    .unwrap_or_else(|| commit.time().seconds()),
            ),
            Err(_) => (false, commit.time().seconds()),
        };

        Ok(Some((distance, !annotated, Reverse(when))))
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    #[instrument(skip(self))]
    fn commits_behind(&self, tag: &str) -> Result<u64> {
        let tag_oid = self.tag_commit_oid(tag)?;
        let head_oid = self.head_oid()?;

        let (ahead, _behind) = self.repo.graph_ahead_behind(head_oid, tag_oid)?;
        debug!(ahead, "measured staleness");
        Ok(ahead as u64)
    }

    fn tags_merged_into_head(&self) -> Result<Vec<String>> {
        let head_oid = self.head_oid()?;
        let mut merged = Vec::new();

        for tag_name in self.repo.tag_names(None)?.iter().flatten() {
            let Ok(oid) = self.tag_commit_oid(tag_name) else {
                continue;
            };
            if oid == head_oid || self.repo.graph_descendant_of(head_oid, oid)? {
                merged.push(tag_name.to_string());
            }
        }

        Ok(merged)
    }

    #[instrument(skip(self))]
    fn nearest_tag_before_head(&self) -> Result<Option<String>> {
        let head = self.repo.head()?.peel_to_commit()?;
        let Ok(parent) = head.parent(0) else {
            return Ok(None);
        };

        let base = parent.id();

        let mut best: Option<(DescribeRank, String)> = None;
        for tag_name in self.repo.tag_names(None)?.iter().flatten() {
            let rank = match self.describe_rank(base, tag_name) {
                Ok(Some(rank)) => rank,
                Ok(None) => continue,
                Err(e) => {
                    debug!(tag = tag_name, error = %e, "skipping unresolvable tag");
                    continue;
                }
            };
            let candidate = (rank, tag_name.to_string());
            if best.as_ref().map_or(true, |current| candidate < *current) {
                best = Some(candidate);
            }
        }

        debug!(nearest = ?best.as_ref().map(|(_, name)| name), "resolved nearest tag");
        Ok(best.map(|(_, name)| name))
    }

    #[instrument(skip(self))]
    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(self.head_oid()?)?;

        if let Some(tag) = since_tag {
            revwalk.hide(self.tag_commit_oid(tag)?)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if commit.parent_count() > 1 {
                continue;
            }

            let message = commit.message().unwrap_or_default();
            let short_id = commit.as_object().short_id()?;
            let hash = short_id
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| oid.to_string());
            commits.push(CommitRecord::from_message(message, hash));
        }

        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}
