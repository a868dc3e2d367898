use crate::domain::Commit;
use crate::error::{AutoverError, Result};
use crate::git::Repository;
use crate::strategy::{SearchMode, Strategy};

/// Mock repository for exercising version resolution without git
///
/// Commits model a linear history, newest first; index 0 is HEAD. The same
/// walk policy as the real adapter applies, so strategy search modes behave
/// identically in tests.
pub struct MockRepository {
    commits: Vec<Commit>,
    dirty: bool,
    branch: Option<String>,
}

impl MockRepository {
    /// Create an empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            dirty: false,
            branch: Some("main".to_string()),
        }
    }

    /// Append a commit as the oldest entry of the history
    pub fn push_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Mark the working tree dirty or clean
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Set the current branch; `None` models a detached HEAD
    pub fn set_branch(&mut self, branch: Option<&str>) {
        self.branch = branch.map(str::to_string);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<Commit> {
        self.commits
            .first()
            .cloned()
            .ok_or_else(|| AutoverError::calculation("mock repository has no commits"))
    }

    fn collect_parents(&self, strategy: &dyn Strategy) -> Result<Vec<Commit>> {
        let mut parents = Vec::new();
        let mut inspected = 0usize;

        for commit in &self.commits {
            inspected += 1;

            let version_bearing = commit
                .annotated_tags
                .iter()
                .chain(&commit.light_tags)
                .any(|tag| strategy.consider_tag_as_a_version_one(tag));

            if version_bearing {
                parents.push(commit.clone());
                if strategy.search_mode() == SearchMode::StopAtFirst {
                    return Ok(parents);
                }
            }

            if strategy.search_mode() == SearchMode::Depth
                && inspected >= strategy.search_depth_limit()
                && !parents.is_empty()
            {
                return Ok(parents);
            }
        }

        if parents.is_empty() {
            let root = self
                .commits
                .last()
                .cloned()
                .ok_or_else(|| AutoverError::calculation("mock repository has no commits"))?;
            parents.push(root);
        }

        Ok(parents)
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::domain::TagRef;
    use crate::strategy::{FullHistoryStrategy, NearestTagStrategy};
    use git2::Oid;

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn tagged(byte: u8, tag: &str) -> Commit {
        Commit::with_tags(oid(byte), Vec::new(), vec![TagRef::new(tag, oid(byte))])
    }

    #[test]
    fn test_head_commit_is_newest() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(Commit::new(oid(2)));
        assert_eq!(repo.head_commit().unwrap().id, oid(1));
    }

    #[test]
    fn test_head_commit_empty_repository_fails() {
        let repo = MockRepository::new();
        assert!(repo.head_commit().is_err());
    }

    #[test]
    fn test_collect_parents_stops_at_first_tagged() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(tagged(2, "v1.1.0"));
        repo.push_commit(tagged(3, "v1.0.0"));

        let strategy =
            NearestTagStrategy::new(NamingConfig::default().compile().unwrap(), false, None);
        let parents = repo.collect_parents(&strategy).unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, oid(2));
    }

    #[test]
    fn test_collect_parents_depth_mode_collects_all() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(tagged(2, "v1.1.0"));
        repo.push_commit(tagged(3, "v1.0.0"));

        let strategy =
            FullHistoryStrategy::new(NamingConfig::default().compile().unwrap(), false);
        let parents = repo.collect_parents(&strategy).unwrap();
        assert_eq!(parents.len(), 2);
    }

    #[test]
    fn test_collect_parents_depth_limit_is_soft() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(Commit::new(oid(2)));
        repo.push_commit(tagged(3, "v0.1.0"));

        // limit smaller than the distance to the only tag: the walk must
        // keep going rather than come back empty
        let strategy = FullHistoryStrategy::new(NamingConfig::default().compile().unwrap(), false)
            .with_depth_limit(1);
        let parents = repo.collect_parents(&strategy).unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, oid(3));
    }

    #[test]
    fn test_collect_parents_falls_back_to_root() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(Commit::new(oid(2)));
        repo.push_commit(Commit::new(oid(3)));

        let strategy =
            NearestTagStrategy::new(NamingConfig::default().compile().unwrap(), false, None);
        let parents = repo.collect_parents(&strategy).unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, oid(3));
    }

    #[test]
    fn test_non_version_tags_are_invisible() {
        let mut repo = MockRepository::new();
        repo.push_commit(Commit::new(oid(1)));
        repo.push_commit(tagged(2, "nightly"));
        repo.push_commit(tagged(3, "v0.2.0"));

        let strategy =
            NearestTagStrategy::new(NamingConfig::default().compile().unwrap(), false, None);
        let parents = repo.collect_parents(&strategy).unwrap();
        assert_eq!(parents[0].id, oid(3));
    }
}
