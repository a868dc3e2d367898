use crate::domain::{Commit, TagRef};
use crate::error::{AutoverError, Result};
use crate::strategy::{SearchMode, Strategy};
use git2::{Oid, Repository as Git2Repo, Sort, StatusOptions};
use std::collections::HashMap;
use std::path::Path;

/// Tags grouped by the commit they point at, split by kind
struct TagIndex {
    annotated: HashMap<Oid, Vec<TagRef>>,
    lightweight: HashMap<Oid, Vec<TagRef>>,
}

impl TagIndex {
    fn snapshot(&self, commit_id: Oid) -> Commit {
        Commit::with_tags(
            commit_id,
            self.annotated.get(&commit_id).cloned().unwrap_or_default(),
            self.lightweight.get(&commit_id).cloned().unwrap_or_default(),
        )
    }
}

/// Materializes history snapshots from a real repository via git2
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    /// Index every tag in the repository by its target commit.
    ///
    /// A ref under `refs/tags/` that resolves to a tag object is annotated
    /// and keeps the tag object's id as its target; a ref pointing straight
    /// at a commit is lightweight. Both are keyed by the peeled commit so
    /// the two kinds can coexist on one commit.
    fn tag_index(&self) -> Result<TagIndex> {
        let mut index = TagIndex {
            annotated: HashMap::new(),
            lightweight: HashMap::new(),
        };

        let names = self.repo.tag_names(None)?;
        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            let target = match reference.target() {
                Some(target) => target,
                None => continue,
            };
            let commit_id = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                // tag pointing at a tree or blob, useless for versioning
                Err(_) => continue,
            };

            let tag = TagRef::new(name, target);
            if self.repo.find_tag(target).is_ok() {
                index.annotated.entry(commit_id).or_default().push(tag);
            } else {
                index.lightweight.entry(commit_id).or_default().push(tag);
            }
        }

        Ok(index)
    }
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<Commit> {
        let index = self.tag_index()?;
        Ok(index.snapshot(self.head_oid()?))
    }

    fn collect_parents(&self, strategy: &dyn Strategy) -> Result<Vec<Commit>> {
        let index = self.tag_index()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(self.head_oid()?)?;

        let mut parents = Vec::new();
        let mut last_visited = None;
        let mut inspected = 0usize;

        for oid in revwalk {
            let oid = oid?;
            last_visited = Some(oid);
            inspected += 1;

            let commit = index.snapshot(oid);
            let version_bearing = commit
                .annotated_tags
                .iter()
                .chain(&commit.light_tags)
                .any(|tag| strategy.consider_tag_as_a_version_one(tag));

            if version_bearing {
                parents.push(commit);
                if strategy.search_mode() == SearchMode::StopAtFirst {
                    return Ok(parents);
                }
            }

            // the depth preference is soft: only honored once something was found
            if strategy.search_mode() == SearchMode::Depth
                && inspected >= strategy.search_depth_limit()
                && !parents.is_empty()
            {
                return Ok(parents);
            }
        }

        if parents.is_empty() {
            let root = last_visited
                .ok_or_else(|| AutoverError::calculation("repository has no commits"))?;
            parents.push(index.snapshot(root));
        }

        Ok(parents)
    }

    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
