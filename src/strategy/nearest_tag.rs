use crate::config::VersionNaming;
use crate::domain::{Commit, TagRef, Version};
use crate::error::Result;
use crate::metadata::MetadataRegistrar;
use crate::strategy::{ResolverCore, Strategy};

/// Versions the tree from the nearest tagged ancestor, qualified by branch
///
/// The default strategy: history search stops at the first version-bearing
/// commit, and the decoded base version gets a qualifier derived from the
/// current branch through the configured mapping.
pub struct NearestTagStrategy {
    core: ResolverCore,
    branch: Option<String>,
}

impl NearestTagStrategy {
    /// Create a strategy over the given naming rules and working-tree state
    pub fn new(naming: VersionNaming, dirty: bool, branch: Option<String>) -> Self {
        NearestTagStrategy {
            core: ResolverCore::new(naming, dirty),
            branch,
        }
    }
}

impl Strategy for NearestTagStrategy {
    fn build(
        &self,
        head: &Commit,
        parents: &[Commit],
        registrar: &mut dyn MetadataRegistrar,
    ) -> Result<Version> {
        let base = self.core.find_version_commit(head, parents)?;
        let tag_to_use = self.core.find_tag_to_use(head, base);
        let base_version = self.core.base_version(base, tag_to_use, registrar)?;

        let version = match &self.branch {
            Some(branch) => self
                .core
                .enhance_version_with_branch(base_version, branch, registrar),
            None => base_version,
        };

        Ok(version)
    }

    fn consider_tag_as_a_version_one(&self, tag: &TagRef) -> bool {
        self.core.consider_tag_as_a_version_one(tag)
    }
}
