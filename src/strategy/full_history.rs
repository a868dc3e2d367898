use crate::config::VersionNaming;
use crate::domain::{Commit, TagRef, Version};
use crate::error::Result;
use crate::metadata::MetadataRegistrar;
use crate::strategy::{ResolverCore, SearchMode, Strategy};

/// Versions the tree from the maximal tag across the inspected history
///
/// Asks the walker for every qualifying tagged commit within the depth
/// preference and resolves to the one with the highest implied version. The
/// result is left unqualified; downstream tooling receives the plain base
/// version.
pub struct FullHistoryStrategy {
    core: ResolverCore,
    depth_limit: usize,
}

impl FullHistoryStrategy {
    /// Create a strategy over the given naming rules and working-tree state
    pub fn new(naming: VersionNaming, dirty: bool) -> Self {
        FullHistoryStrategy {
            core: ResolverCore::new(naming, dirty),
            depth_limit: usize::MAX,
        }
    }

    /// Override the soft depth preference
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }
}

impl Strategy for FullHistoryStrategy {
    fn build(
        &self,
        head: &Commit,
        parents: &[Commit],
        registrar: &mut dyn MetadataRegistrar,
    ) -> Result<Version> {
        let base = self.core.find_version_commit(head, parents)?;
        let tag_to_use = self.core.find_tag_to_use(head, base);
        self.core.base_version(base, tag_to_use, registrar)
    }

    fn search_depth_limit(&self) -> usize {
        self.depth_limit
    }

    fn search_mode(&self) -> SearchMode {
        SearchMode::Depth
    }

    fn consider_tag_as_a_version_one(&self, tag: &TagRef) -> bool {
        self.core.consider_tag_as_a_version_one(tag)
    }
}
