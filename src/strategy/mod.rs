//! Version resolution strategies.
//!
//! A strategy turns the head commit and its relevant ancestors into a single
//! [Version](crate::domain::Version), registering the facts that justified
//! the result along the way. Variants share the selection and merge
//! resolution primitives through [ResolverCore] and differ in how much
//! history they ask the walker for and how they enhance the base version.

pub mod selector;

mod full_history;
mod nearest_tag;
mod resolver;

pub use full_history::FullHistoryStrategy;
pub use nearest_tag::NearestTagStrategy;
pub use resolver::ResolverCore;

use crate::domain::{Commit, TagRef, Version};
use crate::error::Result;
use crate::metadata::MetadataRegistrar;

/// Policy governing how far back through history tag information is sought
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Stop walking as soon as one commit carrying qualifying tag
    /// information is found, even before the depth limit.
    StopAtFirst,
    /// Collect all qualifying tagged commits until the depth limit is
    /// reached. The limit is soft: when nothing was found within it, the
    /// walk continues to the repository root rather than giving up.
    Depth,
}

/// A version resolution algorithm
///
/// The configuration accessors are consulted by the history walker to decide
/// how much history to materialize before `build` runs.
pub trait Strategy {
    /// Compute the version for `head` from the given ancestor commits.
    ///
    /// `parents` must be non-empty; when no tagged ancestor exists it
    /// contains the repository's first commit. Passing an empty list is a
    /// contract violation and fails the calculation.
    fn build(
        &self,
        head: &Commit,
        parents: &[Commit],
        registrar: &mut dyn MetadataRegistrar,
    ) -> Result<Version>;

    /// Commit depth the walker should inspect before settling for what it
    /// found. Only meaningful for [SearchMode::Depth].
    fn search_depth_limit(&self) -> usize {
        usize::MAX
    }

    fn search_mode(&self) -> SearchMode {
        SearchMode::StopAtFirst
    }

    /// Whether a tag carries version information at all. Tags failing this
    /// test are invisible to every selection above.
    fn consider_tag_as_a_version_one(&self, tag: &TagRef) -> bool;
}
