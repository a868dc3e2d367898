//! Git history abstraction layer
//!
//! The resolution engine never touches a repository directly; it runs over
//! [Commit](crate::domain::Commit) snapshots materialized up front. This
//! module provides the trait that does the materializing, with a real
//! implementation backed by the `git2` crate and an in-memory mock for
//! testing.
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Commit;
use crate::error::Result;
use crate::strategy::Strategy;

/// Read-only view over a repository's history and working-tree state
///
/// Implementations materialize everything the resolution engine needs before
/// a strategy runs; nothing here mutates the repository.
pub trait Repository {
    /// Snapshot of the current HEAD commit with its tag lists
    fn head_commit(&self) -> Result<Commit>;

    /// Ancestor commits relevant for version resolution
    ///
    /// Honors the strategy's search mode and depth preference. The result is
    /// never empty: when no qualifying tagged ancestor exists, the
    /// repository's first commit is returned as the ultimate fallback.
    fn collect_parents(&self, strategy: &dyn Strategy) -> Result<Vec<Commit>>;

    /// Whether the working tree carries uncommitted changes to tracked files
    fn is_dirty(&self) -> Result<bool>;

    /// Current branch name, or `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;
}
