use crate::domain::TagRef;
use git2::Oid;

/// Immutable snapshot of a commit and the tags reachable at it
///
/// Produced by the history walker before resolution starts; the resolution
/// engine only ever reads it.
#[derive(Debug, Clone)]
pub struct Commit {
    pub id: Oid,
    pub annotated_tags: Vec<TagRef>,
    pub light_tags: Vec<TagRef>,
}

impl Commit {
    /// Create an untagged commit snapshot
    pub fn new(id: Oid) -> Self {
        Commit {
            id,
            annotated_tags: Vec::new(),
            light_tags: Vec::new(),
        }
    }

    /// Create a commit snapshot with its tag lists
    pub fn with_tags(id: Oid, annotated_tags: Vec<TagRef>, light_tags: Vec<TagRef>) -> Self {
        Commit {
            id,
            annotated_tags,
            light_tags,
        }
    }

    /// Whether any tag at all points at this commit
    pub fn is_tagged(&self) -> bool {
        !self.annotated_tags.is_empty() || !self.light_tags.is_empty()
    }
}
