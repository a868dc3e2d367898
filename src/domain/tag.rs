use git2::Oid;
use std::fmt;

/// A tag handle: the raw ref name and the object id it points to
///
/// For an annotated tag the object id is the tag object itself; for a
/// lightweight tag it is the commit the ref points at. Comparing these ids is
/// what distinguishes the two kinds at a given commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: Oid,
}

impl TagRef {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        TagRef {
            name: name.into(),
            target,
        }
    }

    /// Tag name with any `refs/tags/` prefix stripped
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("refs/tags/").unwrap_or(&self.name)
    }
}

/// Classification of the tag a version was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    /// Tag carrying its own object metadata, treated as a release marker
    Annotated,
    /// Bare name-to-commit pointer
    Lightweight,
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagType::Annotated => write!(f, "ANNOTATED"),
            TagType::Lightweight => write!(f, "LIGHTWEIGHT"),
        }
    }
}
