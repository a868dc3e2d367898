//! Record of the facts that justified a computed version.
//!
//! Strategies register entries while building a version; callers read the
//! accumulated map afterwards to explain the result. The sink is write-only
//! from the strategy's point of view and is never cleared by the engine.

use std::collections::BTreeMap;
use std::fmt;

/// Keys under which version-resolution facts are registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metadata {
    BaseTagType,
    BaseTag,
    BaseVersion,
    CurrentVersionMajor,
    CurrentVersionMinor,
    CurrentVersionPatch,
    BranchName,
    QualifiedBranchName,
}

impl Metadata {
    /// Stable string form of the key
    pub fn key(&self) -> &'static str {
        match self {
            Metadata::BaseTagType => "BASE_TAG_TYPE",
            Metadata::BaseTag => "BASE_TAG",
            Metadata::BaseVersion => "BASE_VERSION",
            Metadata::CurrentVersionMajor => "CURRENT_VERSION_MAJOR",
            Metadata::CurrentVersionMinor => "CURRENT_VERSION_MINOR",
            Metadata::CurrentVersionPatch => "CURRENT_VERSION_PATCH",
            Metadata::BranchName => "BRANCH_NAME",
            Metadata::QualifiedBranchName => "QUALIFIED_BRANCH_NAME",
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Write-only sink for version-resolution metadata
pub trait MetadataRegistrar {
    /// Record a value under the given key, replacing any earlier value
    fn register(&mut self, meta: Metadata, value: &str);
}

/// In-memory metadata accumulator
///
/// Keys iterate in a fixed order, so output and assertions are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MetadataMap {
    entries: BTreeMap<Metadata, String>,
}

impl MetadataMap {
    /// Create an empty map
    pub fn new() -> Self {
        MetadataMap::default()
    }

    /// Read a registered value
    pub fn get(&self, meta: Metadata) -> Option<&str> {
        self.entries.get(&meta).map(String::as_str)
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (Metadata, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataRegistrar for MetadataMap {
    fn register(&mut self, meta: Metadata, value: &str) {
        self.entries.insert(meta, value.to_string());
    }
}
