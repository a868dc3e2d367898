use crate::error::{AutoverError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version with optional qualifiers
///
/// Ordering is total: the numeric triple compares first; on equal triples a
/// version without qualifiers orders above a qualified one, and two qualified
/// versions compare their qualifier lists lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub qualifiers: Vec<String>,
}

impl Version {
    /// Create a new version without qualifiers
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            qualifiers: Vec::new(),
        }
    }

    /// The sentinel version used when no tagged ancestor exists
    pub fn zero() -> Self {
        Version::new(0, 0, 0)
    }

    /// Parse a version from an extracted tag string (e.g., "1.2.3" or "1.2.3-rc.1")
    ///
    /// The numeric grammar is delegated to the `semver` crate; pre-release
    /// segments become qualifiers.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text).map_err(|e| {
            AutoverError::version(format!("Invalid version '{}': {}", text, e))
        })?;

        let qualifiers = if parsed.pre.is_empty() {
            Vec::new()
        } else {
            parsed.pre.as_str().split('.').map(str::to_string).collect()
        };

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            qualifiers,
        })
    }

    /// Return a new version with the qualifier appended
    pub fn add_qualifier(&self, qualifier: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.qualifiers.push(qualifier.into());
        next
    }

    /// Whether this version carries any qualifier
    pub fn is_qualified(&self) -> bool {
        !self.qualifiers.is_empty()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(
                || match (self.qualifiers.is_empty(), other.qualifiers.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.qualifiers.cmp(&other.qualifiers),
                },
            )
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for qualifier in &self.qualifiers {
            write!(f, "-{}", qualifier)?;
        }
        Ok(())
    }
}
