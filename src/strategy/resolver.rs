use crate::config::VersionNaming;
use crate::domain::{Commit, TagRef, TagType, Version};
use crate::error::{AutoverError, Result};
use crate::metadata::{Metadata, MetadataRegistrar};
use crate::strategy::selector::{max_by_version, VersionTarget};

/// Shared resolution state composed by every strategy variant.
///
/// Holds the compiled naming rules and the working-tree dirtiness observed
/// when history was materialized. All methods are pure with respect to this
/// state; the only side effect anywhere is writing through the registrar.
pub struct ResolverCore {
    naming: VersionNaming,
    dirty: bool,
}

impl ResolverCore {
    pub fn new(naming: VersionNaming, dirty: bool) -> Self {
        ResolverCore { naming, dirty }
    }

    /// Decode a tag name into a version through the configured extraction rule.
    pub fn tag_to_version(&self, tag: &TagRef) -> Result<Version> {
        let name = tag.short_name();
        let extracted = self.naming.extract_version_from(name).ok_or_else(|| {
            AutoverError::tag(format!("No version found in tag name '{}'", name))
        })?;
        Version::parse(&extracted)
    }

    fn to_version_target<'t>(&self, tag: &'t TagRef) -> Option<VersionTarget<&'t TagRef>> {
        // an undecodable tag is excluded from comparison, never fatal
        self.tag_to_version(tag)
            .ok()
            .map(|version| VersionTarget::new(version, tag))
    }

    /// Return the tag whose decoded version is maximal, or `None` if the
    /// input is empty or no tag decodes.
    pub fn max_version_tag<'t>(&self, tags: &'t [TagRef]) -> Option<&'t TagRef> {
        max_by_version(tags.iter().filter_map(|tag| self.to_version_target(tag)))
    }

    /// Prefer a maximal tag from `primary`; only when `primary` yields
    /// nothing, fall back to `secondary`. The two pools are never merged
    /// into one comparison.
    pub fn max_version_tag_between<'t>(
        &self,
        primary: &'t [TagRef],
        secondary: &'t [TagRef],
    ) -> Option<&'t TagRef> {
        self.max_version_tag(primary)
            .or_else(|| self.max_version_tag(secondary))
    }

    /// Pick the tag that seeds the version at `base`.
    ///
    /// Annotated tags are authoritative only when versioning exactly the
    /// clean tip; an ancestor base or a dirty tree flips the priority to
    /// lightweight tags.
    pub fn find_tag_to_use<'t>(&self, head: &Commit, base: &'t Commit) -> Option<&'t TagRef> {
        if self.is_base_commit_on_head(head, base) && !self.dirty {
            self.max_version_tag_between(&base.annotated_tags, &base.light_tags)
        } else {
            self.max_version_tag_between(&base.light_tags, &base.annotated_tags)
        }
    }

    /// Select the ancestor whose tag history seeds the version.
    ///
    /// A single-parent commit short-circuits; a merge resolves to the parent
    /// with the maximal implied version. An empty list is a contract
    /// violation by the history walker.
    pub fn find_version_commit<'c>(
        &self,
        head: &Commit,
        parents: &'c [Commit],
    ) -> Result<&'c Commit> {
        match parents {
            [] => Err(AutoverError::calculation(
                "parents list is empty; the history walker must provide at least the first commit",
            )),
            [only] => Ok(only),
            _ => Ok(self.find_max_version_commit(head, parents)),
        }
    }

    /// Among several candidate ancestors, pick the one with the maximal
    /// implied version; parents without a decodable tag are skipped, and the
    /// first listed parent is the deterministic fallback.
    pub fn find_max_version_commit<'c>(&self, head: &Commit, parents: &'c [Commit]) -> &'c Commit {
        max_by_version(parents.iter().filter_map(|commit| {
            self.find_tag_to_use(head, commit)
                .and_then(|tag| self.tag_to_version(tag).ok())
                .map(|version| VersionTarget::new(version, commit))
        }))
        .unwrap_or(&parents[0])
    }

    /// Classify the chosen tag against the maximal annotated tag at the same
    /// commit: equal object ids mean the annotated tag itself was chosen.
    pub fn compute_tag_type(&self, tag_to_use: &TagRef, max_annotated: Option<&TagRef>) -> TagType {
        match max_annotated {
            Some(annotated) if annotated.target == tag_to_use.target => TagType::Annotated,
            _ => TagType::Lightweight,
        }
    }

    /// Decode the base version and record every fact that justified it.
    ///
    /// Registered always, tag or not: base tag name and type (empty-string
    /// sentinels when absent), the base version, and its components.
    pub fn base_version(
        &self,
        base: &Commit,
        tag_to_use: Option<&TagRef>,
        registrar: &mut dyn MetadataRegistrar,
    ) -> Result<Version> {
        let base_version = match tag_to_use {
            Some(tag) => {
                let tag_type =
                    self.compute_tag_type(tag, self.max_version_tag(&base.annotated_tags));
                let version = self.tag_to_version(tag).map_err(|e| {
                    AutoverError::calculation(format!(
                        "tag '{}' was selected but its version cannot be decoded: {}",
                        tag.short_name(),
                        e
                    ))
                })?;

                registrar.register(Metadata::BaseTagType, &tag_type.to_string());
                registrar.register(Metadata::BaseTag, tag.short_name());
                version
            }
            None => {
                registrar.register(Metadata::BaseTagType, "");
                registrar.register(Metadata::BaseTag, "");
                Version::zero()
            }
        };

        registrar.register(Metadata::BaseVersion, &base_version.to_string());
        registrar.register(Metadata::CurrentVersionMajor, &base_version.major.to_string());
        registrar.register(Metadata::CurrentVersionMinor, &base_version.minor.to_string());
        registrar.register(Metadata::CurrentVersionPatch, &base_version.patch.to_string());

        Ok(base_version)
    }

    /// Append a branch-derived qualifier when the configuration maps one.
    ///
    /// The branch name is always recorded; the qualified name only when a
    /// qualifier was actually produced.
    pub fn enhance_version_with_branch(
        &self,
        base_version: Version,
        branch: &str,
        registrar: &mut dyn MetadataRegistrar,
    ) -> Version {
        registrar.register(Metadata::BranchName, branch);

        match self.naming.branch_qualifier(branch) {
            Some(qualifier) => {
                registrar.register(Metadata::QualifiedBranchName, &qualifier);
                base_version.add_qualifier(qualifier)
            }
            None => base_version,
        }
    }

    /// Whether a tag counts as version-bearing under the configured pattern.
    pub fn consider_tag_as_a_version_one(&self, tag: &TagRef) -> bool {
        self.naming.matches_search_pattern(tag.short_name())
    }

    fn is_base_commit_on_head(&self, head: &Commit, base: &Commit) -> bool {
        head.id == base.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::metadata::MetadataMap;
    use git2::Oid;

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).unwrap()
    }

    fn core(dirty: bool) -> ResolverCore {
        ResolverCore::new(NamingConfig::default().compile().unwrap(), dirty)
    }

    fn tag(name: &str, byte: u8) -> TagRef {
        TagRef::new(name, oid(byte))
    }

    #[test]
    fn test_max_version_tag_is_a_true_max() {
        let core = core(false);
        let tags = vec![tag("v1.0.0", 1), tag("v2.1.0", 2), tag("v2.0.9", 3)];
        let max = core.max_version_tag(&tags).unwrap();
        assert_eq!(max.short_name(), "v2.1.0");
    }

    #[test]
    fn test_max_version_tag_skips_undecodable_tags() {
        let core = core(false);
        let tags = vec![tag("nightly", 1), tag("v1.5.0", 2), tag("v1.4.0", 3)];
        let max = core.max_version_tag(&tags).unwrap();
        assert_eq!(max.short_name(), "v1.5.0");
    }

    #[test]
    fn test_max_version_tag_none_when_nothing_decodes() {
        let core = core(false);
        let tags = vec![tag("nightly", 1), tag("latest", 2)];
        assert!(core.max_version_tag(&tags).is_none());
        assert!(core.max_version_tag(&[]).is_none());
    }

    #[test]
    fn test_priority_fallback_primary_wins() {
        let core = core(false);
        let primary = vec![tag("v1.0.0", 1)];
        let secondary = vec![tag("v9.9.9", 2)];
        // a decodable primary tag wins regardless of secondary contents
        let chosen = core.max_version_tag_between(&primary, &secondary).unwrap();
        assert_eq!(chosen.short_name(), "v1.0.0");
    }

    #[test]
    fn test_priority_fallback_to_secondary() {
        let core = core(false);
        let primary = vec![tag("nightly", 1)];
        let secondary = vec![tag("v0.3.0", 2)];
        let chosen = core.max_version_tag_between(&primary, &secondary).unwrap();
        assert_eq!(chosen.short_name(), "v0.3.0");
    }

    // Concrete case from the priority design: commit C carries lightweight
    // v1.2.0 and annotated v1.1.0. Clean tip prefers the annotated tag,
    // anything else prefers the lightweight one.
    fn tagged_head() -> Commit {
        Commit::with_tags(
            oid(10),
            vec![tag("v1.1.0", 11)],
            vec![tag("v1.2.0", 10)],
        )
    }

    #[test]
    fn test_find_tag_to_use_clean_head_prefers_annotated() {
        let head = tagged_head();
        let chosen = core(false).find_tag_to_use(&head, &head).unwrap();
        assert_eq!(chosen.short_name(), "v1.1.0");
    }

    #[test]
    fn test_find_tag_to_use_dirty_tree_prefers_lightweight() {
        let head = tagged_head();
        let chosen = core(true).find_tag_to_use(&head, &head).unwrap();
        assert_eq!(chosen.short_name(), "v1.2.0");
    }

    #[test]
    fn test_find_tag_to_use_ancestor_base_prefers_lightweight() {
        let head = Commit::new(oid(20));
        let base = tagged_head();
        let chosen = core(false).find_tag_to_use(&head, &base).unwrap();
        assert_eq!(chosen.short_name(), "v1.2.0");
    }

    #[test]
    fn test_find_version_commit_single_parent_short_circuits() {
        let core = core(false);
        let head = Commit::new(oid(1));
        let parents = vec![Commit::new(oid(2))];
        let base = core.find_version_commit(&head, &parents).unwrap();
        assert_eq!(base.id, oid(2));
    }

    #[test]
    fn test_find_version_commit_empty_parents_is_an_error() {
        let core = core(false);
        let head = Commit::new(oid(1));
        let result = core.find_version_commit(&head, &[]);
        assert!(matches!(result, Err(AutoverError::VersionCalculation(_))));
    }

    #[test]
    fn test_merge_resolution_picks_max_parent() {
        let core = core(false);
        let head = Commit::new(oid(1));
        let p1 = Commit::with_tags(oid(2), Vec::new(), vec![tag("v1.0.0", 2)]);
        let p2 = Commit::with_tags(oid(3), Vec::new(), vec![tag("v2.0.0", 3)]);
        let parents = vec![p1, p2];
        let base = core.find_version_commit(&head, &parents).unwrap();
        assert_eq!(base.id, oid(3));
    }

    #[test]
    fn test_merge_resolution_falls_back_to_first_parent() {
        let core = core(false);
        let head = Commit::new(oid(1));
        let parents = vec![Commit::new(oid(2)), Commit::new(oid(3))];
        let base = core.find_version_commit(&head, &parents).unwrap();
        assert_eq!(base.id, oid(2));
    }

    #[test]
    fn test_compute_tag_type() {
        let core = core(false);
        let annotated = tag("v1.1.0", 11);
        let lightweight = tag("v1.2.0", 10);
        assert_eq!(
            core.compute_tag_type(&annotated, Some(&annotated)),
            TagType::Annotated
        );
        assert_eq!(
            core.compute_tag_type(&lightweight, Some(&annotated)),
            TagType::Lightweight
        );
        assert_eq!(core.compute_tag_type(&lightweight, None), TagType::Lightweight);
    }

    #[test]
    fn test_base_version_registers_tag_facts() {
        let core = core(false);
        let base = tagged_head();
        let mut metadata = MetadataMap::new();
        let tag_to_use = core.find_tag_to_use(&base, &base);
        let version = core.base_version(&base, tag_to_use, &mut metadata).unwrap();

        assert_eq!(version, Version::new(1, 1, 0));
        assert_eq!(metadata.get(Metadata::BaseTag), Some("v1.1.0"));
        assert_eq!(metadata.get(Metadata::BaseTagType), Some("ANNOTATED"));
        assert_eq!(metadata.get(Metadata::BaseVersion), Some("1.1.0"));
        assert_eq!(metadata.get(Metadata::CurrentVersionMajor), Some("1"));
        assert_eq!(metadata.get(Metadata::CurrentVersionMinor), Some("1"));
        assert_eq!(metadata.get(Metadata::CurrentVersionPatch), Some("0"));
    }

    #[test]
    fn test_base_version_without_tag_registers_sentinels() {
        let core = core(false);
        let base = Commit::new(oid(1));
        let mut metadata = MetadataMap::new();
        let version = core.base_version(&base, None, &mut metadata).unwrap();

        assert_eq!(version, Version::zero());
        assert_eq!(metadata.get(Metadata::BaseTag), Some(""));
        assert_eq!(metadata.get(Metadata::BaseTagType), Some(""));
        assert_eq!(metadata.get(Metadata::BaseVersion), Some("0.0.0"));
        assert_eq!(metadata.get(Metadata::CurrentVersionMajor), Some("0"));
    }

    #[test]
    fn test_enhance_version_with_branch_qualifier() {
        let core = core(false);
        let mut metadata = MetadataMap::new();
        let version =
            core.enhance_version_with_branch(Version::new(1, 0, 0), "feature/x", &mut metadata);

        assert_eq!(version.to_string(), "1.0.0-feature-x");
        assert_eq!(metadata.get(Metadata::BranchName), Some("feature/x"));
        assert_eq!(metadata.get(Metadata::QualifiedBranchName), Some("feature-x"));
    }

    #[test]
    fn test_enhance_version_release_branch_unchanged() {
        let core = core(false);
        let mut metadata = MetadataMap::new();
        let version = core.enhance_version_with_branch(Version::new(1, 0, 0), "main", &mut metadata);

        assert_eq!(version, Version::new(1, 0, 0));
        assert_eq!(metadata.get(Metadata::BranchName), Some("main"));
        assert_eq!(metadata.get(Metadata::QualifiedBranchName), None);
    }

    #[test]
    fn test_consider_tag_as_a_version_one() {
        let core = core(false);
        assert!(core.consider_tag_as_a_version_one(&tag("refs/tags/v1.0.0", 1)));
        assert!(!core.consider_tag_as_a_version_one(&tag("refs/tags/nightly", 2)));
    }
}
