use crate::domain::BranchContext;
use crate::error::{AutoverError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-autover.
///
/// Contains the version-naming rules consulted during resolution and the
/// strategy selection with its depth preference.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub strategy: StrategyConfig,
}

/// Returns the default tag search pattern.
///
/// Matches bare or `v`-prefixed semantic versions; the first capture group is
/// the version text handed to the parser.
fn default_search_pattern() -> String {
    r"^v?([0-9]+\.[0-9]+\.[0-9]+(?:-[0-9A-Za-z.-]+)?)$".to_string()
}

/// Rules mapping tag names and branch names to version information.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NamingConfig {
    /// Regex a tag name must fully match to count as version-bearing.
    #[serde(default = "default_search_pattern")]
    pub search_pattern: String,

    /// Branch-to-qualifier overrides, consulted in order; the first rule
    /// whose pattern matches wins. Branches matching no rule fall back to
    /// the built-in policy (release branches stay unqualified, any other
    /// branch contributes its sanitized name).
    #[serde(default)]
    pub branch_rules: Vec<BranchRule>,
}

/// A single branch-to-qualifier override.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchRule {
    /// Regex the branch name must match.
    pub pattern: String,

    /// Qualifier template; `{branch}` expands to the sanitized branch name.
    /// An empty template means the branch produces no qualifier.
    #[serde(default)]
    pub qualifier: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            search_pattern: default_search_pattern(),
            branch_rules: Vec::new(),
        }
    }
}

impl NamingConfig {
    /// Compile the textual patterns into the form used by the resolution
    /// engine. Invalid regexes surface as configuration errors here, before
    /// any history is walked.
    pub fn compile(&self) -> Result<VersionNaming> {
        let search = Regex::new(&self.search_pattern).map_err(|e| {
            AutoverError::config(format!(
                "Invalid search pattern '{}': {}",
                self.search_pattern, e
            ))
        })?;

        let mut rules = Vec::with_capacity(self.branch_rules.len());
        for rule in &self.branch_rules {
            let pattern = Regex::new(&rule.pattern).map_err(|e| {
                AutoverError::config(format!(
                    "Invalid branch rule pattern '{}': {}",
                    rule.pattern, e
                ))
            })?;
            rules.push((pattern, rule.qualifier.clone()));
        }

        Ok(VersionNaming { search, rules })
    }
}

/// Compiled naming rules: a pure, side-effect-free mapping consumed by the
/// resolution engine.
#[derive(Debug, Clone)]
pub struct VersionNaming {
    search: Regex,
    rules: Vec<(Regex, String)>,
}

impl VersionNaming {
    /// Whether a (prefix-stripped) tag name carries version information.
    pub fn matches_search_pattern(&self, tag_name: &str) -> bool {
        self.search.is_match(tag_name)
    }

    /// Extract the version text from a tag name: the first capture group when
    /// the pattern defines one, the whole match otherwise.
    pub fn extract_version_from(&self, tag_name: &str) -> Option<String> {
        let captures = self.search.captures(tag_name)?;
        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|group| group.as_str().to_string())
    }

    /// Qualifier contributed by the given branch, if any.
    pub fn branch_qualifier(&self, branch: &str) -> Option<String> {
        let context = BranchContext::new(branch);

        for (pattern, template) in &self.rules {
            if pattern.is_match(branch) {
                if template.is_empty() {
                    return None;
                }
                return Some(template.replace("{branch}", &context.qualifier_slug()));
            }
        }

        if context.is_release_branch() {
            None
        } else {
            Some(context.qualifier_slug())
        }
    }
}

/// Which resolution strategy to run.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Version from the nearest tagged ancestor, qualified by branch.
    #[default]
    NearestTag,
    /// Version from the maximal tag over the whole (depth-bounded) history.
    FullHistory,
}

/// Strategy selection and its search-depth preference.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyConfig {
    #[serde(default)]
    pub kind: StrategyKind,

    /// Soft limit on how many commits the deep-history walk inspects.
    #[serde(default)]
    pub depth_limit: Option<usize>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitautover.toml` in current directory
/// 3. `gitautover.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitautover.toml").exists() {
        fs::read_to_string("./gitautover.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitautover.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| AutoverError::config(format!("Cannot parse configuration: {}", e)))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            naming: NamingConfig::default(),
            strategy: StrategyConfig::default(),
        }
    }
}
