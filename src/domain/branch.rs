/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_main: bool,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>) -> Self {
        let name_str = name.into();
        let is_main = matches!(name_str.as_str(), "main" | "master");

        BranchContext {
            name: name_str,
            is_main,
        }
    }

    /// Check if this is a release branch (main/master)
    pub fn is_release_branch(&self) -> bool {
        self.is_main
    }

    /// Branch name reduced to a version-qualifier-safe form
    ///
    /// Runs of characters outside `[A-Za-z0-9]` collapse to a single `-`,
    /// the result is lowercased and stripped of leading/trailing dashes.
    pub fn qualifier_slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        let mut last_was_dash = true;
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.extend(c.to_lowercase());
                last_was_dash = false;
            } else if !last_was_dash {
                slug.push('-');
                last_was_dash = true;
            }
        }
        slug.trim_end_matches('-').to_string()
    }
}
