use crate::domain::version::BumpCategory;
use crate::error::{Result, TagBumpError};
use regex::Regex;

/// A bump category paired with the pattern that selects it
#[derive(Debug, Clone)]
pub struct BranchRule {
    category: BumpCategory,
    pattern: String,
    matcher: Regex,
}

impl BranchRule {
    /// Compile a rule. The pattern always matches from the start of the branch name.
    pub fn new(category: BumpCategory, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            TagBumpError::InvalidRule {
                rule: category,
                pattern: pattern.clone(),
                source,
            }
        })?;

        Ok(BranchRule {
            category,
            pattern,
            matcher,
        })
    }

    pub fn category(&self) -> BumpCategory {
        self.category
    }

    /// The pattern as configured
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, branch: &str) -> bool {
        self.matcher.is_match(branch)
    }
}

/// Major, minor and patch rules, evaluated in that order
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: [BranchRule; 3],
}

impl RuleSet {
    pub fn new(major: &str, minor: &str, patch: &str) -> Result<Self> {
        Ok(RuleSet {
            rules: [
                BranchRule::new(BumpCategory::Major, major)?,
                BranchRule::new(BumpCategory::Minor, minor)?,
                BranchRule::new(BumpCategory::Patch, patch)?,
            ],
        })
    }

    pub fn rules(&self) -> &[BranchRule] {
        &self.rules
    }

    /// Category of the first rule matching `branch`
    pub fn classify(&self, branch: &str) -> Result<BumpCategory> {
        self.rules
            .iter()
            .find(|rule| rule.matches(branch))
            .map(BranchRule::category)
            .ok_or_else(|| TagBumpError::NoMatchingRule {
                branch: branch.to_string(),
            })
    }
}
