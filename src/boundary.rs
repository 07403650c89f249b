use std::fmt;

use crate::domain::BumpCategory;

/// Non-fatal conditions met while computing a tag.
/// These are reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag in the repository looks like a version; counting starts at 0.0.0
    NoVersionTags { tag_count: usize },
    /// The branch matched no rule and the fallback category was used
    BranchRuleFallback {
        branch: String,
        fallback: BumpCategory,
    },
    /// A base override replaced the version found in the repository
    BaseOverridden { requested: String, derived: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionTags { tag_count } => {
                write!(
                    f,
                    "No version tags found among {} tag(s); starting from 0.0.0",
                    tag_count
                )
            }
            BoundaryWarning::BranchRuleFallback { branch, fallback } => {
                write!(
                    f,
                    "Branch '{}' matches no rule; using {} bump",
                    branch, fallback
                )
            }
            BoundaryWarning::BaseOverridden { requested, derived } => {
                write!(
                    f,
                    "Base version {} overrides repository version {}",
                    requested, derived
                )
            }
        }
    }
}
