//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod bump;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{BranchRule, RuleSet};
pub use bump::{bump, bump_at};
pub use prerelease::{validate_prefix, PreReleaseFormat};
pub use tag::{find_latest, is_version_tag, latest_version, select_latest, version_tags};
pub use version::{BumpCategory, SemanticVersion};
