//! Main workflow orchestration logic
//!
//! Wires the version engine to a repository: scan tags, settle the base
//! version, decide the bump, compute the tag and optionally create and push
//! it. Kept apart from `main.rs` so it can be driven without clap.

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::domain::{self, BumpCategory, PreReleaseFormat, RuleSet, SemanticVersion};
use crate::error::{Result, TagBumpError};
use crate::git::Repository;

/// Where the bump category comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpSelection {
    /// Use this category as given
    Explicit(BumpCategory),
    /// Classify the branch name with the configured rules
    FromBranch,
}

/// Arguments for the tag workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWorkflowArgs {
    pub bump: BumpSelection,

    /// Branch name to classify instead of the checked-out branch
    pub branch: Option<String>,

    /// Version to bump instead of the latest repository tag
    pub base: Option<String>,

    /// Let `base` win when it disagrees with the repository
    pub allow_base_mismatch: bool,

    /// Consider pre-release tags when looking for the latest version
    pub include_prereleases: bool,

    pub pre_release: bool,
    pub prerelease_format: PreReleaseFormat,
    pub prerelease_prefix: String,

    /// Category used when no branch rule matches
    pub fallback_bump: Option<BumpCategory>,

    pub create_tag: bool,
    pub push: bool,
    pub remote: String,

    /// Compute only - never create or push
    pub dry_run: bool,
}

impl Default for TagWorkflowArgs {
    fn default() -> Self {
        TagWorkflowArgs {
            bump: BumpSelection::Explicit(BumpCategory::Patch),
            branch: None,
            base: None,
            allow_base_mismatch: false,
            include_prereleases: false,
            pre_release: false,
            prerelease_format: PreReleaseFormat::SemVer,
            prerelease_prefix: "rc".to_string(),
            fallback_bump: None,
            create_tag: false,
            push: false,
            remote: "origin".to_string(),
            dry_run: false,
        }
    }
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The computed tag
    pub tag: String,

    /// The version the tag was computed from
    pub base: SemanticVersion,

    pub bump: BumpCategory,

    /// The branch that was classified, when the bump came from a branch
    pub branch: Option<String>,

    /// Whether the tag was created locally
    pub created: bool,

    /// Whether the tag was pushed to the remote
    pub pushed: bool,

    pub warnings: Vec<BoundaryWarning>,
}

/// Compute the next tag and, unless this is a dry run, create/push it as requested.
///
/// 1. Find the latest version tag (or start from 0.0.0)
/// 2. Apply the base override, checking it against the repository
/// 3. Take the explicit bump category or classify the branch
/// 4. Compute the tag
/// 5. Create and push it if asked to
pub fn run_tag_workflow<R: Repository>(
    repo: &R,
    rules: &RuleSet,
    args: &TagWorkflowArgs,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let derived = latest_repository_version(repo, args.include_prereleases, &mut warnings)?;
    let base = resolve_base(derived, args, &mut warnings)?;
    let (bump, branch) = resolve_bump(repo, rules, args, &mut warnings)?;

    let tag = domain::bump(
        &base,
        bump,
        args.prerelease_format,
        &args.prerelease_prefix,
        args.pre_release,
    )?;
    info!(base = %base, bump = %bump, tag = %tag, "computed next tag");

    let mut created = false;
    let mut pushed = false;
    if args.dry_run {
        debug!("dry run, repository left untouched");
    } else if args.create_tag || args.push {
        // only tags the scanner can read back are written
        SemanticVersion::parse(&tag)?;
        repo.create_tag(&tag)?;
        created = true;
        info!(tag = %tag, "created tag");

        if args.push {
            repo.push_tag(&args.remote, &tag)?;
            pushed = true;
            info!(tag = %tag, remote = %args.remote, "pushed tag");
        }
    }

    Ok(WorkflowResult {
        tag,
        base,
        bump,
        branch,
        created,
        pushed,
        warnings,
    })
}

/// Latest version tag in the repository, `None` if there is none
fn latest_repository_version<R: Repository>(
    repo: &R,
    include_prereleases: bool,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<Option<SemanticVersion>> {
    let names = repo.list_tag_names()?;
    let latest = domain::find_latest(&names, include_prereleases)?;
    debug!(
        tags = names.len(),
        include_prereleases,
        latest = ?latest.as_ref().map(ToString::to_string),
        "scanned tags"
    );

    if latest.is_none() {
        warnings.push(BoundaryWarning::NoVersionTags {
            tag_count: names.len(),
        });
    }
    Ok(latest)
}

fn resolve_base(
    derived: Option<SemanticVersion>,
    args: &TagWorkflowArgs,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<SemanticVersion> {
    let Some(raw) = args.base.as_deref() else {
        return Ok(derived.unwrap_or_else(SemanticVersion::zero));
    };

    let requested = SemanticVersion::parse(raw)?;
    if let Some(derived) = derived {
        if !requested.same_core(&derived) {
            if !args.allow_base_mismatch {
                return Err(TagBumpError::OverrideMismatch {
                    requested: requested.to_string(),
                    derived: derived.to_string(),
                });
            }
            warnings.push(BoundaryWarning::BaseOverridden {
                requested: requested.to_string(),
                derived: derived.to_string(),
            });
        }
    }
    Ok(requested)
}

fn resolve_bump<R: Repository>(
    repo: &R,
    rules: &RuleSet,
    args: &TagWorkflowArgs,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<(BumpCategory, Option<String>)> {
    if let BumpSelection::Explicit(category) = args.bump {
        return Ok((category, None));
    }

    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => repo.current_branch_name()?,
    };

    match (rules.classify(&branch), args.fallback_bump) {
        (Ok(category), _) => {
            debug!(branch = %branch, category = %category, "classified branch");
            Ok((category, Some(branch)))
        }
        (Err(TagBumpError::NoMatchingRule { .. }), Some(fallback)) => {
            warnings.push(BoundaryWarning::BranchRuleFallback {
                branch: branch.clone(),
                fallback,
            });
            Ok((fallback, Some(branch)))
        }
        (Err(e), _) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::MockRepository;

    fn rules() -> RuleSet {
        Config::default().rule_set().unwrap()
    }

    #[test]
    fn test_explicit_patch() {
        let repo = MockRepository::with_tags(["v1.0.0", "v0.9.0", "docs"]);
        let result = run_tag_workflow(&repo, &rules(), &TagWorkflowArgs::default()).unwrap();
        assert_eq!(result.tag, "v1.0.1");
        assert_eq!(result.bump, BumpCategory::Patch);
        assert_eq!(result.branch, None);
        assert!(result.warnings.is_empty());
        assert!(!result.created);
    }

    #[test]
    fn test_no_tags_warns_and_starts_at_zero() {
        let repo = MockRepository::with_tags(["latest"]);
        let args = TagWorkflowArgs {
            bump: BumpSelection::Explicit(BumpCategory::Minor),
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "0.1.0");
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NoVersionTags { tag_count: 1 }]
        );
    }

    #[test]
    fn test_branch_classification() {
        let mut repo = MockRepository::with_tags(["v1.2.3"]);
        repo.set_branch("feat(api)/search");
        let args = TagWorkflowArgs {
            bump: BumpSelection::FromBranch,
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "v1.3.0");
        assert_eq!(result.branch.as_deref(), Some("feat(api)/search"));
    }

    #[test]
    fn test_branch_override_wins_over_head() {
        let mut repo = MockRepository::with_tags(["v1.2.3"]);
        repo.set_branch("fix/typo");
        let args = TagWorkflowArgs {
            bump: BumpSelection::FromBranch,
            branch: Some("feat!/rewrite".to_string()),
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "v2.0.0");
    }

    #[test]
    fn test_unmatched_branch_without_fallback_fails() {
        let mut repo = MockRepository::with_tags(["v1.2.3"]);
        repo.set_branch("main");
        let args = TagWorkflowArgs {
            bump: BumpSelection::FromBranch,
            ..TagWorkflowArgs::default()
        };
        let err = run_tag_workflow(&repo, &rules(), &args).unwrap_err();
        assert!(matches!(err, TagBumpError::NoMatchingRule { branch } if branch == "main"));
    }

    #[test]
    fn test_unmatched_branch_uses_fallback() {
        let mut repo = MockRepository::with_tags(["v1.2.3"]);
        repo.set_branch("main");
        let args = TagWorkflowArgs {
            bump: BumpSelection::FromBranch,
            fallback_bump: Some(BumpCategory::None),
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "v1.2.3");
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::BranchRuleFallback {
                branch: "main".to_string(),
                fallback: BumpCategory::None,
            }]
        );
    }

    #[test]
    fn test_base_override_matching_repository() {
        let repo = MockRepository::with_tags(["v1.2.3"]);
        let args = TagWorkflowArgs {
            base: Some("1.2.3-rc.4".to_string()),
            bump: BumpSelection::Explicit(BumpCategory::None),
            pre_release: true,
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "1.2.3-rc.5");
    }

    #[test]
    fn test_base_override_mismatch_is_error() {
        let repo = MockRepository::with_tags(["v1.2.3"]);
        let args = TagWorkflowArgs {
            base: Some("2.0.0".to_string()),
            ..TagWorkflowArgs::default()
        };
        let err = run_tag_workflow(&repo, &rules(), &args).unwrap_err();
        assert!(matches!(err, TagBumpError::OverrideMismatch { .. }));
    }

    #[test]
    fn test_base_override_mismatch_allowed() {
        let repo = MockRepository::with_tags(["v1.2.3"]);
        let args = TagWorkflowArgs {
            base: Some("2.0.0".to_string()),
            allow_base_mismatch: true,
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "2.0.1");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_base_override_without_tags() {
        let repo = MockRepository::new();
        let args = TagWorkflowArgs {
            base: Some("v3.1.0".to_string()),
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "v3.1.1");
    }

    #[test]
    fn test_malformed_base_override() {
        let repo = MockRepository::new();
        let args = TagWorkflowArgs {
            base: Some("three".to_string()),
            ..TagWorkflowArgs::default()
        };
        assert!(matches!(
            run_tag_workflow(&repo, &rules(), &args),
            Err(TagBumpError::MalformedTag { .. })
        ));
    }

    #[test]
    fn test_listing_failure_is_fatal() {
        let mut repo = MockRepository::new();
        repo.fail_listing();
        assert!(matches!(
            run_tag_workflow(&repo, &rules(), &TagWorkflowArgs::default()),
            Err(TagBumpError::RepositoryAccess(_))
        ));
    }

    #[test]
    fn test_push_creates_and_pushes() {
        let repo = MockRepository::with_tags(["v1.0.0"]);
        let args = TagWorkflowArgs {
            push: true,
            remote: "upstream".to_string(),
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert!(result.created);
        assert!(result.pushed);
        assert!(repo.has_tag("v1.0.1"));
        assert_eq!(
            repo.pushed(),
            vec![("upstream".to_string(), "v1.0.1".to_string())]
        );
    }

    #[test]
    fn test_dry_run_leaves_repository_alone() {
        let repo = MockRepository::with_tags(["v1.0.0"]);
        let args = TagWorkflowArgs {
            create_tag: true,
            push: true,
            dry_run: true,
            ..TagWorkflowArgs::default()
        };
        let result = run_tag_workflow(&repo, &rules(), &args).unwrap();
        assert_eq!(result.tag, "v1.0.1");
        assert!(!result.created);
        assert!(!result.pushed);
        assert!(!repo.has_tag("v1.0.1"));
    }

    #[test]
    fn test_invalid_prefix_creates_nothing() {
        for prefix in ["", "01"] {
            let repo = MockRepository::with_tags(["v1.0.0"]);
            let args = TagWorkflowArgs {
                pre_release: true,
                prerelease_prefix: prefix.to_string(),
                create_tag: true,
                ..TagWorkflowArgs::default()
            };
            let err = run_tag_workflow(&repo, &rules(), &args).unwrap_err();
            assert!(matches!(err, TagBumpError::Config(_)), "prefix '{}'", prefix);
            assert_eq!(repo.list_tag_names().unwrap(), vec!["v1.0.0"]);
        }
    }

    #[test]
    fn test_component_overflow_creates_nothing() {
        let max_tag = format!("v1.2.{}", u64::MAX);
        let repo = MockRepository::with_tags([max_tag.as_str()]);
        let args = TagWorkflowArgs {
            create_tag: true,
            ..TagWorkflowArgs::default()
        };
        let err = run_tag_workflow(&repo, &rules(), &args).unwrap_err();
        assert!(matches!(err, TagBumpError::MalformedTag { tag, .. } if tag == max_tag));
        assert_eq!(repo.list_tag_names().unwrap(), vec![max_tag]);
    }
}
